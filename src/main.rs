use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use sar_detect::{cli, client, config, error, input, output};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// 失敗時にstderrへ出す行の先頭（デスクトップ版がこの行を表示する）
const FAILURE_PREFIX: &str = "✖ ";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}{}", FAILURE_PREFIX, err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect { image, output: output_arg, api_url } => {
            let config = Config::load()?;
            println!("🛰  sar-detect - 人物検出\n");

            // 1. 画像読み込み
            println!("[1/3] 画像を読み込み中...");
            let input_image = input::load_image(&image)?;
            println!("✔ {} ({} bytes)\n", input_image.file_name, input_image.bytes.len());

            // 2. 検出サービスへ送信
            let endpoint = config.resolve_endpoint(api_url.as_deref())?;
            println!("[2/3] 検出中... ({})", endpoint.detect_url());
            let client = client::DetectClient::new(
                endpoint,
                Duration::from_secs(config.timeout_seconds),
            )?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Processing...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let detected = client.detect(&input_image).await;
            spinner.finish_and_clear();
            let detected = detected?;
            println!("✔ 検出完了\n");

            // 3. 保存
            println!("[3/3] 結果を保存中...");
            let output_path = output::resolve_output_path(
                &image,
                output_arg.as_deref(),
                detected.file_extension(),
            );
            output::write_result(&output_path, &detected.bytes)?;
            println!("✔ 結果を保存: {}", output_path.display());

            println!("\n✅ 完了");
        }

        Commands::Config { set_api_url, set_timeout, show } => {
            let mut config = Config::load_or_default();
            let mut changed = false;

            if let Some(url) = set_api_url {
                config.set_api_url(&url)?;
                changed = true;
                println!("✔ APIのURLを設定しました: {}", config.api_url);
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                changed = true;
                println!("✔ タイムアウトを設定しました: {}秒", seconds);
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                let env_override = std::env::var(config::API_URL_ENV).ok();
                println!("設定:");
                println!("  APIのURL: {}", config.api_url);
                println!("  検出エンドポイント: {}", config.api_url.detect_url());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                if let Some(url) = env_override {
                    println!("  環境変数 {}: {}", config::API_URL_ENV, url);
                }
                println!("  設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "sar_detect=debug" } else { "sar_detect=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
