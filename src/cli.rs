use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sar-detect")]
#[command(about = "UAV画像の人物検出クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を検出サービスへ送り、注釈付き画像を保存
    Detect {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: 入力と同じフォルダ/<名前>-detection.<拡張子>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// APIのベースURL（設定ファイル・環境変数より優先）
        #[arg(long)]
        api_url: Option<String>,
    },

    /// 設定を表示・変更
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
