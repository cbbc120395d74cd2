use crate::error::{Result, SarDetectError};
use sar_detect_common::ApiEndpoint;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// APIのベースURLを上書きする環境変数
pub const API_URL_ENV: &str = "SAR_DETECT_API_URL";

const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: ApiEndpoint,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: ApiEndpoint::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// 読めない・壊れた設定ファイルは既定値で置き換える
    ///
    /// `config` コマンドはこちらで読み込む。
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(err) => {
                tracing::warn!(error = %err, "config path unavailable, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "config unreadable, using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SarDetectError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sar-detect").join("config.json"))
    }

    /// 実際に使うエンドポイント
    ///
    /// 優先順位: コマンドライン引数 > 環境変数 > 設定ファイル
    pub fn resolve_endpoint(&self, cli_override: Option<&str>) -> Result<ApiEndpoint> {
        let env_value = std::env::var(API_URL_ENV).ok();
        self.resolve_endpoint_with(cli_override, env_value.as_deref())
    }

    pub fn resolve_endpoint_with(
        &self,
        cli_override: Option<&str>,
        env_value: Option<&str>,
    ) -> Result<ApiEndpoint> {
        let chosen = cli_override.or(env_value.filter(|v| !v.trim().is_empty()));
        match chosen {
            Some(url) => Ok(ApiEndpoint::parse(url)?),
            None => Ok(self.api_url.clone()),
        }
    }

    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        self.api_url = ApiEndpoint::parse(url)?;
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(SarDetectError::Config("タイムアウトは1秒以上にしてください".into()));
        }
        self.timeout_seconds = seconds;
        Ok(())
    }
}
