use crate::error::{Result, SnapcheckError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use snapcheck_common::{Messages, ANALYZE_PATH};
use std::path::{Path, PathBuf};

/// 分類APIのデフォルト送信先（Flask開発サーバー）
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/analyze";

/// 送信先を上書きする環境変数
pub const ENDPOINT_ENV: &str = "SNAPCHECK_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub endpoint: String,
    pub messages: Messages,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            messages: Messages::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// 既存ファイルを読まずにデフォルト設定で上書きする（壊れた設定からの復旧用）
    pub fn reset() -> Result<Self> {
        Self::reset_at(&Self::config_path()?)
    }

    pub fn reset_at(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SnapcheckError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("snapcheck").join("config.json"))
    }

    /// 送信先を決める（優先順位: 引数 > 環境変数 > 設定ファイル）
    pub fn resolve_endpoint(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(ENDPOINT_ENV).ok();
        self.resolve_endpoint_with(flag, env.as_deref())
    }

    pub fn resolve_endpoint_with(&self, flag: Option<&str>, env: Option<&str>) -> Result<String> {
        let raw = [flag, env]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .unwrap_or(&self.endpoint);
        normalize_endpoint(raw)
    }

    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<()> {
        self.endpoint = normalize_endpoint(endpoint)?;
        self.save()
    }
}

/// 送信先URLを検証する（パスのないURLには `/analyze` を補う）
pub fn normalize_endpoint(raw: &str) -> Result<String> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| SnapcheckError::Config(format!("不正なURL {}: {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SnapcheckError::Config(format!(
            "http/https のURLを指定してください: {}",
            raw
        )));
    }

    if url.path().is_empty() || url.path() == "/" {
        url.set_path(ANALYZE_PATH);
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_endpoint() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5000/analyze");
        assert_eq!(config.messages.failure, "Analysis failed. Please try again.");
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.endpoint = "https://classifier.example/analyze".into();
        config.messages.in_progress = "解析中...".into();
        config.save_to(&path).expect("設定保存失敗");

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"endpoint": "http://10.0.0.2:8080/analyze"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.2:8080/analyze");
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_load_broken_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{endpoint").unwrap();

        assert!(matches!(Config::load_from(&path), Err(SnapcheckError::JsonParse(_))));
    }

    #[test]
    fn test_reset_over_broken_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("snapcheck").join("config.json");
        let custom = Config {
            endpoint: "http://10.0.0.2:8080/analyze".into(),
            ..Config::default()
        };
        custom.save_to(&path).expect("設定保存失敗");
        std::fs::write(&path, "{endpoint").unwrap();
        assert!(Config::load_from(&path).is_err());

        let config = Config::reset_at(&path).expect("設定初期化失敗");
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_resolve_endpoint_precedence() {
        let config = Config::default();
        assert_eq!(
            config
                .resolve_endpoint_with(
                    Some("http://flag.test/analyze"),
                    Some("http://env.test/analyze")
                )
                .unwrap(),
            "http://flag.test/analyze"
        );
        assert_eq!(
            config.resolve_endpoint_with(None, Some("http://env.test/analyze")).unwrap(),
            "http://env.test/analyze"
        );
        assert_eq!(
            config.resolve_endpoint_with(None, Some("  ")).unwrap(),
            DEFAULT_ENDPOINT
        );
    }

    #[test]
    fn test_normalize_appends_analyze_path() {
        assert_eq!(
            normalize_endpoint("http://localhost:5000").unwrap(),
            "http://localhost:5000/analyze"
        );
        assert_eq!(
            normalize_endpoint("http://localhost:5000/").unwrap(),
            "http://localhost:5000/analyze"
        );
        assert_eq!(
            normalize_endpoint("https://api.example/v1/classify").unwrap(),
            "https://api.example/v1/classify"
        );
    }

    #[test]
    fn test_normalize_rejects_invalid() {
        assert!(matches!(normalize_endpoint("/analyze"), Err(SnapcheckError::Config(_))));
        assert!(matches!(normalize_endpoint("ftp://host/analyze"), Err(SnapcheckError::Config(_))));
    }
}
