//! クライアント設定（送信先と画面文言）

use crate::classifier::ANALYZE_PATH;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// クライアント設定
///
/// 全フィールドにデフォルトがあるため、部分的なJSONでも読み込める。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// 分類APIのURL（ブラウザでは相対パス可）
    pub endpoint: String,
    pub messages: Messages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: ANALYZE_PATH.to_string(),
            messages: Messages::default(),
        }
    }
}

impl ClientConfig {
    /// JSON文字列から読み込む
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config("endpoint is empty".into()));
        }
        Ok(())
    }
}

/// 画面に出す文言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Messages {
    pub in_progress: String,
    pub failure: String,
    pub no_selection: String,
    pub upload_placeholder: String,
    pub idle_result: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            in_progress: "Analysis in progress...".into(),
            failure: "Analysis failed. Please try again.".into(),
            no_selection: "Please select an image first.".into(),
            upload_placeholder: "Choose an image".into(),
            idle_result: String::new(),
        }
    }
}
