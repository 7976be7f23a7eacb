//! エラー型定義

use thiserror::Error;

/// 共通エラー型（設定の読み込みなど）
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// 解析リクエストの失敗
///
/// イベントに載せて受け渡すため `Clone` / `PartialEq` を実装する。
/// 画面にはどの失敗も同じ文言で表示され、区別はログにのみ残る。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no image selected")]
    NoSelection,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("classifier returned HTTP {status}{}", detail_suffix(.detail))]
    Server { status: u16, detail: Option<String> },
}

/// エラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 画像未選択のまま解析を実行した
    UserInput,
    /// 通信失敗・レスポンス不正
    Transport,
    /// 非2xxステータス
    Server,
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::NoSelection => ErrorKind::UserInput,
            AnalysisError::Transport(_) | AnalysisError::MalformedResponse(_) => {
                ErrorKind::Transport
            }
            AnalysisError::Server { .. } => ErrorKind::Server,
        }
    }

    /// 非2xxレスポンスからエラーを作る（本文に `error` フィールドがあれば詳細として保持）
    pub fn server(status: u16, body: Option<&str>) -> Self {
        AnalysisError::Server {
            status,
            detail: body.and_then(crate::parser::parse_error_detail),
        }
    }
}
