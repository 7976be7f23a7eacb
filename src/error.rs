use snapcheck_common::AnalysisError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapcheckError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("画像が選択されていません")]
    NoSelection,

    #[error("解析に失敗しました: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SnapcheckError>;
