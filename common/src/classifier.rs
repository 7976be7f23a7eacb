//! 分類APIの呼び出し口
//!
//! 実際の通信はホストごとに異なる（ブラウザは fetch、CLIは reqwest）ため、
//! ここではトレイトと送信ヘルパーだけを定義する。

use async_trait::async_trait;

use crate::controller::Event;
use crate::error::AnalysisError;
use crate::types::{ImageSource, Prediction, RequestId};

/// 分類APIのパス
pub const ANALYZE_PATH: &str = "/analyze";

/// multipartで画像を載せるフィールド名
pub const IMAGE_FIELD: &str = "image";

/// 分類APIクライアント
///
/// 1回の呼び出しで `POST /analyze` をちょうど1回送る。
/// ブラウザのFutureは `Send` でないため `?Send` で定義する。
#[async_trait(?Send)]
pub trait Classifier<F: ImageSource> {
    async fn classify(&self, image: &F) -> Result<Prediction, AnalysisError>;
}

/// `Effect::Submit` を実行し、結果を `Event::Completed` として返す
pub async fn submit<F, C>(classifier: &C, request: RequestId, image: &F) -> Event<F>
where
    F: ImageSource,
    C: Classifier<F> + ?Sized,
{
    log::info!("{}: POST {} ({})", request, image.file_name(), image.mime_type());
    let outcome = classifier.classify(image).await;
    Event::Completed { request, outcome }
}
