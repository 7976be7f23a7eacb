//! 分類API呼び出し（reqwest + multipart/form-data）

use crate::error::{Result, SnapcheckError};
use crate::image_file::LocalImage;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use snapcheck_common::{parse_prediction, AnalysisError, Classifier, Prediction, IMAGE_FIELD};

/// `POST /analyze` を送るHTTPクライアント
///
/// タイムアウトは設けない（応答がなければ待ち続ける）。
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("snapcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SnapcheckError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl Classifier<LocalImage> for HttpClassifier {
    async fn classify(&self, image: &LocalImage) -> std::result::Result<Prediction, AnalysisError> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);
        log::debug!("POST {} ({} bytes)", self.endpoint, image.bytes.len());

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = resp.status();
        log::debug!("{} -> {}", self.endpoint, status);
        if !status.is_success() {
            let body = resp.text().await.ok();
            return Err(AnalysisError::server(status.as_u16(), body.as_deref()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        parse_prediction(&body)
    }
}
