//! 分類API呼び出し（fetch + multipart/form-data）

use async_trait::async_trait;
use snapcheck_common::{
    parse_prediction, AnalysisError, Classifier, ImageSource, Prediction, IMAGE_FIELD,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use crate::image_file::ImageFile;

/// `POST /analyze` を fetch で送るクライアント
#[derive(Debug, Clone)]
pub struct FetchClassifier {
    endpoint: String,
}

impl FetchClassifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, image: &ImageFile) -> Result<Response, JsValue> {
        let form = FormData::new()?;
        form.append_with_blob_and_filename(IMAGE_FIELD, image.as_file(), &image.file_name())?;

        // Content-Type はブラウザが boundary 付きで設定する
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        resp_value.dyn_into()
    }
}

#[async_trait(?Send)]
impl Classifier<ImageFile> for FetchClassifier {
    async fn classify(&self, image: &ImageFile) -> Result<Prediction, AnalysisError> {
        let resp = self
            .post(image)
            .await
            .map_err(|e| AnalysisError::Transport(js_error_message(&e)))?;

        if !resp.ok() {
            let body = read_text(&resp).await.ok();
            return Err(AnalysisError::server(resp.status(), body.as_deref()));
        }

        let body = read_text(&resp)
            .await
            .map_err(|e| AnalysisError::MalformedResponse(js_error_message(&e)))?;
        parse_prediction(&body)
    }
}

async fn read_text(resp: &Response) -> Result<String, JsValue> {
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// JS例外をログ向けの文字列にする
fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
