//! 分類APIレスポンスのパースと結果文言の整形

use crate::error::AnalysisError;
use crate::types::Prediction;

/// 成功レスポンスの本文をパース
///
/// JSONとして読めない、または `prediction` / `confidence` が欠けている場合は
/// `MalformedResponse` になる。
///
/// # Examples
/// ```
/// use snapcheck_common::{format_prediction, parse_prediction};
///
/// let prediction = parse_prediction(r#"{"prediction":"cat","confidence":"0.97"}"#).unwrap();
/// assert_eq!(format_prediction(&prediction), "Prediction: cat (Confidence: 0.97)");
/// ```
pub fn parse_prediction(body: &str) -> Result<Prediction, AnalysisError> {
    serde_json::from_str(body.trim()).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}

/// 結果表示用の文言
pub fn format_prediction(prediction: &Prediction) -> String {
    format!(
        "Prediction: {} (Confidence: {})",
        prediction.prediction, prediction.confidence
    )
}

/// エラーレスポンスの本文から `error` フィールドを取り出す（ログ用）
pub fn parse_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let detail = value.get("error")?;
    match detail.as_str() {
        Some(s) => Some(s.to_string()),
        None if detail.is_null() => None,
        None => Some(detail.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;

    #[test]
    fn test_parse_prediction_success() {
        let prediction = parse_prediction(r#"{"prediction":"cat","confidence":"0.97"}"#).unwrap();
        assert_eq!(prediction.prediction, "cat");
        assert_eq!(prediction.confidence, Confidence::Text("0.97".into()));
    }

    #[test]
    fn test_parse_prediction_surrounding_whitespace() {
        let prediction =
            parse_prediction("\n  {\"prediction\":\"dog\",\"confidence\":0.5}\n").unwrap();
        assert_eq!(prediction.prediction, "dog");
    }

    #[test]
    fn test_parse_prediction_not_json() {
        let result = parse_prediction("<html>Internal Server Error</html>");
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_prediction_wrong_shape() {
        let result = parse_prediction(r#"{"label":"cat","score":0.9}"#);
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_prediction_array_is_rejected() {
        let result = parse_prediction(r#"[{"prediction":"cat","confidence":"0.97"}]"#);
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn test_format_prediction_exact() {
        let prediction = Prediction {
            prediction: "cat".to_string(),
            confidence: "0.97".into(),
        };
        assert_eq!(format_prediction(&prediction), "Prediction: cat (Confidence: 0.97)");
    }

    #[test]
    fn test_format_prediction_percentage_text() {
        let prediction =
            parse_prediction(r#"{"prediction":"FAKE","confidence":"87.31%"}"#).unwrap();
        assert_eq!(format_prediction(&prediction), "Prediction: FAKE (Confidence: 87.31%)");
    }

    #[test]
    fn test_parse_error_detail() {
        assert_eq!(
            parse_error_detail(r#"{"error": "No image selected"}"#),
            Some("No image selected".to_string())
        );
        assert_eq!(
            parse_error_detail(r#"{"error": {"code": 4}}"#),
            Some(r#"{"code":4}"#.to_string())
        );
        assert_eq!(parse_error_detail(r#"{"error": null}"#), None);
        assert_eq!(parse_error_detail(r#"{"message": "x"}"#), None);
        assert_eq!(parse_error_detail("oops"), None);
    }
}
