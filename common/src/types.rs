//! 分類APIとアップロード制御で共有される型
//!
//! - ImageSource: 選択された画像ファイルのハンドル（ブラウザは File、CLIはメモリ上のバイト列）
//! - Prediction: 分類APIの成功レスポンス
//! - SelectionId / RequestId: 古いプレビュー・古い応答を捨てるための連番

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

/// 選択された画像ファイル
///
/// 中身のバイト列はホスト側（fetch / reqwest）が直接扱うため、ここでは
/// 表示名とMIMEタイプだけを要求する。
pub trait ImageSource: Clone {
    /// 表示用のファイル名
    fn file_name(&self) -> String;

    /// MIMEタイプ（不明なら空文字）
    fn mime_type(&self) -> String;
}

/// 選択ごとに振られる連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectionId(pub u64);

/// 送信ごとに振られる連番
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "selection#{}", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request#{}", self.0)
    }
}

/// 分類APIの成功レスポンス
///
/// `prediction` と `confidence` 以外のフィールドは無視する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    pub confidence: Confidence,
}

/// 確信度（数値でも文字列でも受け付け、送られてきた表記のまま表示する）
///
/// 数値はJSON上の字句（`1e-3`、`1.0` など）をそのまま保持する。
#[derive(Debug, Clone, PartialEq)]
pub enum Confidence {
    Text(String),
    Number(String),
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Text(text) | Confidence::Number(text) => f.write_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get();

        if text.starts_with('"') {
            return serde_json::from_str(text)
                .map(Confidence::Text)
                .map_err(de::Error::custom);
        }
        match text.parse::<serde_json::Number>() {
            Ok(_) => Ok(Confidence::Number(text.to_string())),
            Err(_) => Err(de::Error::custom(format!(
                "confidence must be a string or a number, got {}",
                text
            ))),
        }
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Confidence::Text(text) => serializer.serialize_str(text),
            Confidence::Number(number) => RawValue::from_string(number.clone())
                .map_err(ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

impl From<&str> for Confidence {
    fn from(text: &str) -> Self {
        Confidence::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_deserialize_text_confidence() {
        let json = r#"{"prediction": "cat", "confidence": "0.97"}"#;
        let prediction: Prediction = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(prediction.prediction, "cat");
        assert_eq!(prediction.confidence, Confidence::Text("0.97".to_string()));
    }

    #[test]
    fn test_prediction_deserialize_number_confidence() {
        let json = r#"{"prediction": "FAKE", "confidence": 0.875}"#;
        let prediction: Prediction = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(prediction.confidence.to_string(), "0.875");
    }

    #[test]
    fn test_prediction_ignores_extra_fields() {
        let json = r#"{"prediction": "REAL", "confidence": "91.20%", "model": "v2"}"#;
        let prediction: Prediction = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(prediction.prediction, "REAL");
        assert_eq!(prediction.confidence.to_string(), "91.20%");
    }

    #[test]
    fn test_prediction_missing_confidence_is_error() {
        let json = r#"{"prediction": "cat"}"#;
        assert!(serde_json::from_str::<Prediction>(json).is_err());
    }

    #[test]
    fn test_confidence_integer_display() {
        let confidence: Confidence = serde_json::from_str("1").expect("デシリアライズ失敗");
        assert_eq!(confidence.to_string(), "1");
    }

    #[test]
    fn test_confidence_number_keeps_lexical_form() {
        for (json, shown) in [("1e-3", "1e-3"), ("1.0", "1.0"), ("0.970", "0.970"), ("-0", "-0")] {
            let confidence: Confidence = serde_json::from_str(json).expect("デシリアライズ失敗");
            assert_eq!(confidence, Confidence::Number(shown.to_string()));
            assert_eq!(confidence.to_string(), shown);
        }
    }

    #[test]
    fn test_confidence_rejects_other_json() {
        for json in ["true", "null", "[0.9]", r#"{"value": 0.9}"#] {
            assert!(serde_json::from_str::<Confidence>(json).is_err(), "{}", json);
        }
    }

    #[test]
    fn test_prediction_serialize_keeps_number() {
        let json = r#"{"prediction":"cat","confidence":1e-3}"#;
        let prediction: Prediction = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(serde_json::to_string(&prediction).unwrap(), json);
    }

    #[test]
    fn test_ids_display() {
        assert_eq!(SelectionId(3).to_string(), "selection#3");
        assert_eq!(RequestId(7).to_string(), "request#7");
    }
}
