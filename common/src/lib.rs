//! Snapcheck Common Library
//!
//! CLIとWeb(WASM)で共有されるアップロード制御と分類APIの契約

pub mod types;
pub mod error;
pub mod config;
pub mod parser;
pub mod classifier;
pub mod controller;

pub use types::{Confidence, ImageSource, Prediction, RequestId, SelectionId};
pub use error::{AnalysisError, Error, ErrorKind, Result};
pub use config::{ClientConfig, Messages};
pub use parser::{format_prediction, parse_error_detail, parse_prediction};
pub use classifier::{submit, Classifier, ANALYZE_PATH, IMAGE_FIELD};
pub use controller::{Effect, Event, Phase, Selection, SubmissionState, UploadController};
