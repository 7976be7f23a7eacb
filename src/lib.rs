//! snapcheck - 画像分類APIクライアント
//!
//! Web版（web-wasm）と同じアップロード制御を端末から動かす

pub mod cli;
pub mod config;
pub mod error;
pub mod image_file;
pub mod classifier;
pub mod session;
