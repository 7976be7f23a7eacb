//! 分類API連携

pub mod classifier;
