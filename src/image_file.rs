use crate::error::{Result, SnapcheckError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use snapcheck_common::ImageSource;
use std::path::Path;
use std::sync::Arc;

/// 拡張子とMIMEタイプの対応
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
];

/// ディスクから読み込んだ画像
#[derive(Debug, Clone)]
pub struct LocalImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl LocalImage {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SnapcheckError::FileNotFound(path.display().to_string()));
        }

        let mime_type = mime_type_for(path)
            .ok_or_else(|| SnapcheckError::UnsupportedImage(path.display().to_string()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let bytes = std::fs::read(path)?;

        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            bytes: bytes.into(),
        })
    }

    /// プレビュー用のData URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

impl ImageSource for LocalImage {
    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}

/// 拡張子からMIMEタイプを判定（大文字小文字は区別しない）
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}
