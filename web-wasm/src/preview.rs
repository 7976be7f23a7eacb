//! プレビュー用のData URL読み込み

use gloo::file::futures::read_as_data_url;

use crate::image_file::ImageFile;

/// 画像をData URLとして読み込む（通信なし）
pub async fn read_preview(image: &ImageFile) -> Result<String, String> {
    let file = gloo::file::File::from(image.as_file().clone());
    read_as_data_url(&file).await.map_err(|e| format!("{:?}", e))
}
