//! ブラウザで選択された画像ファイル

use snapcheck_common::ImageSource;
use web_sys::File;

/// `<input type="file">` から取り出した File
#[derive(Debug, Clone)]
pub struct ImageFile(File);

impl ImageFile {
    pub fn as_file(&self) -> &File {
        &self.0
    }
}

impl From<File> for ImageFile {
    fn from(file: File) -> Self {
        Self(file)
    }
}

impl ImageSource for ImageFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }
}
