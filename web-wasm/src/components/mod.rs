pub mod header;
pub mod upload_area;
pub mod image_preview;
pub mod analyze_button;
pub mod result_display;
