use serde::Serialize;
use ts_rs::TS;

// 图片上传结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/image.ts")]
pub struct ImageUploadResponse {
    pub image_url: String,
    pub image_filename: String,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    pub original_size: String,
    pub processed_size: String,
    pub preview_data_uri: String,
}
