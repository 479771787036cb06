use serde::Serialize;
use ts_rs::TS;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// 规范化参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// 0.0 - 1.0
    pub quality: f32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
            quality: 0.8,
        }
    }
}

impl From<&crate::config::ImageConfig> for ImageOptions {
    fn from(config: &crate::config::ImageConfig) -> Self {
        Self {
            max_width: config.max_width,
            max_height: config.max_height,
            quality: config.quality,
        }
    }
}

/// 编码后的文件
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub file: ImageFile,
    pub preview_data_uri: String,
    pub original_size_bytes: usize,
    pub processed_size_bytes: usize,
    pub width: u32,
    pub height: u32,
}

/// 校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../bindings/image.ts")]
#[serde(rename_all = "snake_case")]
pub enum ImageRejection {
    UnsupportedType,
    TooLarge,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../bindings/image.ts")]
pub struct ImageValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
    pub rejection: Option<ImageRejection>,
}

impl ImageValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
            rejection: None,
        }
    }

    pub fn invalid(rejection: ImageRejection, error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
            rejection: Some(rejection),
        }
    }
}
