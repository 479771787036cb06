//! 题目图片规范化：解码、等比缩放、重新编码为 JPEG

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

use crate::errors::{QuizRoomError, Result};
use crate::models::images::entities::{
    ALLOWED_IMAGE_TYPES, ImageFile, ImageOptions, ImageRejection, ImageValidationResult,
    MAX_IMAGE_SIZE, ProcessedImage,
};

pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";
pub const OUTPUT_EXTENSION: &str = "jpg";

/// 校验上传类型与大小，只返回结果不报错
pub fn validate_image_file(content_type: &str, size: usize) -> ImageValidationResult {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.to_lowercase().as_str()) {
        return ImageValidationResult::invalid(
            ImageRejection::UnsupportedType,
            "Please upload a valid image file (JPEG, PNG, WebP, or GIF)",
        );
    }
    if size > MAX_IMAGE_SIZE {
        return ImageValidationResult::invalid(
            ImageRejection::TooLarge,
            "Image file size must be less than 10MB",
        );
    }
    ImageValidationResult::valid()
}

/// 按 1024 进制格式化字节数，最多保留两位小数
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut threshold = 1024u64;
    while unit < UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// 计算缩放后尺寸
///
/// 缩放系数为 min(max_w / w, max_h / h, 1)，受限的一边正好落在边界上，另一边四舍五入且不小于 1。
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.max(1), height.max(1));
    }
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale_w = max_width as f64 / width as f64;
    let scale_h = max_height as f64 / height as f64;
    if scale_w <= scale_h {
        let h = (height as f64 * scale_w).round() as u32;
        (max_width.max(1), h.clamp(1, max_height.max(1)))
    } else {
        let w = (width as f64 * scale_h).round() as u32;
        (w.clamp(1, max_width.max(1)), max_height.max(1))
    }
}

/// 0.0 - 1.0 映射到编码器的 1 - 100
pub fn encoder_quality(quality: f32) -> u8 {
    let q = if quality.is_finite() {
        quality.clamp(0.0, 1.0)
    } else {
        0.8
    };
    ((q * 100.0).round() as u8).max(1)
}

fn output_name(original_name: &str) -> String {
    let stem = original_name.split('.').next().unwrap_or_default().trim();
    let stem = if stem.is_empty() { "image" } else { stem };
    format!("{stem}.{OUTPUT_EXTENSION}")
}

// JPEG 不支持透明通道，按白色底合成
fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

/// 规范化图片
pub fn process_image(
    bytes: &[u8],
    original_name: &str,
    options: ImageOptions,
) -> Result<ProcessedImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| QuizRoomError::image_decode(format!("Failed to load image: {e}")))?;

    let (width, height) = fit_dimensions(
        decoded.width(),
        decoded.height(),
        options.max_width,
        options.max_height,
    );
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };

    let rgb = flatten_to_rgb(&resized);
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, encoder_quality(options.quality))
        .encode_image(&rgb)
        .map_err(|e| QuizRoomError::image_encode(format!("Failed to process image: {e}")))?;
    if encoded.is_empty() {
        return Err(QuizRoomError::image_encode("Failed to process image"));
    }

    let preview_data_uri = format!(
        "data:{};base64,{}",
        OUTPUT_CONTENT_TYPE,
        STANDARD.encode(&encoded)
    );

    Ok(ProcessedImage {
        original_size_bytes: bytes.len(),
        processed_size_bytes: encoded.len(),
        width: rgb.width(),
        height: rgb.height(),
        preview_data_uri,
        file: ImageFile {
            name: output_name(original_name),
            content_type: OUTPUT_CONTENT_TYPE.to_string(),
            bytes: encoded,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 128]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_fit_landscape() {
        assert_eq!(fit_dimensions(1600, 1200, 800, 600), (800, 600));
        assert_eq!(fit_dimensions(2000, 500, 800, 600), (800, 200));
    }

    #[test]
    fn test_fit_portrait_respects_height() {
        assert_eq!(fit_dimensions(600, 1200, 800, 600), (300, 600));
        // 宽大于高但高度才是受限边
        assert_eq!(fit_dimensions(1000, 900, 800, 600), (667, 600));
    }

    #[test]
    fn test_fit_no_upscale() {
        assert_eq!(fit_dimensions(640, 480, 800, 600), (640, 480));
    }

    #[test]
    fn test_fit_never_zero() {
        assert_eq!(fit_dimensions(10000, 1, 800, 600), (800, 1));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1048576), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_validate_image_file() {
        assert!(validate_image_file("image/png", 1024).is_valid);
        let bad_type = validate_image_file("application/pdf", 10);
        assert!(!bad_type.is_valid);
        assert_eq!(bad_type.rejection, Some(ImageRejection::UnsupportedType));
        assert_eq!(
            bad_type.error.as_deref(),
            Some("Please upload a valid image file (JPEG, PNG, WebP, or GIF)")
        );
        let too_big = validate_image_file("image/jpeg", MAX_IMAGE_SIZE + 1);
        assert_eq!(too_big.rejection, Some(ImageRejection::TooLarge));
        assert_eq!(
            too_big.error.as_deref(),
            Some("Image file size must be less than 10MB")
        );
        assert!(validate_image_file("image/gif", MAX_IMAGE_SIZE).is_valid);
    }

    #[test]
    fn test_encoder_quality() {
        assert_eq!(encoder_quality(0.8), 80);
        assert_eq!(encoder_quality(0.0), 1);
        assert_eq!(encoder_quality(2.0), 100);
    }

    #[test]
    fn test_process_image_resizes_and_encodes() {
        let input = png_bytes(1600, 1200);
        let processed = process_image(&input, "diagram.v2.png", ImageOptions::default()).unwrap();
        assert_eq!((processed.width, processed.height), (800, 600));
        assert_eq!(processed.file.name, "diagram.jpg");
        assert_eq!(processed.file.content_type, "image/jpeg");
        assert_eq!(processed.original_size_bytes, input.len());
        assert_eq!(processed.processed_size_bytes, processed.file.bytes.len());
        assert!(processed.file.bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
        assert!(
            processed
                .preview_data_uri
                .starts_with("data:image/jpeg;base64,")
        );
    }

    #[test]
    fn test_process_image_keeps_small_dimensions() {
        let processed = process_image(&png_bytes(40, 30), "", ImageOptions::default()).unwrap();
        assert_eq!((processed.width, processed.height), (40, 30));
        assert_eq!(processed.file.name, "image.jpg");
    }

    #[test]
    fn test_process_image_rejects_garbage() {
        let err = process_image(b"not an image", "x.png", ImageOptions::default()).unwrap_err();
        assert_eq!(err.code(), "Q013");
    }
}
