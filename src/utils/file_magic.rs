/// 校验图片内容的魔术字节与声明的 MIME 类型是否一致
///
/// 未列出的类型一律拒绝。
pub fn validate_magic_bytes(data: &[u8], content_type: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match content_type.to_lowercase().as_str() {
        "image/png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        "image/jpeg" | "image/jpg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "image/gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        "image/webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, "image/png"));
        assert!(validate_magic_bytes(&png_header, "IMAGE/PNG"));
        assert!(!validate_magic_bytes(&png_header, "image/jpeg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, "image/jpeg"));
        assert!(validate_magic_bytes(&jpeg_header, "image/jpg"));
    }

    #[test]
    fn test_webp_magic() {
        let mut webp = b"RIFF".to_vec();
        webp.extend_from_slice(&[0, 0, 0, 0]);
        webp.extend_from_slice(b"WEBP");
        assert!(validate_magic_bytes(&webp, "image/webp"));
        assert!(!validate_magic_bytes(&webp[..8], "image/webp"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], "image/png"));
        assert!(!validate_magic_bytes(b"%PDF-1.4", "application/pdf"));
    }
}
