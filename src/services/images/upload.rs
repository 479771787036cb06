use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;

use super::ImageService;
use crate::config::AppConfig;
use crate::models::images::{
    entities::{ImageOptions, ImageRejection},
    responses::ImageUploadResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_storage::generate_object_name;
use crate::services::{backend_error, bad_request};
use crate::utils::image::{OUTPUT_EXTENSION, format_file_size, process_image, validate_image_file};
use crate::utils::validate_magic_bytes;

struct UploadedFile {
    original_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

pub async fn handle_upload(
    service: &ImageService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let max_size = config.upload.max_size;

    let mut uploaded: Option<UploadedFile> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if uploaded.is_some() {
            return Ok(bad_request(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let content_type = field
            .content_type()
            .map(|ct| ct.essence_str().to_string())
            .unwrap_or_default();

        // 先按类型拒绝，避免读完整个请求体
        let type_check = validate_image_file(&content_type, 0);
        if !type_check.is_valid {
            return Ok(bad_request(
                rejection_code(type_check.rejection),
                type_check.error.unwrap_or_default(),
            ));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            if bytes.len() + data.len() > max_size {
                return Ok(bad_request(
                    ErrorCode::FileSizeExceeded,
                    "Image file size must be less than 10MB",
                ));
            }
            bytes.extend_from_slice(&data);
        }

        uploaded = Some(UploadedFile {
            original_name,
            content_type,
            bytes,
        });
    }

    let Some(file) = uploaded else {
        return Ok(bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ));
    };

    let validation = validate_image_file(&file.content_type, file.bytes.len());
    if !validation.is_valid {
        return Ok(bad_request(
            rejection_code(validation.rejection),
            validation.error.unwrap_or_default(),
        ));
    }

    if !validate_magic_bytes(&file.bytes, &file.content_type) {
        return Ok(bad_request(
            ErrorCode::FileTypeNotAllowed,
            "File content does not match its declared type",
        ));
    }

    // 解码与编码是 CPU 密集操作
    let options = ImageOptions::from(&config.image);
    let processed = match web::block(move || {
        process_image(&file.bytes, &file.original_name, options)
    })
    .await
    {
        Ok(Ok(processed)) => processed,
        Ok(Err(e)) => {
            tracing::info!("Image processing rejected upload: {}", e);
            return Ok(bad_request(
                ErrorCode::ImageProcessingFailed,
                "Failed to process image",
            ));
        }
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::ImageProcessingFailed,
                "Image processing task failed",
                e,
            ));
        }
    };

    let object_name = generate_object_name(OUTPUT_EXTENSION);
    let objects = service.get_object_storage(request);
    let image_url = match objects
        .upload(
            &object_name,
            &processed.file.bytes,
            &processed.file.content_type,
        )
        .await
    {
        Ok(url) => url,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::FileUploadFailed,
                "Failed to store image",
                e,
            ));
        }
    };

    tracing::info!(
        "Stored image {} ({} -> {})",
        object_name,
        format_file_size(processed.original_size_bytes as u64),
        format_file_size(processed.processed_size_bytes as u64)
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ImageUploadResponse {
            image_url,
            image_filename: object_name,
            content_type: processed.file.content_type,
            width: processed.width,
            height: processed.height,
            original_size: format_file_size(processed.original_size_bytes as u64),
            processed_size: format_file_size(processed.processed_size_bytes as u64),
            preview_data_uri: processed.preview_data_uri,
        },
        "Image uploaded successfully",
    )))
}

fn rejection_code(rejection: Option<ImageRejection>) -> ErrorCode {
    match rejection {
        Some(ImageRejection::TooLarge) => ErrorCode::FileSizeExceeded,
        Some(ImageRejection::UnsupportedType) | None => ErrorCode::FileTypeNotAllowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::images::entities::MAX_IMAGE_SIZE;

    #[test]
    fn test_rejection_code_follows_failure_kind() {
        let too_big = validate_image_file("image/png", MAX_IMAGE_SIZE + 1);
        assert_eq!(rejection_code(too_big.rejection), ErrorCode::FileSizeExceeded);

        let wrong_type = validate_image_file("text/plain", 10);
        assert_eq!(rejection_code(wrong_type.rejection), ErrorCode::FileTypeNotAllowed);
    }
}
