use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{CatalogService, optional_text};
use crate::models::{
    ApiResponse, ErrorCode,
    catalog::{entities::DEFAULT_TAG_COLOR, requests::CreateTagRequest},
};
use crate::services::{backend_error, bad_request};

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid color regex"));

/// 缺省颜色；非法颜色返回 None
fn resolve_color(color: Option<String>) -> Option<String> {
    match optional_text(color) {
        None => Some(DEFAULT_TAG_COLOR.to_string()),
        Some(c) if COLOR_RE.is_match(&c) => Some(c.to_uppercase()),
        Some(_) => None,
    }
}

pub async fn list_tags(service: &CatalogService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_tags().await {
        Ok(tags) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            tags,
            "Tags retrieved successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to list tags",
            e,
        )),
    }
}

pub async fn create_tag(
    service: &CatalogService,
    request: &HttpRequest,
    tag: CreateTagRequest,
) -> ActixResult<HttpResponse> {
    let name = tag.name.trim();
    if name.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Tag name is required"));
    }

    let Some(color) = resolve_color(tag.color) else {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Tag color must be a hex value like #3B82F6",
        ));
    };

    let storage = service.get_storage(request);

    match storage.get_tag_by_name(name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TagAlreadyExists,
                "A tag with this name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::CatalogCreationFailed,
                "Tag lookup failed",
                e,
            ));
        }
    }

    match storage
        .create_tag(name, optional_text(tag.description), &color)
        .await
    {
        Ok(tag) => Ok(HttpResponse::Created().json(ApiResponse::success(
            tag,
            "Tag created successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::CatalogCreationFailed,
            "Tag creation failed",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color(None).as_deref(), Some(DEFAULT_TAG_COLOR));
        assert_eq!(resolve_color(Some("  ".into())).as_deref(), Some(DEFAULT_TAG_COLOR));
        assert_eq!(resolve_color(Some("#10b981".into())).as_deref(), Some("#10B981"));
        assert_eq!(resolve_color(Some("red".into())), None);
    }
}
