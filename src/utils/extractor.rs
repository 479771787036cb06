//! 路径参数提取器，解析失败时直接返回统一错误响应

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}\.jpg$").expect("Invalid filename regex"));

fn bad_path_param(name: &str, message: String) -> actix_web::Error {
    InternalError::from_response(
        format!("invalid path parameter: {name}"),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);
                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(bad_path_param(
                        $param,
                        format!("Invalid {}: must be a positive integer", $param),
                    )),
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeClassIdI64, "class_id");
define_safe_i64_extractor!(SafeSessionIdI64, "session_id");
define_safe_i64_extractor!(SafeMemberIdI64, "member_id");

/// 图片文件名，只允许上传时生成的格式，防止路径穿越
#[derive(Debug, Clone)]
pub struct SafeFilename(pub String);

impl FromRequest for SafeFilename {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let filename = req.match_info().get("filename").unwrap_or_default();
        ready(if FILENAME_RE.is_match(filename) {
            Ok(SafeFilename(filename.to_string()))
        } else {
            Err(bad_path_param("filename", "Invalid filename".to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_session_id() {
        let req = TestRequest::default()
            .param("session_id", "42")
            .to_http_request();
        let id = SafeSessionIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_rejects_non_positive_id() {
        let req = TestRequest::default()
            .param("class_id", "-3")
            .to_http_request();
        assert!(SafeClassIdI64::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_filename_rejects_traversal() {
        let ok = TestRequest::default()
            .param("filename", "1700000000000-AbCdEfGhIj.jpg")
            .to_http_request();
        assert!(SafeFilename::extract(&ok).await.is_ok());

        let bad = TestRequest::default()
            .param("filename", "../config.toml")
            .to_http_request();
        assert!(SafeFilename::extract(&bad).await.is_err());
    }
}
