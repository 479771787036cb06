use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::CacheResult;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::{MagicLinkRequest, MagicLinkVerifyRequest},
        responses::MagicLinkResponse,
    },
};
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_code;
use crate::utils::validate::{is_valid_email, normalize_email};

use super::{AuthService, token_generation_failed, token_response};

const MAGIC_LINK_TOKEN_LENGTH: usize = 32;

fn magic_link_key(token: &str) -> String {
    format!("magic_link:{token}")
}

/// 签发一次性登录令牌；投递由外部完成，这里只记录链接
pub async fn handle_request_magic_link(
    service: &AuthService,
    link_request: MagicLinkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let cache = service.get_cache(request);

    let email = normalize_email(&link_request.email);
    if !is_valid_email(&email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailInvalid,
            "Please enter a valid email address",
        )));
    }

    let token = generate_random_code(MAGIC_LINK_TOKEN_LENGTH);
    let ttl = config.identity.magic_link_ttl;
    cache
        .insert_raw(magic_link_key(&token), email.clone(), ttl)
        .await;

    tracing::info!(
        "Magic link issued for {}: {}?token={}",
        email,
        config.identity.magic_link_base_url,
        token
    );

    let response = MagicLinkResponse {
        email,
        expires_in: ttl,
        token: config.is_development().then_some(token),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Check your email for the login link",
    )))
}

/// 消费令牌并登录，首次登录时创建身份账号
pub async fn handle_verify_magic_link(
    service: &AuthService,
    verify_request: MagicLinkVerifyRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);
    let storage = service.get_storage(request);

    let key = magic_link_key(verify_request.token.trim());
    let email = match cache.get_raw(&key).await {
        CacheResult::Found(email) => email,
        _ => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::MagicLinkInvalid,
                "Login link is invalid or has expired",
            )));
        }
    };
    // 一次性
    cache.remove(&key).await;

    let existing = match storage.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Magic link lookup failed for {}: {}", email, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, please try again",
                )),
            );
        }
    };

    let user = match existing {
        Some(user) => user,
        None => {
            // 免密账号的密码不可用
            let created = match hash_password(&generate_random_code(MAGIC_LINK_TOKEN_LENGTH)) {
                Ok(hash) => storage.create_user(&email, &hash, None).await,
                Err(e) => Err(e),
            };
            match created {
                Ok(user) => {
                    tracing::info!("Created account for {} on first magic link login", email);
                    user
                }
                Err(e) => {
                    tracing::error!("Failed to create account for {}: {}", email, e);
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::RegisterFailed,
                            "Login failed, please try again",
                        )),
                    );
                }
            }
        }
    };

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.email, e);
    }

    match user.generate_token_pair() {
        Ok(tokens) => Ok(token_response(service, user, tokens, "Login successful", false)),
        Err(e) => Ok(token_generation_failed(e)),
    }
}
