use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::{DevLoginRequest, LoginRequest},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::{is_valid_email, normalize_email};

use super::{AuthService, token_generation_failed, token_response};

const INVALID_CREDENTIALS: &str = "Email or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let email = normalize_email(&login_request.email);

    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) if verify_password(&login_request.password, &user.password_hash) => user,
        Ok(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                INVALID_CREDENTIALS,
            )));
        }
        Err(e) => {
            tracing::error!("Login lookup failed for {}: {}", email, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, please try again",
                )),
            );
        }
    };

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.email, e);
    }

    match user.generate_token_pair() {
        Ok(tokens) => {
            tracing::info!("User {} logged in", user.email);
            Ok(token_response(service, user, tokens, "Login successful", false))
        }
        Err(e) => Ok(token_generation_failed(e)),
    }
}

/// 开发环境下只凭邮箱登录，不建身份账号
pub async fn handle_dev_login(
    service: &AuthService,
    dev_request: DevLoginRequest,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !service.get_config().is_development() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::DevLoginDisabled,
            "Development login is disabled",
        )));
    }

    let email = normalize_email(&dev_request.email);
    if !is_valid_email(&email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailInvalid,
            "Please enter a valid email address",
        )));
    }

    let tokens = match JwtUtils::generate_token_pair(&email, None) {
        Ok(tokens) => tokens,
        Err(e) => return Ok(token_generation_failed(e)),
    };

    tracing::warn!("Development login for {}", email);

    let now = chrono::Utc::now();
    let user = crate::models::users::entities::User {
        id: 0,
        email,
        password_hash: String::new(),
        display_name: None,
        last_login: Some(now),
        created_at: now,
        updated_at: now,
    };

    Ok(token_response(
        service,
        user,
        tokens,
        "Development login successful",
        false,
    ))
}
