use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, auth::requests::RegisterRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{is_valid_email, normalize_email, validate_password};

use super::{AuthService, token_generation_failed, token_response};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let email = normalize_email(&register_request.email);

    if !is_valid_email(&email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailInvalid,
            "Please enter a valid email address",
        )));
    }

    let policy = validate_password(&register_request.password);
    if !policy.is_valid {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            policy.error_message(),
        )));
    }

    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "An account with this email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Register lookup failed for {}: {}", email, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed, please try again",
                )),
            );
        }
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed, please try again",
                )),
            );
        }
    };

    let display_name = register_request
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let user = match storage
        .create_user(&email, &password_hash, display_name)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to create user {}: {}", email, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed, please try again",
                )),
            );
        }
    };

    tracing::info!("User {} registered", user.email);

    match user.generate_token_pair() {
        Ok(tokens) => Ok(token_response(
            service,
            user,
            tokens,
            "Registration successful",
            true,
        )),
        Err(e) => Ok(token_generation_failed(e)),
    }
}
