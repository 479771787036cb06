use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, auth::responses::MeResponse};

use super::AuthService;

/// 当前会话：解析角色并返回可见路由
pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_current_user(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let fail_open = service.get_config().identity.fail_open;
    let resolver = service.get_resolver(request);

    let role = match resolver
        .resolve(&user.email)
        .await
        .into_role(&user.email, fail_open)
    {
        Ok(role) => role,
        Err(_) => {
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::ServiceUnavailable,
                    "Unable to determine user role, please try again later",
                )),
            );
        }
    };

    let response = MeResponse {
        email: user.email,
        user_id: user.user_id,
        role: role.kind(),
        routes: role.routes().iter().map(|r| r.to_string()).collect(),
        teacher: role.teacher().cloned(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Session retrieved successfully",
    )))
}
