use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SessionService, load_session};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{backend_error, current_user};

/// 加入会话：不检查是否已加入，也不检查班级成员身份
pub async fn join_session(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_session(&storage, session_id).await {
        return Ok(resp);
    }

    match storage.add_participant(session_id, &user.email).await {
        Ok(participant) => {
            info!("{} joined session {}", user.email, session_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                participant,
                "Joined session successfully",
            )))
        }
        Err(e) => Ok(backend_error(
            ErrorCode::SessionJoinFailed,
            "Failed to join session",
            e,
        )),
    }
}
