use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SessionService, load_session, overview::build_overviews};
use crate::models::{ApiResponse, ErrorCode, sessions::responses::SessionDetailResponse};
use crate::services::{backend_error, current_user, not_found_or_denied};

pub async fn get_session(
    service: &SessionService,
    request: &HttpRequest,
    session_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let session = match load_session(&storage, session_id).await {
        Ok(session) => session,
        Err(resp) => return Ok(resp),
    };

    let scope = match storage.get_session_scope(&session).await {
        Ok(scope) => scope,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load session scope",
                e,
            ));
        }
    };

    let overview = match build_overviews(&storage, vec![session], Some(&user.email)).await {
        Ok(mut overviews) => match overviews.pop() {
            Some(overview) => overview,
            None => return Ok(not_found_or_denied(ErrorCode::SessionNotFound, "Session")),
        },
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load session overview",
                e,
            ));
        }
    };

    // 只列出显式指定的题目
    let questions = match storage.list_questions_by_ids(&scope.question_ids).await {
        Ok(questions) => questions,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load session questions",
                e,
            ));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SessionDetailResponse {
            overview,
            questions,
        },
        "Session retrieved successfully",
    )))
}
