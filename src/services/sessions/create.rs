use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{SessionCreationSaga, SessionService};
use crate::models::{
    ApiResponse, ErrorCode,
    sessions::{SessionDraft, responses::CreateSessionResponse},
};
use crate::services::classes::load_owned_class;
use crate::services::{backend_error, bad_request, current_teacher};

pub async fn create_session(
    service: &SessionService,
    request: &HttpRequest,
    draft: SessionDraft,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };

    // 校验在任何存储调用之前
    let validated = match draft.validate() {
        Ok(validated) => validated,
        Err(msg) => return Ok(bad_request(ErrorCode::SessionInvalid, msg)),
    };

    let storage = service.get_storage(request);
    if let Err(resp) = load_owned_class(&storage, validated.class_id, teacher.id).await {
        return Ok(resp);
    }

    let report = match SessionCreationSaga::new(storage).run(teacher.id, &validated).await {
        Ok(report) => report,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::SessionCreationFailed,
                "Session creation failed",
                e,
            ));
        }
    };

    info!(
        "Teacher {} created session {} for class {}",
        teacher.email, report.session.id, report.session.class_id
    );

    let message = if report.is_complete() {
        "Session created successfully"
    } else {
        "Session created with warnings"
    };
    let warnings = report.failures.iter().map(|f| f.user_message()).collect();

    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreateSessionResponse {
            session: report.session,
            attached_tags: report.attached_tags,
            attached_questions: report.attached_questions,
            warnings,
        },
        message,
    )))
}
