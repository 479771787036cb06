use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode, questions::requests::QuestionListQuery};
use crate::services::{backend_error, current_teacher};

/// 列出教师自己的题目，可按标题搜索
pub async fn list_questions(
    service: &QuestionService,
    request: &HttpRequest,
    query: QuestionListQuery,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage
        .list_question_details_by_teacher(teacher.id, query.search.as_deref())
        .await
    {
        Ok(questions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            questions,
            "Questions retrieved successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to list questions",
            e,
        )),
    }
}
