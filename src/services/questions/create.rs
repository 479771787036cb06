use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::QuestionService;
use crate::models::{
    ApiResponse, ErrorCode,
    questions::{requests::CreateQuestionRequest, responses::CreateQuestionResponse},
};
use crate::services::{backend_error, bad_request, current_teacher};
use crate::storage::NewQuestion;

/// 创建题目：题目 → 标签（失败只记录）→ 选项（失败返回错误）
pub async fn create_question(
    service: &QuestionService,
    request: &HttpRequest,
    question: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };

    let (course_id, answers) = match question.validate() {
        Ok(valid) => valid,
        Err(msg) => return Ok(bad_request(ErrorCode::QuestionInvalid, msg)),
    };

    let storage = service.get_storage(request);

    let created = match storage
        .create_question(NewQuestion {
            teacher_id: teacher.id,
            course_id,
            title: question.title.trim().to_string(),
            content: question.content.trim().to_string(),
            image_url: question.image_url.filter(|u| !u.trim().is_empty()),
            image_filename: question.image_filename.filter(|f| !f.trim().is_empty()),
        })
        .await
    {
        Ok(created) => created,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::QuestionCreationFailed,
                "Question creation failed",
                e,
            ));
        }
    };

    let mut tag_ids = question.tag_ids;
    tag_ids.sort_unstable();
    tag_ids.dedup();

    let mut warnings = Vec::new();
    let attached_tags = if tag_ids.is_empty() {
        0
    } else {
        match storage.attach_question_tags(created.id, &tag_ids).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Question {} created but tagging failed: {}", created.id, e);
                warnings.push("Question created but some tags could not be attached".to_string());
                0
            }
        }
    };

    let answers = match storage.create_answers(created.id, &answers).await {
        Ok(answers) => answers,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::QuestionCreationFailed,
                "Question created but answers could not be saved",
                e,
            ));
        }
    };

    info!(
        "Teacher {} created question {} with {} answer(s)",
        teacher.email,
        created.id,
        answers.len()
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreateQuestionResponse {
            question: created,
            answers,
            attached_tags,
            warnings,
        },
        "Question created successfully",
    )))
}
