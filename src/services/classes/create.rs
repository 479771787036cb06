use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ClassService, normalize_candidates};
use crate::models::{
    ApiResponse, ErrorCode,
    classes::{requests::CreateClassRequest, responses::ClassDetailResponse},
};
use crate::services::{backend_error, bad_request, current_teacher};
use crate::utils::validate::validate_emails;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };

    let name = class_data.name.trim();
    if name.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Please enter a class name"));
    }

    let emails = normalize_candidates(&class_data.student_emails);
    if emails.is_empty() {
        return Ok(bad_request(
            ErrorCode::ClassMemberInvalid,
            "Please add at least one student email",
        ));
    }

    let errors = validate_emails(&emails, &[]);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ClassMemberInvalid,
            errors,
            "Please fix the student email list",
        )));
    }

    let description = class_data
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let storage = service.get_storage(request);
    let class = match storage.create_class(teacher.id, name, description).await {
        Ok(class) => class,
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::ClassCreationFailed,
                "Class creation failed",
                e,
            ));
        }
    };

    // 班级已建好，成员写入失败不回滚
    let (members, message) = match storage.add_class_members(class.id, &emails).await {
        Ok(members) => (members, "Class created successfully"),
        Err(e) => {
            warn!("Class {} created but adding members failed: {}", class.id, e);
            (
                storage.list_class_members(class.id).await.unwrap_or_default(),
                "Class created but failed to add some members",
            )
        }
    };

    info!(
        "Teacher {} created class {} with {} member(s)",
        teacher.email,
        class.id,
        members.len()
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(
        ClassDetailResponse { class, members },
        message,
    )))
}
