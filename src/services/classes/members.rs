use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, load_owned_class, normalize_candidates};
use crate::models::{ApiResponse, ErrorCode, classes::requests::AddMembersRequest};
use crate::services::{backend_error, bad_request, current_teacher, not_found_or_denied};
use crate::utils::validate::validate_emails;

/// 添加成员，已在班级中的邮箱视为错误
pub async fn add_members(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    members: AddMembersRequest,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_class(&storage, class_id, teacher.id).await {
        return Ok(resp);
    }

    let emails = normalize_candidates(&members.emails);
    if emails.is_empty() {
        return Ok(bad_request(
            ErrorCode::ClassMemberInvalid,
            "Please enter at least one email",
        ));
    }

    let existing: Vec<String> = match storage.list_class_members(class_id).await {
        Ok(current) => current.into_iter().map(|m| m.user_email).collect(),
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::InternalServerError,
                "Failed to load class members",
                e,
            ));
        }
    };

    let errors = validate_emails(&emails, &existing);
    if !errors.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ClassMemberInvalid,
            errors,
            "Please fix the email list",
        )));
    }

    match storage.add_class_members(class_id, &emails).await {
        Ok(added) => Ok(HttpResponse::Created().json(ApiResponse::success(
            added,
            "Members added successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::ClassMemberInvalid,
            "Failed to add class members",
            e,
        )),
    }
}

pub async fn remove_member(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    member_id: i64,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_owned_class(&storage, class_id, teacher.id).await {
        return Ok(resp);
    }

    match storage.remove_class_member(class_id, member_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Member removed"))),
        Ok(false) => Ok(not_found_or_denied(
            ErrorCode::ClassMemberNotFound,
            "Member",
        )),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to remove class member",
            e,
        )),
    }
}
