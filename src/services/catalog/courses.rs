use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CatalogService, optional_text};
use crate::models::{ApiResponse, ErrorCode, catalog::requests::CreateCourseRequest};
use crate::services::{backend_error, bad_request};

pub async fn list_courses(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_courses().await {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            courses,
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to list courses",
            e,
        )),
    }
}

pub async fn create_course(
    service: &CatalogService,
    request: &HttpRequest,
    course: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let name = course.name.trim();
    if name.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Course name is required"));
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_name(name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::CourseAlreadyExists,
                "A course with this name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(backend_error(
                ErrorCode::CatalogCreationFailed,
                "Course lookup failed",
                e,
            ));
        }
    }

    match storage
        .create_course(name, optional_text(course.description))
        .await
    {
        Ok(course) => Ok(HttpResponse::Created().json(ApiResponse::success(
            course,
            "Course created successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::CatalogCreationFailed,
            "Course creation failed",
            e,
        )),
    }
}
