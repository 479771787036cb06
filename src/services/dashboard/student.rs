use std::collections::HashMap;
use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::responses::EnrolledClass,
    dashboard::responses::{StudentDashboardResponse, StudentDashboardStats},
};
use crate::services::sessions::overview::build_overviews;
use crate::services::{backend_error, current_user};
use crate::storage::Storage;

pub async fn student_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load(&storage, &user.email).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard loaded successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to load student dashboard",
            e,
        )),
    }
}

async fn load(storage: &Arc<dyn Storage>, email: &str) -> Result<StudentDashboardResponse> {
    let mut enrolled = storage.list_classes_for_member(email).await?;
    enrolled.sort_by(|a, b| a.name.cmp(&b.name));

    let teacher_ids: Vec<i64> = enrolled.iter().map(|c| c.teacher_id).collect();
    let teacher_emails: HashMap<i64, String> = storage
        .list_teachers_by_ids(&teacher_ids)
        .await?
        .into_iter()
        .map(|t| (t.id, t.email))
        .collect();

    let class_ids: Vec<i64> = enrolled.iter().map(|c| c.id).collect();
    let sessions = storage.list_active_sessions_for_classes(&class_ids).await?;
    let sessions = build_overviews(storage, sessions, Some(email)).await?;

    let classes: Vec<EnrolledClass> = enrolled
        .into_iter()
        .map(|class| EnrolledClass {
            teacher_email: teacher_emails.get(&class.teacher_id).cloned(),
            class,
        })
        .collect();

    let stats = StudentDashboardStats {
        enrolled_classes: classes.len(),
        available_sessions: sessions.iter().filter(|s| !s.is_expired).count(),
        joined_sessions: sessions.iter().filter(|s| s.has_joined).count(),
    };

    Ok(StudentDashboardResponse {
        classes,
        sessions,
        stats,
    })
}
