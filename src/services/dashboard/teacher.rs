use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    dashboard::{
        requests::TeacherDashboardQuery,
        responses::{TeacherDashboardResponse, TeacherDashboardStats},
    },
    teachers::entities::Teacher,
};
use crate::services::sessions::overview::build_overviews;
use crate::services::{backend_error, current_teacher};
use crate::storage::Storage;

pub async fn teacher_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
    query: TeacherDashboardQuery,
) -> ActixResult<HttpResponse> {
    let teacher = match current_teacher(request) {
        Ok(teacher) => teacher,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load(&storage, &teacher, &query).await {
        Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            dashboard,
            "Dashboard loaded successfully",
        ))),
        Err(e) => Ok(backend_error(
            ErrorCode::InternalServerError,
            "Failed to load teacher dashboard",
            e,
        )),
    }
}

async fn load(
    storage: &Arc<dyn Storage>,
    teacher: &Teacher,
    query: &TeacherDashboardQuery,
) -> Result<TeacherDashboardResponse> {
    let sessions = storage.list_sessions_by_teacher(teacher.id).await?;
    let sessions = build_overviews(storage, sessions, None).await?;
    let classes = storage.list_class_summaries_by_teacher(teacher.id).await?;
    let courses = storage.list_courses().await?;
    let tags = storage.list_tags().await?;
    let all_questions = storage
        .list_question_details_by_teacher(teacher.id, None)
        .await?;

    let filter = query.to_filter();
    let questions: Vec<_> = filter.apply(&all_questions).into_iter().cloned().collect();

    let stats = TeacherDashboardStats {
        total_questions: all_questions.len(),
        filtered_questions: questions.len(),
        total_classes: classes.len(),
        active_sessions: sessions
            .iter()
            .filter(|s| s.session.is_active && !s.is_expired)
            .count(),
        active_filters: filter.active_count(),
    };

    Ok(TeacherDashboardResponse {
        sessions,
        classes,
        courses,
        tags,
        questions,
        stats,
    })
}
