use serde::Serialize;
use ts_rs::TS;

use crate::models::catalog::entities::{Course, Tag};
use crate::models::classes::responses::{ClassSummary, EnrolledClass};
use crate::models::questions::entities::QuestionDetail;
use crate::models::sessions::responses::SessionOverview;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/dashboard.ts")]
pub struct TeacherDashboardStats {
    pub total_questions: usize,
    pub filtered_questions: usize,
    pub total_classes: usize,
    pub active_sessions: usize,
    pub active_filters: usize,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/dashboard.ts")]
pub struct TeacherDashboardResponse {
    pub sessions: Vec<SessionOverview>,
    pub classes: Vec<ClassSummary>,
    pub courses: Vec<Course>,
    pub tags: Vec<Tag>,
    pub questions: Vec<QuestionDetail>,
    pub stats: TeacherDashboardStats,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/dashboard.ts")]
pub struct StudentDashboardStats {
    pub enrolled_classes: usize,
    pub available_sessions: usize,
    pub joined_sessions: usize,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/dashboard.ts")]
pub struct StudentDashboardResponse {
    pub classes: Vec<EnrolledClass>,
    pub sessions: Vec<SessionOverview>,
    pub stats: StudentDashboardStats,
}
