use serde::Serialize;
use ts_rs::TS;

use super::entities::Session;
use super::remaining::TimeRemaining;
use super::round::QuizRoundView;
use crate::models::catalog::entities::Tag;
use crate::models::questions::entities::Question;

// 会话概要（仪表盘与详情共用）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct SessionOverview {
    pub session: Session,
    pub class_name: Option<String>,
    pub course_name: Option<String>,
    pub teacher_email: Option<String>,
    pub tags: Vec<Tag>,
    pub participant_count: i64,
    pub has_joined: bool,
    pub is_expired: bool,
    pub time_remaining: TimeRemaining,
    pub time_remaining_label: String,
}

// 会话详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub overview: SessionOverview,
    pub questions: Vec<Question>,
}

// 创建会话结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct CreateSessionResponse {
    pub session: Session,
    pub attached_tags: usize,
    pub attached_questions: usize,
    // 未完成的附加步骤
    pub warnings: Vec<String>,
}

// 出题结果：无可用题目时不是错误
#[derive(Debug, Serialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "../bindings/session.ts")]
pub enum QuestionServeResponse {
    Question { round: QuizRoundView },
    NoQuestionsAvailable { message: String },
}
