use crate::models::catalog::entities::Tag;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/question.ts")]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub course_id: i64,
    pub teacher_id: i64,
    pub image_url: Option<String>,
    pub image_filename: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 答案选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/question.ts")]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub content: String,
    pub is_correct: bool,
    pub order_index: i32,
}

// 题目及其课程、标签
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../bindings/question.ts")]
pub struct QuestionDetail {
    pub question: Question,
    pub course_name: Option<String>,
    pub tags: Vec<Tag>,
}

// 出题用：题目与按 order_index 排好的选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionWithAnswers {
    pub question: Question,
    pub answers: Vec<Answer>,
}
