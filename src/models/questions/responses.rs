use serde::Serialize;
use ts_rs::TS;

use super::entities::{Answer, Question};

// 创建题目结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/question.ts")]
pub struct CreateQuestionResponse {
    pub question: Question,
    pub answers: Vec<Answer>,
    pub attached_tags: usize,
    // 标签关联失败时的提示
    pub warnings: Vec<String>,
}
