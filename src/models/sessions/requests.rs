use serde::Deserialize;
use ts_rs::TS;

// 提交答案
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct SubmitAnswerRequest {
    pub answer_id: i64,
}
