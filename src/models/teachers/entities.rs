use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
