use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测验会话
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub class_id: i64,
    pub course_id: Option<i64>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// 过期只按时间戳判断，不修改 is_active
    pub fn is_expired_at(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now())
    }
}

// 会话参与记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct SessionParticipant {
    pub id: i64,
    pub session_id: i64,
    pub user_email: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
