//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间统一以 Unix 秒存储。

use chrono::{DateTime, Utc};

pub mod answers;
pub mod class_members;
pub mod classes;
pub mod courses;
pub mod question_tags;
pub mod questions;
pub mod session_participants;
pub mod session_questions;
pub mod session_tags;
pub mod sessions;
pub mod tags;
pub mod teachers;
pub mod users;

/// Unix 秒转 UTC 时间，超出范围时取 epoch
pub(crate) fn from_unix(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
