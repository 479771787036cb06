use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_TAG_COLOR: &str = "#3B82F6";

// 课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/catalog.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

// 标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/catalog.ts")]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}
