use super::entities::{Class, ClassMember};
use serde::Serialize;
use ts_rs::TS;

// 班级详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/class.ts")]
pub struct ClassDetailResponse {
    pub class: Class,
    pub members: Vec<ClassMember>,
}

// 带成员数的班级摘要
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../bindings/class.ts")]
pub struct ClassSummary {
    pub class: Class,
    pub member_count: i64,
}

// 学生所在班级
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../bindings/class.ts")]
pub struct EnrolledClass {
    pub class: Class,
    pub teacher_email: Option<String>,
}
