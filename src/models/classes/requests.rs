use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub student_emails: Vec<String>,
}

// 更新班级请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// 添加成员请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/class.ts")]
pub struct AddMembersRequest {
    pub emails: Vec<String>,
}
