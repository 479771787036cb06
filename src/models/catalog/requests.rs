use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/catalog.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/catalog.ts")]
pub struct CreateTagRequest {
    pub name: String,
    pub description: Option<String>,
    // 缺省为 DEFAULT_TAG_COLOR
    pub color: Option<String>,
}
