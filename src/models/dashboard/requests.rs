use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::parse_id_list;
use crate::models::questions::filter::QuestionFilter;

// 教师仪表盘查询：tag_ids 为逗号分隔
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../bindings/dashboard.ts")]
pub struct TeacherDashboardQuery {
    pub course_id: Option<i64>,
    pub tag_ids: Option<String>,
}

impl TeacherDashboardQuery {
    pub fn to_filter(&self) -> QuestionFilter {
        QuestionFilter::new(self.course_id, parse_id_list(self.tag_ids.as_deref()))
    }
}
