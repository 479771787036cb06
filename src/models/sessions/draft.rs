//! 会话草稿及其校验

use serde::Deserialize;
use ts_rs::TS;

/// 创建会话请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct SessionDraft {
    pub name: String,
    pub description: Option<String>,
    pub class_id: Option<i64>,
    pub course_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    #[serde(default)]
    pub question_ids: Vec<i64>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 题目范围：创建后不再变化
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilityScope {
    pub course_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub question_ids: Vec<i64>,
}

impl EligibilityScope {
    pub fn is_empty(&self) -> bool {
        self.course_id.is_none() && self.tag_ids.is_empty() && self.question_ids.is_empty()
    }

    /// 是否使用显式题目列表
    pub fn is_explicit(&self) -> bool {
        !self.question_ids.is_empty()
    }
}

/// 通过校验的草稿
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub name: String,
    pub description: Option<String>,
    pub class_id: i64,
    pub scope: EligibilityScope,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SessionDraft {
    /// 写库前校验
    pub fn validate(&self) -> Result<ValidatedDraft, String> {
        let name = self.name.trim();
        let class_id = match self.class_id {
            Some(id) if !name.is_empty() => id,
            _ => return Err("Please provide a session name and select a class".to_string()),
        };

        let scope = EligibilityScope {
            course_id: self.course_id,
            tag_ids: dedup(&self.tag_ids),
            question_ids: dedup(&self.question_ids),
        };
        if scope.is_empty() {
            return Err(
                "Please select either a course, at least one tag, or specific questions"
                    .to_string(),
            );
        }

        Ok(ValidatedDraft {
            name: name.to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            class_id,
            scope,
            expires_at: self.expires_at,
        })
    }
}

// 去重并保持顺序
fn dedup(ids: &[i64]) -> Vec<i64> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SessionDraft {
        SessionDraft {
            name: "Week 1".into(),
            description: Some("  ".into()),
            class_id: Some(3),
            course_id: None,
            tag_ids: vec![],
            question_ids: vec![],
            expires_at: None,
        }
    }

    #[test]
    fn test_requires_scope() {
        let err = draft().validate().unwrap_err();
        assert_eq!(
            err,
            "Please select either a course, at least one tag, or specific questions"
        );
    }

    #[test]
    fn test_requires_name_and_class() {
        let mut d = draft();
        d.course_id = Some(1);
        d.name = "  ".into();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.course_id = Some(1);
        d.class_id = None;
        assert_eq!(
            d.validate().unwrap_err(),
            "Please provide a session name and select a class"
        );
    }

    #[test]
    fn test_valid_with_tags() {
        let mut d = draft();
        d.tag_ids = vec![4, 5, 4];
        let v = d.validate().unwrap();
        assert_eq!(v.scope.tag_ids, vec![4, 5]);
        assert_eq!(v.description, None);
        assert!(!v.scope.is_explicit());
    }

    #[test]
    fn test_explicit_questions_keep_order() {
        let mut d = draft();
        d.question_ids = vec![9, 2, 9, 7];
        let v = d.validate().unwrap();
        assert_eq!(v.scope.question_ids, vec![9, 2, 7]);
        assert!(v.scope.is_explicit());
    }
}
