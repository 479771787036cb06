//! 教师题库筛选
//!
//! 课程条件与标签条件取交集；多个标签之间取并集。

use super::entities::QuestionDetail;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionFilter {
    pub course_id: Option<i64>,
    pub tag_ids: Vec<i64>,
}

impl QuestionFilter {
    pub fn new(course_id: Option<i64>, tag_ids: Vec<i64>) -> Self {
        Self { course_id, tag_ids }
    }

    pub fn matches(&self, question: &QuestionDetail) -> bool {
        if let Some(course_id) = self.course_id
            && question.question.course_id != course_id
        {
            return false;
        }
        if !self.tag_ids.is_empty()
            && !question.tags.iter().any(|t| self.tag_ids.contains(&t.id))
        {
            return false;
        }
        true
    }

    /// 返回满足条件的题目，原列表不变
    pub fn apply<'a>(&self, questions: &'a [QuestionDetail]) -> Vec<&'a QuestionDetail> {
        questions.iter().filter(|q| self.matches(q)).collect()
    }

    pub fn active_count(&self) -> usize {
        usize::from(self.course_id.is_some()) + self.tag_ids.len()
    }

    pub fn is_active(&self) -> bool {
        self.active_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::entities::Tag;
    use crate::models::questions::entities::Question;

    fn tag(id: i64) -> Tag {
        Tag {
            id,
            name: format!("tag{id}"),
            description: None,
            color: "#3B82F6".into(),
        }
    }

    fn question(id: i64, course_id: i64, tags: &[i64]) -> QuestionDetail {
        QuestionDetail {
            question: Question {
                id,
                title: format!("q{id}"),
                content: String::new(),
                course_id,
                teacher_id: 1,
                image_url: None,
                image_filename: None,
                created_at: chrono::Utc::now(),
            },
            course_name: None,
            tags: tags.iter().map(|t| tag(*t)).collect(),
        }
    }

    fn ids(list: Vec<&QuestionDetail>) -> Vec<i64> {
        list.into_iter().map(|q| q.question.id).collect()
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let questions = vec![question(1, 1, &[]), question(2, 2, &[5])];
        let filter = QuestionFilter::default();
        assert_eq!(ids(filter.apply(&questions)), vec![1, 2]);
        assert!(!filter.is_active());
    }

    #[test]
    fn test_course_and_any_tag() {
        let questions = vec![
            question(1, 1, &[10]),
            question(2, 1, &[11]),
            question(3, 1, &[]),
            question(4, 2, &[10]),
        ];
        let filter = QuestionFilter::new(Some(1), vec![10, 11]);
        assert_eq!(ids(filter.apply(&questions)), vec![1, 2]);
        assert_eq!(filter.active_count(), 3);
        assert_eq!(questions.len(), 4);
    }

    #[test]
    fn test_tag_only() {
        let questions = vec![question(1, 1, &[10]), question(2, 2, &[12])];
        let filter = QuestionFilter::new(None, vec![12]);
        assert_eq!(ids(filter.apply(&questions)), vec![2]);
    }
}
