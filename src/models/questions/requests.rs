use serde::Deserialize;
use ts_rs::TS;

pub const MIN_ANSWERS: usize = 2;
pub const MAX_ANSWERS: usize = 8;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../bindings/question.ts")]
pub struct AnswerInput {
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
}

// 创建题目请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/question.ts")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub content: String,
    pub course_id: Option<i64>,
    pub image_url: Option<String>,
    pub image_filename: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    #[serde(default)]
    pub answers: Vec<AnswerInput>,
}

impl CreateQuestionRequest {
    /// 写库前校验，返回去除空白选项后的答案
    pub fn validate(&self) -> Result<(i64, Vec<AnswerInput>), String> {
        if self.title.trim().is_empty() {
            return Err("Question title is required".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("Question content is required".to_string());
        }
        let course_id = self
            .course_id
            .ok_or_else(|| "Please select a course".to_string())?;

        let answers: Vec<AnswerInput> = self
            .answers
            .iter()
            .filter(|a| !a.content.trim().is_empty())
            .map(|a| AnswerInput {
                content: a.content.trim().to_string(),
                is_correct: a.is_correct,
            })
            .collect();

        if answers.len() < MIN_ANSWERS {
            return Err(format!("At least {MIN_ANSWERS} answers are required"));
        }
        if answers.len() > MAX_ANSWERS {
            return Err(format!("At most {MAX_ANSWERS} answers are allowed"));
        }
        if !answers.iter().any(|a| a.is_correct) {
            return Err("At least one answer must be marked as correct".to_string());
        }

        Ok((course_id, answers))
    }
}

// 题目列表查询
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/question.ts")]
pub struct QuestionListQuery {
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(content: &str, is_correct: bool) -> AnswerInput {
        AnswerInput {
            content: content.to_string(),
            is_correct,
        }
    }

    fn request(answers: Vec<AnswerInput>) -> CreateQuestionRequest {
        CreateQuestionRequest {
            title: "Capital".into(),
            content: "Capital of France?".into(),
            course_id: Some(1),
            image_url: None,
            image_filename: None,
            tag_ids: vec![],
            answers,
        }
    }

    #[test]
    fn test_valid_question() {
        let (course_id, answers) = request(vec![answer("Paris", true), answer("Rome", false)])
            .validate()
            .unwrap();
        assert_eq!(course_id, 1);
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn test_blank_answers_do_not_count() {
        let err = request(vec![answer("Paris", true), answer("   ", false)])
            .validate()
            .unwrap_err();
        assert_eq!(err, "At least 2 answers are required");
    }

    #[test]
    fn test_requires_correct_answer() {
        let err = request(vec![answer("Paris", false), answer("Rome", false)])
            .validate()
            .unwrap_err();
        assert_eq!(err, "At least one answer must be marked as correct");
    }

    #[test]
    fn test_too_many_answers() {
        let answers = (0..9).map(|i| answer(&format!("a{i}"), i == 0)).collect();
        assert!(request(answers).validate().is_err());
    }

    #[test]
    fn test_requires_course() {
        let mut req = request(vec![answer("Paris", true), answer("Rome", false)]);
        req.course_id = None;
        assert_eq!(req.validate().unwrap_err(), "Please select a course");
    }
}
