//! 学生当前作答轮次
//!
//! 一轮对应一道题。提交后揭晓结果，再次提交不改变状态。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::questions::entities::{Answer, Question, QuestionWithAnswers};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRound {
    pub session_id: i64,
    pub question: Question,
    pub answers: Vec<Answer>,
    pub selected_answer_id: Option<i64>,
    pub revealed: bool,
}

/// 提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Graded { correct: bool },
    AlreadyRevealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../bindings/session.ts")]
pub enum OptionHighlight {
    Correct,
    Incorrect,
}

// 选项视图：揭晓前不含正误
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct QuizOptionView {
    pub id: i64,
    pub content: String,
    pub order_index: i32,
    pub is_selected: bool,
    pub highlight: Option<OptionHighlight>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../bindings/session.ts")]
pub struct QuizRoundView {
    pub session_id: i64,
    pub question_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub options: Vec<QuizOptionView>,
    pub selected_answer_id: Option<i64>,
    pub revealed: bool,
    pub is_correct: Option<bool>,
}

impl QuizRound {
    pub fn new(session_id: i64, payload: QuestionWithAnswers) -> Self {
        let mut answers = payload.answers;
        answers.sort_by_key(|a| a.order_index);
        Self {
            session_id,
            question: payload.question,
            answers,
            selected_answer_id: None,
            revealed: false,
        }
    }

    /// 缓存键
    pub fn cache_key(session_id: i64, email: &str) -> String {
        format!("quiz_round:{session_id}:{email}")
    }

    /// 按本轮题目数据判分，不访问存储
    pub fn submit(&mut self, answer_id: i64) -> Result<SubmitOutcome, String> {
        if self.revealed {
            return Ok(SubmitOutcome::AlreadyRevealed);
        }
        let answer = self
            .answers
            .iter()
            .find(|a| a.id == answer_id)
            .ok_or_else(|| "Selected answer does not belong to this question".to_string())?;
        let correct = answer.is_correct;
        self.selected_answer_id = Some(answer_id);
        self.revealed = true;
        Ok(SubmitOutcome::Graded { correct })
    }

    pub fn is_correct(&self) -> Option<bool> {
        if !self.revealed {
            return None;
        }
        let selected = self.selected_answer_id?;
        self.answers
            .iter()
            .find(|a| a.id == selected)
            .map(|a| a.is_correct)
    }

    pub fn view(&self) -> QuizRoundView {
        let options = self
            .answers
            .iter()
            .map(|a| {
                let is_selected = self.selected_answer_id == Some(a.id);
                let highlight = if !self.revealed {
                    None
                } else if a.is_correct {
                    Some(OptionHighlight::Correct)
                } else if is_selected {
                    Some(OptionHighlight::Incorrect)
                } else {
                    None
                };
                QuizOptionView {
                    id: a.id,
                    content: a.content.clone(),
                    order_index: a.order_index,
                    is_selected,
                    highlight,
                }
            })
            .collect();

        QuizRoundView {
            session_id: self.session_id,
            question_id: self.question.id,
            title: self.question.title.clone(),
            content: self.question.content.clone(),
            image_url: self.question.image_url.clone(),
            options,
            selected_answer_id: self.selected_answer_id,
            revealed: self.revealed,
            is_correct: self.is_correct(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> QuestionWithAnswers {
        let answer = |id: i64, order: i32, correct: bool| Answer {
            id,
            question_id: 1,
            content: format!("option {id}"),
            is_correct: correct,
            order_index: order,
        };
        QuestionWithAnswers {
            question: Question {
                id: 1,
                title: "2 + 2".into(),
                content: "What is 2 + 2?".into(),
                course_id: 1,
                teacher_id: 1,
                image_url: None,
                image_filename: None,
                created_at: chrono::Utc::now(),
            },
            answers: vec![
                answer(12, 2, false),
                answer(10, 0, true),
                answer(11, 1, false),
            ],
        }
    }

    #[test]
    fn test_answers_sorted_and_hidden() {
        let round = QuizRound::new(5, payload());
        let view = round.view();
        let ids: Vec<i64> = view.options.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
        assert!(view.options.iter().all(|o| o.highlight.is_none()));
        assert_eq!(view.is_correct, None);
    }

    #[test]
    fn test_wrong_answer_reveals_correct_and_chosen() {
        let mut round = QuizRound::new(5, payload());
        assert_eq!(
            round.submit(11).unwrap(),
            SubmitOutcome::Graded { correct: false }
        );
        let view = round.view();
        assert_eq!(view.options[0].highlight, Some(OptionHighlight::Correct));
        assert_eq!(view.options[1].highlight, Some(OptionHighlight::Incorrect));
        assert_eq!(view.options[2].highlight, None);
        assert_eq!(view.is_correct, Some(false));
    }

    #[test]
    fn test_second_submit_is_noop() {
        let mut round = QuizRound::new(5, payload());
        round.submit(10).unwrap();
        assert_eq!(round.submit(11).unwrap(), SubmitOutcome::AlreadyRevealed);
        assert_eq!(round.selected_answer_id, Some(10));
        assert_eq!(round.is_correct(), Some(true));
    }

    #[test]
    fn test_unknown_answer_rejected() {
        let mut round = QuizRound::new(5, payload());
        assert!(round.submit(99).is_err());
        assert!(!round.revealed);
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(QuizRound::cache_key(3, "a@b.co"), "quiz_round:3:a@b.co");
    }
}
