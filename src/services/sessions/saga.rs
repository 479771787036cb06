//! 会话创建流程
//!
//! 主步骤 `InsertSession` 失败即中止；之后的标签与题目关联是附加步骤，
//! 失败按 [`CompensationPolicy`] 处理，会话本身保留。各步骤之间没有事务。

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::errors::Result;
use crate::models::sessions::{draft::ValidatedDraft, entities::Session};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SagaStep {
    InsertSession,
    AttachTags,
    AttachQuestions,
}

impl fmt::Display for SagaStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SagaStep::InsertSession => write!(f, "insert_session"),
            SagaStep::AttachTags => write!(f, "attach_tags"),
            SagaStep::AttachQuestions => write!(f, "attach_questions"),
        }
    }
}

/// 附加步骤失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompensationPolicy {
    /// 记录 warn 日志并继续，已创建的会话不回滚
    #[default]
    LogAndContinue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub step: SagaStep,
    pub reason: String,
}

impl StepFailure {
    /// 面向客户端的提示
    pub fn user_message(&self) -> String {
        match self.step {
            SagaStep::AttachTags => "Session created but tags could not be attached".to_string(),
            SagaStep::AttachQuestions => {
                "Session created but questions could not be attached".to_string()
            }
            SagaStep::InsertSession => "Session could not be created".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SagaReport {
    pub session: Session,
    pub attached_tags: usize,
    pub attached_questions: usize,
    pub failures: Vec<StepFailure>,
}

impl SagaReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct SessionCreationSaga {
    storage: Arc<dyn Storage>,
    policy: CompensationPolicy,
}

impl SessionCreationSaga {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            policy: CompensationPolicy::default(),
        }
    }

    /// 只有主步骤失败时返回错误
    pub async fn run(&self, teacher_id: i64, draft: &ValidatedDraft) -> Result<SagaReport> {
        let session = self.storage.create_session(teacher_id, draft).await?;

        let mut report = SagaReport {
            session,
            attached_tags: 0,
            attached_questions: 0,
            failures: Vec::new(),
        };
        let session_id = report.session.id;

        if !draft.scope.tag_ids.is_empty() {
            match self
                .storage
                .attach_session_tags(session_id, &draft.scope.tag_ids)
                .await
            {
                Ok(count) => report.attached_tags = count,
                Err(e) => self.compensate(&mut report, SagaStep::AttachTags, e.to_string()),
            }
        }

        if !draft.scope.question_ids.is_empty() {
            match self
                .storage
                .attach_session_questions(session_id, &draft.scope.question_ids)
                .await
            {
                Ok(count) => report.attached_questions = count,
                Err(e) => self.compensate(&mut report, SagaStep::AttachQuestions, e.to_string()),
            }
        }

        Ok(report)
    }

    fn compensate(&self, report: &mut SagaReport, step: SagaStep, reason: String) {
        match self.policy {
            CompensationPolicy::LogAndContinue => {
                warn!(
                    "Session {} step {} failed, keeping session: {}",
                    report.session.id, step, reason
                );
                report.failures.push(StepFailure { step, reason });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let failure = StepFailure {
            step: SagaStep::AttachTags,
            reason: "db down".into(),
        };
        assert_eq!(
            failure.user_message(),
            "Session created but tags could not be attached"
        );
        assert_eq!(SagaStep::AttachQuestions.to_string(), "attach_questions");
        assert_eq!(CompensationPolicy::default(), CompensationPolicy::LogAndContinue);
    }
}
