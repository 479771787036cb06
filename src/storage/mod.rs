use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    catalog::entities::{Course, Tag},
    classes::{
        entities::{Class, ClassMember},
        requests::UpdateClassRequest,
        responses::ClassSummary,
    },
    questions::{
        entities::{Answer, Question, QuestionDetail, QuestionWithAnswers},
        requests::AnswerInput,
    },
    sessions::{
        draft::{EligibilityScope, ValidatedDraft},
        entities::{Session, SessionParticipant},
    },
    teachers::entities::Teacher,
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 新建题目所需字段
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub teacher_id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub image_filename: Option<String>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 身份账号
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        display_name: Option<String>,
    ) -> Result<User>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 教师
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;
    // 不存在则创建
    async fn ensure_teacher(&self, email: &str) -> Result<Teacher>;
    async fn list_teachers_by_ids(&self, ids: &[i64]) -> Result<Vec<Teacher>>;

    /// 班级
    async fn create_class(
        &self,
        teacher_id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn list_classes_by_ids(&self, ids: &[i64]) -> Result<Vec<Class>>;
    async fn update_class(&self, class_id: i64, update: UpdateClassRequest)
    -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 教师的班级及成员数，按名称排序
    async fn list_class_summaries_by_teacher(&self, teacher_id: i64) -> Result<Vec<ClassSummary>>;
    // 学生所在班级
    async fn list_classes_for_member(&self, email: &str) -> Result<Vec<Class>>;

    /// 班级成员
    async fn add_class_members(&self, class_id: i64, emails: &[String])
    -> Result<Vec<ClassMember>>;
    async fn list_class_members(&self, class_id: i64) -> Result<Vec<ClassMember>>;
    async fn remove_class_member(&self, class_id: i64, member_id: i64) -> Result<bool>;

    /// 课程与标签
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn get_course_by_name(&self, name: &str) -> Result<Option<Course>>;
    async fn create_course(&self, name: &str, description: Option<String>) -> Result<Course>;
    async fn list_tags(&self) -> Result<Vec<Tag>>;
    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;
    async fn create_tag(&self, name: &str, description: Option<String>, color: &str)
    -> Result<Tag>;

    /// 题目
    async fn create_question(&self, question: NewQuestion) -> Result<Question>;
    async fn attach_question_tags(&self, question_id: i64, tag_ids: &[i64]) -> Result<usize>;
    async fn create_answers(&self, question_id: i64, answers: &[AnswerInput])
    -> Result<Vec<Answer>>;
    // 教师的题目及课程、标签，按创建时间倒序
    async fn list_question_details_by_teacher(
        &self,
        teacher_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<QuestionDetail>>;
    async fn list_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<Question>>;
    async fn get_question_with_answers(
        &self,
        question_id: i64,
    ) -> Result<Option<QuestionWithAnswers>>;

    /// 测验会话
    async fn create_session(&self, teacher_id: i64, draft: &ValidatedDraft) -> Result<Session>;
    async fn attach_session_tags(&self, session_id: i64, tag_ids: &[i64]) -> Result<usize>;
    async fn attach_session_questions(&self, session_id: i64, question_ids: &[i64])
    -> Result<usize>;
    async fn get_session_by_id(&self, session_id: i64) -> Result<Option<Session>>;
    async fn delete_session(&self, session_id: i64) -> Result<bool>;
    async fn get_session_scope(&self, session: &Session) -> Result<EligibilityScope>;
    // 按范围求可出的题目 ID
    async fn list_eligible_question_ids(&self, scope: &EligibilityScope) -> Result<Vec<i64>>;
    async fn list_sessions_by_teacher(&self, teacher_id: i64) -> Result<Vec<Session>>;
    async fn list_active_sessions_for_classes(&self, class_ids: &[i64]) -> Result<Vec<Session>>;
    async fn list_session_tags(&self, session_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>>;

    /// 会话参与
    async fn add_participant(&self, session_id: i64, email: &str) -> Result<SessionParticipant>;
    async fn count_participants(&self, session_ids: &[i64]) -> Result<HashMap<i64, i64>>;
    async fn list_joined_session_ids(&self, email: &str, session_ids: &[i64]) -> Result<Vec<i64>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
