//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod catalog;
mod classes;
mod questions;
mod sessions;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{QuizRoomError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存库只保留一个常驻连接，否则每个连接各自拥有一份空库。
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| QuizRoomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(if in_memory {
                SqliteJournalMode::Memory
            } else {
                SqliteJournalMode::Wal
            })
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .connect_with(opt)
            .await
            .map_err(|e| QuizRoomError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| QuizRoomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(QuizRoomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::{NewQuestion, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 身份账号
    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        display_name: Option<String>,
    ) -> Result<User> {
        self.create_user_impl(email, password_hash, display_name)
            .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 教师
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_email_impl(email).await
    }

    async fn ensure_teacher(&self, email: &str) -> Result<Teacher> {
        self.ensure_teacher_impl(email).await
    }

    async fn list_teachers_by_ids(&self, ids: &[i64]) -> Result<Vec<Teacher>> {
        self.list_teachers_by_ids_impl(ids).await
    }

    // 班级
    async fn create_class(
        &self,
        teacher_id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Class> {
        self.create_class_impl(teacher_id, name, description).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn list_classes_by_ids(&self, ids: &[i64]) -> Result<Vec<Class>> {
        self.list_classes_by_ids_impl(ids).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn list_class_summaries_by_teacher(&self, teacher_id: i64) -> Result<Vec<ClassSummary>> {
        self.list_class_summaries_by_teacher_impl(teacher_id).await
    }

    async fn list_classes_for_member(&self, email: &str) -> Result<Vec<Class>> {
        self.list_classes_for_member_impl(email).await
    }

    // 班级成员
    async fn add_class_members(
        &self,
        class_id: i64,
        emails: &[String],
    ) -> Result<Vec<ClassMember>> {
        self.add_class_members_impl(class_id, emails).await
    }

    async fn list_class_members(&self, class_id: i64) -> Result<Vec<ClassMember>> {
        self.list_class_members_impl(class_id).await
    }

    async fn remove_class_member(&self, class_id: i64, member_id: i64) -> Result<bool> {
        self.remove_class_member_impl(class_id, member_id).await
    }

    // 课程与标签
    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn get_course_by_name(&self, name: &str) -> Result<Option<Course>> {
        self.get_course_by_name_impl(name).await
    }

    async fn create_course(&self, name: &str, description: Option<String>) -> Result<Course> {
        self.create_course_impl(name, description).await
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.list_tags_impl().await
    }

    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.get_tag_by_name_impl(name).await
    }

    async fn create_tag(
        &self,
        name: &str,
        description: Option<String>,
        color: &str,
    ) -> Result<Tag> {
        self.create_tag_impl(name, description, color).await
    }

    // 题目
    async fn create_question(&self, question: NewQuestion) -> Result<Question> {
        self.create_question_impl(question).await
    }

    async fn attach_question_tags(&self, question_id: i64, tag_ids: &[i64]) -> Result<usize> {
        self.attach_question_tags_impl(question_id, tag_ids).await
    }

    async fn create_answers(
        &self,
        question_id: i64,
        answers: &[AnswerInput],
    ) -> Result<Vec<Answer>> {
        self.create_answers_impl(question_id, answers).await
    }

    async fn list_question_details_by_teacher(
        &self,
        teacher_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<QuestionDetail>> {
        self.list_question_details_by_teacher_impl(teacher_id, search)
            .await
    }

    async fn list_questions_by_ids(&self, ids: &[i64]) -> Result<Vec<Question>> {
        self.list_questions_by_ids_impl(ids).await
    }

    async fn get_question_with_answers(
        &self,
        question_id: i64,
    ) -> Result<Option<QuestionWithAnswers>> {
        self.get_question_with_answers_impl(question_id).await
    }

    // 测验会话
    async fn create_session(&self, teacher_id: i64, draft: &ValidatedDraft) -> Result<Session> {
        self.create_session_impl(teacher_id, draft).await
    }

    async fn attach_session_tags(&self, session_id: i64, tag_ids: &[i64]) -> Result<usize> {
        self.attach_session_tags_impl(session_id, tag_ids).await
    }

    async fn attach_session_questions(
        &self,
        session_id: i64,
        question_ids: &[i64],
    ) -> Result<usize> {
        self.attach_session_questions_impl(session_id, question_ids)
            .await
    }

    async fn get_session_by_id(&self, session_id: i64) -> Result<Option<Session>> {
        self.get_session_by_id_impl(session_id).await
    }

    async fn delete_session(&self, session_id: i64) -> Result<bool> {
        self.delete_session_impl(session_id).await
    }

    async fn get_session_scope(&self, session: &Session) -> Result<EligibilityScope> {
        self.get_session_scope_impl(session).await
    }

    async fn list_eligible_question_ids(&self, scope: &EligibilityScope) -> Result<Vec<i64>> {
        self.list_eligible_question_ids_impl(scope).await
    }

    async fn list_sessions_by_teacher(&self, teacher_id: i64) -> Result<Vec<Session>> {
        self.list_sessions_by_teacher_impl(teacher_id).await
    }

    async fn list_active_sessions_for_classes(&self, class_ids: &[i64]) -> Result<Vec<Session>> {
        self.list_active_sessions_for_classes_impl(class_ids).await
    }

    async fn list_session_tags(&self, session_ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>> {
        self.list_session_tags_impl(session_ids).await
    }

    // 会话参与
    async fn add_participant(&self, session_id: i64, email: &str) -> Result<SessionParticipant> {
        self.add_participant_impl(session_id, email).await
    }

    async fn count_participants(&self, session_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        self.count_participants_impl(session_ids).await
    }

    async fn list_joined_session_ids(&self, email: &str, session_ids: &[i64]) -> Result<Vec<i64>> {
        self.list_joined_session_ids_impl(email, session_ids).await
    }
}
