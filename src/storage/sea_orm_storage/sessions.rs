use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::question_tags::{Column as QuestionTagColumn, Entity as QuestionTags};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::session_participants::{
    ActiveModel as ParticipantActiveModel, Column as ParticipantColumn,
    Entity as SessionParticipants,
};
use crate::entity::session_questions::{
    ActiveModel as SessionQuestionActiveModel, Column as SessionQuestionColumn,
    Entity as SessionQuestions,
};
use crate::entity::session_tags::{
    ActiveModel as SessionTagActiveModel, Column as SessionTagColumn, Entity as SessionTags,
};
use crate::entity::sessions::{ActiveModel, Column, Entity as Sessions};
use crate::entity::tags::{Column as TagColumn, Entity as Tags};
use crate::errors::{QuizRoomError, Result};
use crate::models::catalog::entities::Tag;
use crate::models::sessions::{
    draft::{EligibilityScope, ValidatedDraft},
    entities::{Session, SessionParticipant},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建会话（只写主表，标签与题目由调用方单独关联）
    pub async fn create_session_impl(
        &self,
        teacher_id: i64,
        draft: &ValidatedDraft,
    ) -> Result<Session> {
        let model = ActiveModel {
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            teacher_id: Set(teacher_id),
            class_id: Set(draft.class_id),
            course_id: Set(draft.scope.course_id),
            expires_at: Set(draft.expires_at.map(|t| t.timestamp())),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建会话失败: {e}")))?;

        Ok(result.into_session())
    }

    /// 关联会话标签
    pub async fn attach_session_tags_impl(&self, session_id: i64, tag_ids: &[i64]) -> Result<usize> {
        let mut attached = 0;

        for tag_id in tag_ids {
            SessionTagActiveModel {
                session_id: Set(session_id),
                tag_id: Set(*tag_id),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("关联会话标签失败: {e}")))?;
            attached += 1;
        }

        Ok(attached)
    }

    /// 关联显式题目，order_index 即传入顺序
    pub async fn attach_session_questions_impl(
        &self,
        session_id: i64,
        question_ids: &[i64],
    ) -> Result<usize> {
        let mut attached = 0;

        for (index, question_id) in question_ids.iter().enumerate() {
            SessionQuestionActiveModel {
                session_id: Set(session_id),
                question_id: Set(*question_id),
                order_index: Set(index as i32),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("关联会话题目失败: {e}")))?;
            attached += 1;
        }

        Ok(attached)
    }

    /// 通过 ID 获取会话
    pub async fn get_session_by_id_impl(&self, session_id: i64) -> Result<Option<Session>> {
        let result = Sessions::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询会话失败: {e}")))?;

        Ok(result.map(|m| m.into_session()))
    }

    /// 删除会话（关联表级联删除）
    pub async fn delete_session_impl(&self, session_id: i64) -> Result<bool> {
        let result = Sessions::delete_by_id(session_id)
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("删除会话失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 读取会话的题目范围
    pub async fn get_session_scope_impl(&self, session: &Session) -> Result<EligibilityScope> {
        let tag_ids: Vec<i64> = SessionTags::find()
            .select_only()
            .column(SessionTagColumn::TagId)
            .filter(SessionTagColumn::SessionId.eq(session.id))
            .order_by_asc(SessionTagColumn::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询会话标签失败: {e}")))?;

        let question_ids: Vec<i64> = SessionQuestions::find()
            .select_only()
            .column(SessionQuestionColumn::QuestionId)
            .filter(SessionQuestionColumn::SessionId.eq(session.id))
            .order_by_asc(SessionQuestionColumn::OrderIndex)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询会话题目失败: {e}")))?;

        Ok(EligibilityScope {
            course_id: session.course_id,
            tag_ids,
            question_ids,
        })
    }

    /// 计算范围内可出的题目
    ///
    /// 显式列表优先；否则按课程过滤，再与任一会话标签下的题目取交集。
    pub async fn list_eligible_question_ids_impl(&self, scope: &EligibilityScope) -> Result<Vec<i64>> {
        if scope.is_empty() {
            return Ok(Vec::new());
        }

        if scope.is_explicit() {
            // 已删除的题目不再出现
            let existing = self.list_questions_by_ids_impl(&scope.question_ids).await?;
            return Ok(existing.into_iter().map(|q| q.id).collect());
        }

        let mut select = Questions::find().select_only().column(QuestionColumn::Id);

        if let Some(course_id) = scope.course_id {
            select = select.filter(QuestionColumn::CourseId.eq(course_id));
        }

        if !scope.tag_ids.is_empty() {
            let mut tagged: Vec<i64> = QuestionTags::find()
                .select_only()
                .column(QuestionTagColumn::QuestionId)
                .filter(QuestionTagColumn::TagId.is_in(scope.tag_ids.clone()))
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    QuizRoomError::database_operation(format!("查询标签题目失败: {e}"))
                })?;

            if tagged.is_empty() {
                return Ok(Vec::new());
            }
            tagged.sort_unstable();
            tagged.dedup();
            select = select.filter(QuestionColumn::Id.is_in(tagged));
        }

        select
            .order_by_asc(QuestionColumn::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询候选题目失败: {e}")))
    }

    /// 列出教师的会话（最新在前）
    pub async fn list_sessions_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<Session>> {
        let results = Sessions::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询会话列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_session()).collect())
    }

    /// 列出若干班级下处于激活状态的会话（最新在前）
    pub async fn list_active_sessions_for_classes_impl(
        &self,
        class_ids: &[i64],
    ) -> Result<Vec<Session>> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = Sessions::find()
            .filter(Column::ClassId.is_in(class_ids.to_vec()))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询会话列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_session()).collect())
    }

    /// 批量加载会话标签
    pub async fn list_session_tags_impl(
        &self,
        session_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Tag>>> {
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = SessionTags::find()
            .filter(SessionTagColumn::SessionId.is_in(session_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询会话标签失败: {e}")))?;

        if links.is_empty() {
            return Ok(HashMap::new());
        }

        let mut tag_ids: Vec<i64> = links.iter().map(|l| l.tag_id).collect();
        tag_ids.sort_unstable();
        tag_ids.dedup();

        let tags = Tags::find()
            .filter(TagColumn::Id.is_in(tag_ids))
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询标签失败: {e}")))?;
        let tags_by_id: HashMap<i64, Tag> = tags.into_iter().map(|m| (m.id, m.into_tag())).collect();

        let mut result: HashMap<i64, Vec<Tag>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags_by_id.get(&link.tag_id) {
                result
                    .entry(link.session_id)
                    .or_insert_with(Vec::new)
                    .push(tag.clone());
            }
        }

        Ok(result)
    }

    /// 记录参与，不检查是否已加入
    pub async fn add_participant_impl(
        &self,
        session_id: i64,
        email: &str,
    ) -> Result<SessionParticipant> {
        let result = ParticipantActiveModel {
            session_id: Set(session_id),
            user_email: Set(email.to_string()),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| QuizRoomError::database_operation(format!("加入会话失败: {e}")))?;

        Ok(result.into_participant())
    }

    /// 统计参与记录数（重复加入按多条计）
    pub async fn count_participants_impl(&self, session_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<i64> = SessionParticipants::find()
            .select_only()
            .column(ParticipantColumn::SessionId)
            .filter(ParticipantColumn::SessionId.is_in(session_ids.to_vec()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("统计参与人数失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for session_id in rows {
            *counts.entry(session_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// 返回邮箱已加入的会话 ID
    pub async fn list_joined_session_ids_impl(
        &self,
        email: &str,
        session_ids: &[i64],
    ) -> Result<Vec<i64>> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut joined: Vec<i64> = SessionParticipants::find()
            .select_only()
            .column(ParticipantColumn::SessionId)
            .filter(ParticipantColumn::UserEmail.eq(email))
            .filter(ParticipantColumn::SessionId.is_in(session_ids.to_vec()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询参与记录失败: {e}")))?;

        joined.sort_unstable();
        joined.dedup();
        Ok(joined)
    }
}
