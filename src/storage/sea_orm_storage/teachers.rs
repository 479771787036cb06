use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{QuizRoomError, Result};
use crate::models::teachers::entities::Teacher;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按邮箱查询教师
    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 确保教师记录存在（已存在则原样返回）
    pub async fn ensure_teacher_impl(&self, email: &str) -> Result<Teacher> {
        if let Some(teacher) = self.get_teacher_by_email_impl(email).await? {
            return Ok(teacher);
        }

        let model = ActiveModel {
            email: Set(email.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 批量查询教师
    pub async fn list_teachers_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Teacher>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = Teachers::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_teacher()).collect())
    }
}
