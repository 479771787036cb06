use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::class_members::{
    ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as ClassMembers,
};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{QuizRoomError, Result};
use crate::models::classes::{
    entities::{Class, ClassMember},
    requests::UpdateClassRequest,
    responses::ClassSummary,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(
        &self,
        teacher_id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Class> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            teacher_id: Set(teacher_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 批量获取班级
    pub async fn list_classes_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Class>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = Classes::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_class()).collect())
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(description) = update.description {
            // 空白描述视为清空
            let trimmed = description.trim();
            model.description = Set((!trimmed.is_empty()).then(|| trimmed.to_string()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级（成员与会话级联删除）
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 列出教师的班级及成员数量
    pub async fn list_class_summaries_by_teacher_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<ClassSummary>> {
        let classes = Classes::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询班级列表失败: {e}")))?;

        if classes.is_empty() {
            return Ok(Vec::new());
        }

        let class_ids: Vec<i64> = classes.iter().map(|c| c.id).collect();

        // 批量查询成员所属班级，避免逐个计数
        let member_class_ids: Vec<i64> = ClassMembers::find()
            .select_only()
            .column(MemberColumn::ClassId)
            .filter(MemberColumn::ClassId.is_in(class_ids))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询班级成员失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for class_id in member_class_ids {
            *counts.entry(class_id).or_insert(0) += 1;
        }

        Ok(classes
            .into_iter()
            .map(|m| {
                let member_count = counts.get(&m.id).copied().unwrap_or(0);
                ClassSummary {
                    class: m.into_class(),
                    member_count,
                }
            })
            .collect())
    }

    /// 列出邮箱所在的班级（按名称排序）
    pub async fn list_classes_for_member_impl(&self, email: &str) -> Result<Vec<Class>> {
        let class_ids: Vec<i64> = ClassMembers::find()
            .select_only()
            .column(MemberColumn::ClassId)
            .filter(MemberColumn::UserEmail.eq(email))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询所在班级失败: {e}")))?;

        let mut unique_ids = class_ids;
        unique_ids.sort_unstable();
        unique_ids.dedup();

        self.list_classes_by_ids_impl(&unique_ids).await
    }

    /// 批量添加班级成员
    pub async fn add_class_members_impl(
        &self,
        class_id: i64,
        emails: &[String],
    ) -> Result<Vec<ClassMember>> {
        let now = chrono::Utc::now().timestamp();
        let mut members = Vec::with_capacity(emails.len());

        for email in emails {
            let model = MemberActiveModel {
                class_id: Set(class_id),
                user_email: Set(email.clone()),
                joined_at: Set(now),
                ..Default::default()
            };

            let result = model
                .insert(&self.db)
                .await
                .map_err(|e| QuizRoomError::database_operation(format!("添加班级成员失败: {e}")))?;

            members.push(result.into_class_member());
        }

        Ok(members)
    }

    /// 列出班级成员
    pub async fn list_class_members_impl(&self, class_id: i64) -> Result<Vec<ClassMember>> {
        let results = ClassMembers::find()
            .filter(MemberColumn::ClassId.eq(class_id))
            .order_by_asc(MemberColumn::UserEmail)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询班级成员失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_class_member()).collect())
    }

    /// 移除班级成员
    pub async fn remove_class_member_impl(&self, class_id: i64, member_id: i64) -> Result<bool> {
        let result = ClassMembers::delete_many()
            .filter(MemberColumn::Id.eq(member_id))
            .filter(MemberColumn::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("移除班级成员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
