use super::SeaOrmStorage;
use crate::entity::courses::{
    ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as Courses,
};
use crate::entity::tags::{ActiveModel as TagActiveModel, Column as TagColumn, Entity as Tags};
use crate::errors::{QuizRoomError, Result};
use crate::models::catalog::entities::{Course, Tag};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出全部课程（按名称排序）
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let results = Courses::find()
            .order_by_asc(CourseColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_course()).collect())
    }

    pub async fn get_course_by_name_impl(&self, name: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(CourseColumn::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    pub async fn create_course_impl(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<Course> {
        let model = CourseActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 列出全部标签（按名称排序）
    pub async fn list_tags_impl(&self) -> Result<Vec<Tag>> {
        let results = Tags::find()
            .order_by_asc(TagColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询标签列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_tag()).collect())
    }

    pub async fn get_tag_by_name_impl(&self, name: &str) -> Result<Option<Tag>> {
        let result = Tags::find()
            .filter(TagColumn::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("查询标签失败: {e}")))?;

        Ok(result.map(|m| m.into_tag()))
    }

    pub async fn create_tag_impl(
        &self,
        name: &str,
        description: Option<String>,
        color: &str,
    ) -> Result<Tag> {
        let model = TagActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            color: Set(color.to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| QuizRoomError::database_operation(format!("创建标签失败: {e}")))?;

        Ok(result.into_tag())
    }
}
