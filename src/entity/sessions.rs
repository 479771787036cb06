//! 测验会话实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub class_id: i64,
    pub course_id: Option<i64>,
    pub expires_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::session_tags::Entity")]
    SessionTags,
    #[sea_orm(has_many = "super::session_questions::Entity")]
    SessionQuestions,
    #[sea_orm(has_many = "super::session_participants::Entity")]
    SessionParticipants,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::session_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionTags.def()
    }
}

impl Related<super::session_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionQuestions.def()
    }
}

impl Related<super::session_participants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionParticipants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_session(self) -> crate::models::sessions::entities::Session {
        use crate::models::sessions::entities::Session;

        Session {
            id: self.id,
            name: self.name,
            description: self.description,
            teacher_id: self.teacher_id,
            class_id: self.class_id,
            course_id: self.course_id,
            expires_at: self
                .expires_at
                .map(super::from_unix),
            is_active: self.is_active,
            created_at: super::from_unix(self.created_at),
        }
    }
}
