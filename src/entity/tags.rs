//! 标签实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::question_tags::Entity")]
    QuestionTags,
    #[sea_orm(has_many = "super::session_tags::Entity")]
    SessionTags,
}

impl Related<super::question_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionTags.def()
    }
}

impl Related<super::session_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_tag(self) -> crate::models::catalog::entities::Tag {
        crate::models::catalog::entities::Tag {
            id: self.id,
            name: self.name,
            description: self.description,
            color: self.color,
        }
    }
}
