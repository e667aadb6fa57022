use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum ResponseSource {
    Manual = 1,
    AiAssisted = 2,
    Imported = 3,
}

/// Append-only response log. Records are never updated or deleted; a
/// re-answer appends a new row and the latest `recorded_at` wins, tie-broken
/// by the v7 id's insertion order.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_response")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub session_id: Uuid,
    pub question_id: String,
    pub value: Json,
    pub source: ResponseSource,
    pub recorded_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::session::Entity",
        from = "Column::SessionId",
        to = "crate::session::Column::Id"
    )]
    Session,
}

impl Related<crate::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
