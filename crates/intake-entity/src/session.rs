use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "Integer")]
pub enum SessionStatus {
    Draft = 1,
    InProgress = 2,
    Completed = 3,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessment_session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub catalog_id: String,
    pub status: SessionStatus,
    pub current_module: Option<String>,
    pub questions_asked: i32,
    pub questions_answered: i32,
    pub started_at: NaiveDateTime,
    pub last_saved_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::client::Entity",
        from = "Column::ClientId",
        to = "crate::client::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "crate::response::Entity")]
    Response,
}

impl Related<crate::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<crate::response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Response.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
