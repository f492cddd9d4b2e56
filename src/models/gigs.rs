use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::PublicUser;

/// Gig lifecycle status stored as a lowercase string in the database.
///
/// The only transition is `Open -> Assigned`, performed by the hire
/// transaction. There is no way back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "assigned")]
    Assigned,
}

/// SeaORM entity for the `gigs` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gigs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    pub owner_id: Uuid,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGig {
    pub title: String,
    pub description: String,
    pub budget: f64,
}

/// Query params for GET /api/gigs.
#[derive(Debug, Clone, Deserialize)]
pub struct GigListQuery {
    pub search: Option<String>,
}

/// A gig joined with its owner's public identity for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct GigWithOwner {
    #[serde(flatten)]
    pub gig: Model,
    pub owner: Option<PublicUser>,
}

impl From<(Model, Option<super::users::Model>)> for GigWithOwner {
    fn from((gig, owner): (Model, Option<super::users::Model>)) -> Self {
        Self {
            gig,
            owner: owner.map(PublicUser::from),
        }
    }
}
