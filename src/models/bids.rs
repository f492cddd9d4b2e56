use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::users::PublicUser;

/// Bid lifecycle status stored as a lowercase string in the database.
///
/// A bid starts `Pending` and ends either `Hired` (at most one per gig,
/// set by the hire transaction) or `Rejected`. Both are terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "hired")]
    Hired,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `bids` table.
///
/// A unique index on (gig_id, freelancer_id) enforces one bid per
/// freelancer per gig at the store level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gig_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub status: Status,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gigs::Entity",
        from = "Column::GigId",
        to = "super::gigs::Column::Id"
    )]
    Gig,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/bids.
/// `freelancer_id` comes from the authenticated user, never from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceBid {
    pub gig_id: Uuid,
    pub price: f64,
    pub message: String,
}

/// A bid joined with the freelancer's public identity for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct BidWithFreelancer {
    #[serde(flatten)]
    pub bid: Model,
    pub freelancer: Option<PublicUser>,
}

impl From<(Model, Option<super::users::Model>)> for BidWithFreelancer {
    fn from((bid, freelancer): (Model, Option<super::users::Model>)) -> Self {
        Self {
            bid,
            freelancer: freelancer.map(PublicUser::from),
        }
    }
}
