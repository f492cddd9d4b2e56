use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::gigs::{self, CreateGig, Status};
use crate::models::users;

/// Insert a new gig, stamped with its owner and an Open status.
pub async fn insert_gig(
    db: &DatabaseConnection,
    input: CreateGig,
    owner_id: Uuid,
) -> Result<gigs::Model, DbErr> {
    let new_gig = gigs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        budget: Set(input.budget),
        owner_id: Set(owner_id),
        status: Set(Status::Open),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_gig.insert(db).await
}

/// Fetch all Open gigs newest-first, each with its owner, optionally filtered
/// by a case-insensitive substring match on the title.
pub async fn list_open_gigs(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<(gigs::Model, Option<users::Model>)>, DbErr> {
    let mut query = gigs::Entity::find().filter(gigs::Column::Status.eq(Status::Open));

    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        query = query.filter(Expr::col((gigs::Entity, gigs::Column::Title)).ilike(format!("%{term}%")));
    }

    query
        .find_also_related(users::Entity)
        .order_by_desc(gigs::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single gig by ID, regardless of status.
pub async fn get_gig_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<gigs::Model>, DbErr> {
    gigs::Entity::find_by_id(id).one(db).await
}

/// Fetch a single gig by ID together with its owner.
pub async fn get_gig_with_owner(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<(gigs::Model, Option<users::Model>)>, DbErr> {
    gigs::Entity::find_by_id(id)
        .find_also_related(users::Entity)
        .one(db)
        .await
}
