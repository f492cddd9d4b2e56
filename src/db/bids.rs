use sea_orm::*;
use uuid::Uuid;

use crate::db::gigs as gig_db;
use crate::errors::ApiError;
use crate::models::bids::{self, PlaceBid, Status};
use crate::models::gigs::Status as GigStatus;
use crate::models::users;

/// Validate and create a bid against the gig's current state.
///
/// The duplicate lookup here is only a fast path for a friendly error; the
/// unique (gig_id, freelancer_id) index is what actually prevents duplicate
/// bids under concurrent submissions.
pub async fn admit_bid(
    db: &DatabaseConnection,
    input: PlaceBid,
    freelancer_id: Uuid,
) -> Result<bids::Model, ApiError> {
    if !(input.price > 0.0) {
        return Err(ApiError::Validation("Bid price must be positive".to_string()));
    }
    if input.message.trim().is_empty() {
        return Err(ApiError::Validation("Bid message cannot be empty".to_string()));
    }

    let gig = gig_db::get_gig_by_id(db, input.gig_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Gig {} not found", input.gig_id)))?;

    if gig.owner_id == freelancer_id {
        return Err(ApiError::Forbidden("You cannot bid on your own gig".to_string()));
    }
    if gig.status != GigStatus::Open {
        return Err(ApiError::InvalidState("This gig is no longer open".to_string()));
    }

    let duplicate = bids::Entity::find()
        .filter(bids::Column::GigId.eq(input.gig_id))
        .filter(bids::Column::FreelancerId.eq(freelancer_id))
        .one(db)
        .await?
        .is_some();

    if duplicate {
        return Err(ApiError::Conflict(
            "You have already placed a bid on this gig".to_string(),
        ));
    }

    let new_bid = bids::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(input.gig_id),
        freelancer_id: Set(freelancer_id),
        price: Set(input.price),
        message: Set(input.message),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_bid.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::Conflict(
            "You have already placed a bid on this gig".to_string(),
        ),
        _ => ApiError::Database(e),
    })
}

/// Owner-only listing of a gig's bids, newest first, each with the
/// freelancer's public identity.
pub async fn list_bids_for_gig(
    db: &DatabaseConnection,
    gig_id: Uuid,
    acting_user_id: Uuid,
) -> Result<Vec<(bids::Model, Option<users::Model>)>, ApiError> {
    let gig = gig_db::get_gig_by_id(db, gig_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Gig {gig_id} not found")))?;

    if gig.owner_id != acting_user_id {
        return Err(ApiError::Forbidden(
            "Not authorized to view bids for this gig".to_string(),
        ));
    }

    let rows = bids::Entity::find()
        .filter(bids::Column::GigId.eq(gig_id))
        .find_also_related(users::Entity)
        .order_by_desc(bids::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows)
}
