use sea_orm::*;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::bids::{self, Status as BidStatus};
use crate::models::gigs::{self, Status as GigStatus};

/// Result of a committed hire: the assigned gig, the hired bid, and how many
/// sibling bids were auto-rejected.
#[derive(Debug, Clone)]
pub struct HireOutcome {
    pub gig: gigs::Model,
    pub bid: bids::Model,
    pub rejected_bids: u64,
}

/// Hire the freelancer behind `bid_id`, as a single atomic transaction:
///
/// 1. the target bid and its gig must exist;
/// 2. the acting user must own the gig;
/// 3. the gig must still be Open;
/// 4. gig Open -> Assigned, target bid Pending -> Hired, every other
///    Pending bid on the gig -> Rejected (one set-oriented statement).
///
/// Any failure aborts the transaction and leaves no partial writes: a gig is
/// never observable as Assigned with zero Hired bids, and a bid is never
/// Hired while its gig is still Open.
///
/// The status transitions are compare-and-swap updates filtered on the
/// expected current status. Two hires racing on the same gig both read it
/// Open, but the second one's gig update matches zero rows and its
/// transaction aborts with InvalidState.
pub async fn hire_bid(
    db: &DatabaseConnection,
    bid_id: Uuid,
    acting_user_id: Uuid,
) -> Result<HireOutcome, ApiError> {
    let outcome = db
        .transaction::<_, HireOutcome, ApiError>(move |txn| {
            Box::pin(async move {
                let bid = bids::Entity::find_by_id(bid_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::NotFound(format!("Bid {bid_id} not found")))?;

                let gig = gigs::Entity::find_by_id(bid.gig_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ApiError::NotFound(format!("Gig {} not found", bid.gig_id)))?;

                if gig.owner_id != acting_user_id {
                    return Err(ApiError::Forbidden(
                        "Not authorized to hire for this gig".to_string(),
                    ));
                }
                if gig.status != GigStatus::Open {
                    return Err(ApiError::InvalidState(
                        "This gig is no longer open".to_string(),
                    ));
                }

                let now = chrono::Utc::now();

                let assigned = gigs::Entity::update_many()
                    .set(gigs::ActiveModel {
                        status: Set(GigStatus::Assigned),
                        updated_at: Set(Some(now)),
                        ..Default::default()
                    })
                    .filter(gigs::Column::Id.eq(gig.id))
                    .filter(gigs::Column::Status.eq(GigStatus::Open))
                    .exec(txn)
                    .await?;

                // Lost the race against a concurrent hire.
                if assigned.rows_affected == 0 {
                    return Err(ApiError::InvalidState(
                        "This gig is no longer open".to_string(),
                    ));
                }

                let hired = bids::Entity::update_many()
                    .set(bids::ActiveModel {
                        status: Set(BidStatus::Hired),
                        updated_at: Set(Some(now)),
                        ..Default::default()
                    })
                    .filter(bids::Column::Id.eq(bid.id))
                    .filter(bids::Column::Status.eq(BidStatus::Pending))
                    .exec(txn)
                    .await?;

                if hired.rows_affected == 0 {
                    return Err(ApiError::InvalidState(
                        "This bid is no longer pending".to_string(),
                    ));
                }

                let rejected = bids::Entity::update_many()
                    .set(bids::ActiveModel {
                        status: Set(BidStatus::Rejected),
                        updated_at: Set(Some(now)),
                        ..Default::default()
                    })
                    .filter(bids::Column::GigId.eq(gig.id))
                    .filter(bids::Column::Id.ne(bid.id))
                    .filter(bids::Column::Status.eq(BidStatus::Pending))
                    .exec(txn)
                    .await?;

                Ok(HireOutcome {
                    gig: gigs::Model {
                        status: GigStatus::Assigned,
                        updated_at: Some(now),
                        ..gig
                    },
                    bid: bids::Model {
                        status: BidStatus::Hired,
                        updated_at: Some(now),
                        ..bid
                    },
                    rejected_bids: rejected.rows_affected,
                })
            })
        })
        .await?;

    Ok(outcome)
}
