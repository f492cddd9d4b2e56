use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::bids as bid_db;
use crate::db::hiring;
use crate::errors::ApiError;
use crate::models::bids::{BidWithFreelancer, PlaceBid};
use crate::notifications::hub::NotificationHub;
use crate::notifications::protocol::Notification;

/// POST /api/bids — place a bid on an Open gig.
///
/// The freelancer id is stamped from the authenticated user. Admission rules
/// (gig open, not the owner, no duplicate) live in `db::bids::admit_bid`.
pub async fn place_bid(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<PlaceBid>,
) -> Result<HttpResponse, ApiError> {
    let bid = bid_db::admit_bid(db.get_ref(), body.into_inner(), user.0.id).await?;

    Ok(HttpResponse::Created().json(bid))
}

/// GET /api/bids/{gig_id} — list a gig's bids, owner-only, newest first.
pub async fn get_bids_by_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let gig_id = path.into_inner();

    let rows = bid_db::list_bids_for_gig(db.get_ref(), gig_id, user.0.id).await?;
    let bids: Vec<BidWithFreelancer> = rows.into_iter().map(BidWithFreelancer::from).collect();

    Ok(HttpResponse::Ok().json(bids))
}

/// PATCH /api/bids/{bid_id}/hire — hire the freelancer behind a bid.
///
/// The transaction in `db::hiring::hire_bid` does all the work; once it has
/// committed, the winner gets a best-effort HIRED event. A dropped
/// notification never fails the request.
pub async fn hire(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    hub: web::Data<Arc<NotificationHub>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let bid_id = path.into_inner();

    let outcome = hiring::hire_bid(db.get_ref(), bid_id, user.0.id).await?;

    tracing::info!(
        gig_id = %outcome.gig.id,
        bid_id = %outcome.bid.id,
        rejected = outcome.rejected_bids,
        "freelancer hired"
    );

    hub.notify(
        outcome.bid.freelancer_id,
        Notification::Hired {
            message: format!(
                "Congratulations! You have been hired for: {}",
                outcome.gig.title
            ),
            gig_id: outcome.gig.id,
        },
    )
    .await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Freelancer hired successfully",
    })))
}
