use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::gigs as gig_db;
use crate::errors::ApiError;
use crate::models::gigs::{CreateGig, GigListQuery, GigWithOwner};

/// GET /api/gigs?search=<term> — list Open gigs newest-first (public).
pub async fn get_gigs(
    db: web::Data<DatabaseConnection>,
    query: web::Query<GigListQuery>,
) -> Result<HttpResponse, ApiError> {
    let rows = gig_db::list_open_gigs(db.get_ref(), query.search.as_deref()).await?;
    let gigs: Vec<GigWithOwner> = rows.into_iter().map(GigWithOwner::from).collect();

    Ok(HttpResponse::Ok().json(gigs))
}

/// GET /api/gigs/{id} — get a single gig regardless of status (public).
pub async fn get_gig(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let row = gig_db::get_gig_with_owner(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Gig {id} not found")))?;

    Ok(HttpResponse::Ok().json(GigWithOwner::from(row)))
}

/// POST /api/gigs — create a new gig owned by the authenticated user.
pub async fn create_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateGig>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(ApiError::Validation("Please provide all fields".to_string()));
    }
    if !(input.budget > 0.0) {
        return Err(ApiError::Validation("Budget must be positive".to_string()));
    }

    let gig = gig_db::insert_gig(db.get_ref(), input, user.0.id).await?;

    Ok(HttpResponse::Created().json(gig))
}
