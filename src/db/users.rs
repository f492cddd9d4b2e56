use sea_orm::*;
use uuid::Uuid;

use crate::models::users;

/// Find a user by the id carried in the JWT, creating the row on first sight
/// (called by the auth extractor).
pub async fn find_or_create(
    db: &DatabaseConnection,
    id: Uuid,
    email: String,
    username: Option<String>,
) -> Result<users::Model, DbErr> {
    if let Some(existing) = users::Entity::find_by_id(id).one(db).await? {
        return Ok(existing);
    }

    let new_user = users::ActiveModel {
        id: Set(id),
        email: Set(email),
        username: Set(username),
        created_at: Set(chrono::Utc::now()),
    };

    new_user.insert(db).await
}
