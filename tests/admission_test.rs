//! Bid admission rules against a mock store.
//!
//! Run with: `cargo test --test admission_test`
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use uuid::Uuid;

use gigflow_backend::db::bids::admit_bid;
use gigflow_backend::errors::ApiError;
use gigflow_backend::models::bids::{self, PlaceBid, Status as BidStatus};
use gigflow_backend::models::gigs::{self, Status as GigStatus};

fn gig(owner_id: Uuid, status: GigStatus) -> gigs::Model {
    gigs::Model {
        id: Uuid::new_v4(),
        title: "Build a landing page".to_string(),
        description: "Responsive, two sections".to_string(),
        budget: 500.0,
        owner_id,
        status,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn bid(gig_id: Uuid, freelancer_id: Uuid, status: BidStatus) -> bids::Model {
    bids::Model {
        id: Uuid::new_v4(),
        gig_id,
        freelancer_id,
        price: 450.0,
        message: "I can do this in a week".to_string(),
        status,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn place(gig_id: Uuid) -> PlaceBid {
    PlaceBid {
        gig_id,
        price: 450.0,
        message: "I can do this in a week".to_string(),
    }
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

#[tokio::test]
async fn rejects_non_positive_price_before_touching_the_store() {
    let db = empty_db();

    let input = PlaceBid {
        gig_id: Uuid::new_v4(),
        price: 0.0,
        message: "hello".to_string(),
    };

    let err = admit_bid(&db, input, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn rejects_empty_message_before_touching_the_store() {
    let db = empty_db();

    let input = PlaceBid {
        gig_id: Uuid::new_v4(),
        price: 100.0,
        message: "   ".to_string(),
    };

    let err = admit_bid(&db, input, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn missing_gig_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<gigs::Model>::new()])
        .into_connection();

    let err = admit_bid(&db, place(Uuid::new_v4()), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn owner_cannot_bid_on_own_gig() {
    let owner = Uuid::new_v4();
    let g = gig(owner, GigStatus::Open);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![g.clone()]])
        .into_connection();

    let err = admit_bid(&db, place(g.id), owner).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn assigned_gig_rejects_new_bids() {
    let g = gig(Uuid::new_v4(), GigStatus::Assigned);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![g.clone()]])
        .into_connection();

    let err = admit_bid(&db, place(g.id), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidState(_)));
}

#[tokio::test]
async fn second_bid_from_same_freelancer_is_a_conflict() {
    let freelancer = Uuid::new_v4();
    let g = gig(Uuid::new_v4(), GigStatus::Open);
    let existing = bid(g.id, freelancer, BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![g.clone()]])
        .append_query_results([vec![existing]])
        .into_connection();

    let err = admit_bid(&db, place(g.id), freelancer).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn valid_bid_is_created_pending() {
    let freelancer = Uuid::new_v4();
    let g = gig(Uuid::new_v4(), GigStatus::Open);
    let created = bid(g.id, freelancer, BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![g.clone()]])
        .append_query_results([Vec::<bids::Model>::new()]) // no duplicate
        .append_query_results([vec![created.clone()]]) // INSERT .. RETURNING
        .into_connection();

    let saved = admit_bid(&db, place(g.id), freelancer).await.unwrap();
    assert_eq!(saved.status, BidStatus::Pending);
    assert_eq!(saved.gig_id, g.id);
    assert_eq!(saved.freelancer_id, freelancer);
}
