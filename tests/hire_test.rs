//! Hiring transaction coordinator against a mock store.
//!
//! The mock feeds the coordinator's reads and conditional writes in order,
//! so these tests pin down the exact decision sequence: load bid, load gig,
//! authorize, compare-and-swap the gig status, promote the bid, bulk-reject
//! the rest.
//!
//! Run with: `cargo test --test hire_test`
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use gigflow_backend::db::hiring::hire_bid;
use gigflow_backend::errors::ApiError;
use gigflow_backend::models::bids::{self, Status as BidStatus};
use gigflow_backend::models::gigs::{self, Status as GigStatus};

fn gig(owner_id: Uuid, status: GigStatus) -> gigs::Model {
    gigs::Model {
        id: Uuid::new_v4(),
        title: "Logo design".to_string(),
        description: "Vector logo plus favicon".to_string(),
        budget: 300.0,
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
        price: 250.0,
        message: "Portfolio attached".to_string(),
        status,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn owner_hires_and_siblings_are_rejected() {
    let owner = Uuid::new_v4();
    let freelancer = Uuid::new_v4();
    let g = gig(owner, GigStatus::Open);
    let b = bid(g.id, freelancer, BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![b.clone()]])
        .append_query_results([vec![g.clone()]])
        .append_exec_results([
            exec(1), // gig open -> assigned
            exec(1), // bid pending -> hired
            exec(2), // two sibling bids rejected
        ])
        .into_connection();

    let outcome = hire_bid(&db, b.id, owner).await.unwrap();

    assert_eq!(outcome.gig.status, GigStatus::Assigned);
    assert_eq!(outcome.bid.status, BidStatus::Hired);
    assert_eq!(outcome.bid.freelancer_id, freelancer);
    assert_eq!(outcome.rejected_bids, 2);
}

#[tokio::test]
async fn missing_bid_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<bids::Model>::new()])
        .into_connection();

    let err = hire_bid(&db, Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn non_owner_cannot_hire() {
    let owner = Uuid::new_v4();
    let g = gig(owner, GigStatus::Open);
    let b = bid(g.id, Uuid::new_v4(), BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![b.clone()]])
        .append_query_results([vec![g.clone()]])
        .into_connection();

    let err = hire_bid(&db, b.id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn assigned_gig_cannot_be_hired_again() {
    let owner = Uuid::new_v4();
    let g = gig(owner, GigStatus::Assigned);
    let b = bid(g.id, Uuid::new_v4(), BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![b.clone()]])
        .append_query_results([vec![g.clone()]])
        .into_connection();

    let err = hire_bid(&db, b.id, owner).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidState(_)));
}

#[tokio::test]
async fn losing_the_status_race_aborts_with_invalid_state() {
    // The gig reads Open, but a concurrent hire commits first: the
    // compare-and-swap matches zero rows and the transaction aborts.
    let owner = Uuid::new_v4();
    let g = gig(owner, GigStatus::Open);
    let b = bid(g.id, Uuid::new_v4(), BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![b.clone()]])
        .append_query_results([vec![g.clone()]])
        .append_exec_results([exec(0)]) // someone else already assigned the gig
        .into_connection();

    let err = hire_bid(&db, b.id, owner).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidState(_)));
}

#[tokio::test]
async fn stale_bid_aborts_after_the_gig_swap() {
    // Gig swap succeeds but the target bid is no longer pending: the whole
    // transaction must abort rather than leave an Assigned gig behind.
    let owner = Uuid::new_v4();
    let g = gig(owner, GigStatus::Open);
    let b = bid(g.id, Uuid::new_v4(), BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![b.clone()]])
        .append_query_results([vec![g.clone()]])
        .append_exec_results([exec(1), exec(0)])
        .into_connection();

    let err = hire_bid(&db, b.id, owner).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidState(_)));
}

#[tokio::test]
async fn hire_with_no_sibling_bids_rejects_zero() {
    let owner = Uuid::new_v4();
    let g = gig(owner, GigStatus::Open);
    let b = bid(g.id, Uuid::new_v4(), BidStatus::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![b.clone()]])
        .append_query_results([vec![g.clone()]])
        .append_exec_results([exec(1), exec(1), exec(0)])
        .into_connection();

    let outcome = hire_bid(&db, b.id, owner).await.unwrap();
    assert_eq!(outcome.rejected_bids, 0);
}
