pub mod auth;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notifications;

pub use db::create_pool;
