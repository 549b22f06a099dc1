pub mod account;
pub mod bidding;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod notification;
pub mod query;
pub mod repository;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod tender;
