//! Infrastructure layer - External systems integration
//!
//! - Database connection
//! - Transaction boundary for service runs

pub mod db;
pub mod unit_of_work;

pub use db::Database;
pub use unit_of_work::Persistence;
