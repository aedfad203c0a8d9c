//! Service objects - transactional business operations.
//!
//! A service is built from typed arguments, validated, and executed inside a
//! single database transaction. Its outcome is reported through an
//! accumulated [`ErrorSet`] and a derived status code rather than through
//! control flow, so callers can translate it into their own wire format.

mod args;
mod base;
mod context;
mod error_set;
mod executor;
mod state;

pub use args::from_bag;
pub use base::Service;
pub use context::ServiceContext;
pub use error_set::ErrorSet;
pub use executor::Executor;
pub use state::{ErrorSources, ServiceState};
