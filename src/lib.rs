//! Service Kit - transactional service objects.
//!
//! A service is a discrete business operation built from typed arguments,
//! validated, and executed inside one database transaction. Outcomes are
//! reported through an accumulated error set and a derived status code.
//!
//! # Layers
//!
//! - **service**: Service trait, state, context and executor
//! - **errors**: Service errors and unexpected-failure propagation
//! - **infra**: Database connection and transaction boundary
//! - **jobs**: Background jobs dispatched after commit
//! - **presenter**: Rendering results for callers
//! - **api**: HTTP response mapping
//! - **accounts**: Example services built on the executor
//! - **cli** / **commands**: Command-line interface
//! - **config**: Settings and constants
//!
//! # Example
//!
//! ```rust,ignore
//! let executor = Executor::new(Persistence::new(db), Arc::new(MemoryJobQueue::new()));
//! let service = executor
//!     .execute::<CreateAccount>(CreateAccountArgs { name: "acme".into(), owner_id: None })
//!     .await?;
//! assert_eq!(service.status_code(), 200);
//! ```

pub mod accounts;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod presenter;
pub mod service;

// Re-export commonly used types at crate root
pub use config::Config;
pub use errors::{ServiceError, ServiceResult, UnexpectedFailure};
pub use infra::Persistence;
pub use service::{ErrorSet, Executor, Service, ServiceContext, ServiceState};
