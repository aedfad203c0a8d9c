//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod run;
pub mod schema;

use std::sync::Arc;

use crate::config::Config;
use crate::errors::ServiceResult;
use crate::infra::{Database, Persistence};
use crate::jobs::LogJobQueue;
use crate::service::Executor;

/// Connect to the configured database and build an executor around it.
pub async fn connect_executor(config: &Config) -> ServiceResult<Executor> {
    let db = Database::connect(config).await?;
    let persistence =
        Persistence::new(db.get_connection()).with_isolation(config.transaction_isolation);

    Ok(Executor::new(persistence, Arc::new(LogJobQueue)))
}
