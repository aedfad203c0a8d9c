//! Transaction boundary used by the executor.
//!
//! Every top-level service run gets exactly one transaction. Nested runs
//! reuse it through their `ServiceContext`, so they never reach this type.

use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};

use crate::errors::{ServiceError, ServiceResult};

/// Opens, commits and rolls back service transactions.
#[derive(Clone)]
pub struct Persistence {
    db: DatabaseConnection,
    isolation: Option<IsolationLevel>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            isolation: None,
        }
    }

    /// Use an explicit isolation level (`None` keeps the backend default)
    pub fn with_isolation(mut self, isolation: Option<IsolationLevel>) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Begin a read-write transaction
    pub async fn begin(&self) -> ServiceResult<DatabaseTransaction> {
        let txn = match self.isolation {
            Some(level) => {
                self.db
                    .begin_with_config(Some(level), Some(AccessMode::ReadWrite))
                    .await?
            }
            None => self.db.begin().await?,
        };
        Ok(txn)
    }

    pub async fn commit(&self, txn: DatabaseTransaction) -> ServiceResult<()> {
        txn.commit().await.map_err(ServiceError::from)
    }

    /// Roll back; a failure here is logged, the run's outcome stands.
    pub async fn rollback(&self, txn: DatabaseTransaction) {
        if let Err(rollback_err) = txn.rollback().await {
            tracing::error!("Transaction rollback failed: {}", rollback_err);
        }
    }
}
