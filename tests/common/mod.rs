//! Shared setup for integration tests: an in-memory SQLite database with
//! the account schema, and an executor dispatching into a memory queue.

#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use service_kit::accounts::{create_schema, AccountRepository};
use service_kit::jobs::MemoryJobQueue;
use service_kit::{Executor, Persistence};

pub struct TestApp {
    pub db: DatabaseConnection,
    pub jobs: Arc<MemoryJobQueue>,
    pub executor: Executor,
}

impl TestApp {
    pub async fn new() -> Self {
        // One connection: every pooled connection would get its own memory database
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.expect("connect sqlite");
        create_schema(&db).await.expect("create schema");

        let jobs = Arc::new(MemoryJobQueue::new());
        let executor = Executor::new(Persistence::new(db.clone()), jobs.clone());

        Self { db, jobs, executor }
    }

    pub async fn account_count(&self) -> u64 {
        AccountRepository::new(&self.db).count().await.expect("count accounts")
    }
}
