//! Run command - executes one service and prints its response.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -- run create-account --args '{"name": "acme"}'
//! cargo run -- run import-accounts --args '{"names": ["a", "b"]}'
//! ```

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::accounts::{CreateAccount, ImportAccounts, RenameAccount};
use crate::api::ServiceResponse;
use crate::cli::args::{RunArgs, ServiceName};
use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};
use crate::service::{from_bag, Executor, Service};

use super::connect_executor;

/// Execute the run command
pub async fn execute(args: RunArgs, config: Config) -> ServiceResult<()> {
    let bag: Value = serde_json::from_str(&args.args)
        .map_err(|e| ServiceError::arguments(format!("--args is not valid JSON: {}", e)))?;
    let executor = connect_executor(&config).await?;

    match args.service {
        ServiceName::CreateAccount => run::<CreateAccount>(&executor, bag).await,
        ServiceName::RenameAccount => run::<RenameAccount>(&executor, bag).await,
        ServiceName::ImportAccounts => run::<ImportAccounts>(&executor, bag).await,
    }
}

async fn run<S>(executor: &Executor, bag: Value) -> ServiceResult<()>
where
    S: Service,
    S::Args: DeserializeOwned,
    S::Output: Serialize,
{
    let args = from_bag::<S::Args>(bag)?;
    tracing::debug!(service = S::NAME, "Running service");

    match executor.execute::<S>(args).await {
        Ok(service) => print(&ServiceResponse::from_service(service)),
        Err(failure) => {
            let (error, service) = failure.into_parts();
            print(&ServiceResponse::from_service(service))?;
            Err(error)
        }
    }
}

fn print<T: Serialize>(response: &ServiceResponse<T>) -> ServiceResult<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
