//! Schema command - creates the example tables.

use crate::accounts::create_schema;
use crate::config::Config;
use crate::errors::ServiceResult;
use crate::infra::Database;

/// Execute the schema command
pub async fn execute(config: Config) -> ServiceResult<()> {
    let db = Database::connect(&config).await?;
    db.ping().await?;

    create_schema(db.connection()).await?;
    println!("Schema ready.");
    Ok(())
}
