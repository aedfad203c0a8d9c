//! Table setup for the account services.

use sea_orm::{ConnectionTrait, DbErr, Schema};

use super::entity::Entity as AccountEntity;

/// Create the `accounts` table if it does not exist yet.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut table = Schema::new(backend).create_table_from_entity(AccountEntity);
    table.if_not_exists();

    db.execute(backend.build(&table)).await?;
    tracing::info!("Account schema ready");
    Ok(())
}
