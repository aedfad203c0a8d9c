//! Account services - concrete services built on the executor.
//!
//! - `CreateAccount`: validated insert plus a welcome job
//! - `RenameAccount`: owner-only rename (404 / 401 paths)
//! - `ImportAccounts`: nested `CreateAccount` runs, all or nothing

mod create_account;
pub mod entity;
mod import_accounts;
mod rename_account;
mod repository;
mod schema;

use validator::ValidationError;

pub use create_account::{CreateAccount, CreateAccountArgs, WelcomeJob};
pub use entity::Model as Account;
pub use import_accounts::{ImportAccounts, ImportAccountsArgs};
pub use rename_account::{RenameAccount, RenameAccountArgs};
pub use repository::AccountRepository;
pub use schema::create_schema;

/// Rejects empty or whitespace-only strings
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("can't be blank".into());
        return Err(error);
    }
    Ok(())
}
