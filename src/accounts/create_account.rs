//! Create a single account.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::JOB_KIND_ACCOUNT_WELCOME;
use crate::errors::ServiceResult;
use crate::service::{ErrorSet, Service, ServiceContext, ServiceState};

use super::entity::Model as Account;
use super::not_blank;
use super::repository::AccountRepository;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateAccountArgs {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

/// Payload of the welcome job sent after creation
#[derive(Debug, Serialize)]
pub struct WelcomeJob {
    pub account_id: Uuid,
    pub name: String,
}

impl From<&Account> for WelcomeJob {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            name: account.name.clone(),
        }
    }
}

pub struct CreateAccount {
    args: CreateAccountArgs,
    state: ServiceState<Account>,
}

#[async_trait]
impl Service for CreateAccount {
    const NAME: &'static str = "create_account";

    type Args = CreateAccountArgs;
    type Output = Account;

    fn build(args: Self::Args) -> Self {
        Self {
            args,
            state: ServiceState::new(),
        }
    }

    fn state(&self) -> &ServiceState<Account> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ServiceState<Account> {
        &mut self.state
    }

    async fn before_validation(&mut self, _ctx: &ServiceContext<'_>) -> ServiceResult<()> {
        self.args.name = self.args.name.trim().to_string();
        Ok(())
    }

    fn validate(&self) -> Result<(), ErrorSet> {
        self.args.validate().map_err(ErrorSet::from)
    }

    async fn execute(&mut self, ctx: &ServiceContext<'_>) -> ServiceResult<()> {
        let accounts = AccountRepository::new(ctx.db());

        if accounts.find_by_name(&self.args.name).await?.is_some() {
            return Err(self.record_field_error("name", "has already been taken"));
        }

        let account = accounts
            .create(self.args.name.clone(), self.args.owner_id)
            .await?;
        ctx.enqueue_job(
            JOB_KIND_ACCOUNT_WELCOME,
            WelcomeJob::from(&account),
            self.args.owner_id,
        )?;

        tracing::info!(account_id = %account.id, "Account created");
        self.state.set_result(account);
        Ok(())
    }
}
