//! Rename an account on behalf of its owner.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::config::STATUS_NOT_FOUND;
use crate::errors::ServiceResult;
use crate::presenter::PresentOptions;
use crate::service::{ErrorSet, Service, ServiceContext, ServiceState};

use super::not_blank;
use super::repository::AccountRepository;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RenameAccountArgs {
    pub account_id: Uuid,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub acting_user: Uuid,
}

pub struct RenameAccount {
    args: RenameAccountArgs,
    state: ServiceState<Value>,
}

#[async_trait]
impl Service for RenameAccount {
    const NAME: &'static str = "rename_account";

    type Args = RenameAccountArgs;
    type Output = Value;

    fn build(args: Self::Args) -> Self {
        Self {
            args,
            state: ServiceState::new(),
        }
    }

    fn state(&self) -> &ServiceState<Value> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ServiceState<Value> {
        &mut self.state
    }

    fn validate(&self) -> Result<(), ErrorSet> {
        self.args.validate().map_err(ErrorSet::from)
    }

    async fn execute(&mut self, ctx: &ServiceContext<'_>) -> ServiceResult<()> {
        let accounts = AccountRepository::new(ctx.db());

        let Some(account) = accounts.find_by_id(self.args.account_id).await? else {
            return Err(self.record_field_error_with_code(
                "account",
                "not found",
                STATUS_NOT_FOUND,
            ));
        };
        if account.owner_id != Some(self.args.acting_user) {
            return Err(self.mark_unauthorized());
        }
        if let Some(other) = accounts.find_by_name(&self.args.name).await? {
            if other.id != account.id {
                return Err(self.record_field_error("name", "has already been taken"));
            }
        }

        let renamed = accounts.rename(account, self.args.name.clone()).await?;
        let summary = self.present(&renamed, Some("summary"), &PresentOptions::default())?;
        self.state.set_result(summary);
        Ok(())
    }
}
