//! Create several accounts at once, all or nothing.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceResult;
use crate::service::{ErrorSet, Service, ServiceContext, ServiceState};

use super::create_account::{CreateAccount, CreateAccountArgs};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ImportAccountsArgs {
    #[validate(length(min = 1, message = "can't be empty"))]
    pub names: Vec<String>,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

/// Runs `CreateAccount` for every name in the same transaction. The first
/// child that fails hands its errors to the import, which rolls everything
/// back. The result is the number of accounts created.
pub struct ImportAccounts {
    args: ImportAccountsArgs,
    state: ServiceState<usize>,
}

#[async_trait]
impl Service for ImportAccounts {
    const NAME: &'static str = "import_accounts";

    type Args = ImportAccountsArgs;
    type Output = usize;

    fn build(args: Self::Args) -> Self {
        Self {
            args,
            state: ServiceState::new(),
        }
    }

    fn state(&self) -> &ServiceState<usize> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ServiceState<usize> {
        &mut self.state
    }

    fn validate(&self) -> Result<(), ErrorSet> {
        self.args.validate().map_err(ErrorSet::from)
    }

    async fn execute(&mut self, ctx: &ServiceContext<'_>) -> ServiceResult<()> {
        let names = self.args.names.clone();

        for name in names {
            let child = ctx
                .execute::<CreateAccount>(CreateAccountArgs {
                    name,
                    owner_id: self.args.owner_id,
                })
                .await?;

            if child.has_errors() {
                return Err(self.record_child_errors(child.errors()));
            }
        }

        self.state.set_result(self.args.names.len());
        Ok(())
    }
}
