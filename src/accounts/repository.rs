//! Account persistence, usable on a connection or inside a transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceResult;

use super::entity::{self, ActiveModel, Entity as AccountEntity, Model as Account};

/// Record-level rules checked before every write.
#[derive(Debug, Validate)]
struct AccountRecord {
    #[validate(length(max = 64, message = "is too long (maximum is 64 characters)"))]
    name: String,
}

impl AccountRecord {
    fn checked(name: String) -> ServiceResult<Self> {
        let record = Self { name };
        record.validate()?;
        Ok(record)
    }
}

/// Account repository over any SeaORM connection.
///
/// Writes run the record rules first; a violation surfaces as
/// `ServiceError::RecordInvalid`.
pub struct AccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> ServiceResult<Option<Account>> {
        Ok(AccountEntity::find_by_id(id).one(self.db).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Account>> {
        Ok(AccountEntity::find()
            .filter(entity::Column::Name.eq(name))
            .one(self.db)
            .await?)
    }

    pub async fn create(&self, name: String, owner_id: Option<Uuid>) -> ServiceResult<Account> {
        let record = AccountRecord::checked(name)?;

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(record.name),
            owner_id: Set(owner_id),
            created_at: Set(Utc::now()),
        };

        Ok(active_model.insert(self.db).await?)
    }

    pub async fn rename(&self, account: Account, name: String) -> ServiceResult<Account> {
        let record = AccountRecord::checked(name)?;

        let mut active: ActiveModel = account.into();
        active.name = Set(record.name);

        Ok(active.update(self.db).await?)
    }

    pub async fn count(&self) -> ServiceResult<u64> {
        Ok(AccountEntity::find().count(self.db).await?)
    }
}
