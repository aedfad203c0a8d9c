//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;
use serde::Serialize;
use serde_json::json;

use crate::presenter::Presentable;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Presentable for Model {
    fn view(&self, method: &str) -> Option<serde_json::Value> {
        match method {
            "summary" => Some(json!({ "id": self.id, "name": self.name })),
            _ => None,
        }
    }
}
