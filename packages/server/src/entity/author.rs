use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub user_name: String,

    #[sea_orm(has_many)]
    pub posts: HasMany<super::blog_post::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Display name as listed on author endpoints (untrimmed).
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
