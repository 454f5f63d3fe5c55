use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A post that stores its author's name inline instead of referencing an author row.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "standalone_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,

    pub created: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
