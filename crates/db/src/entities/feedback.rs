//! Feedback entity.
//!
//! One row per review. Each attribute column is tri-state:
//! `Some(true)` positive, `Some(false)` negative, `None` unrated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub review_id: String,

    #[sea_orm(nullable)]
    pub atmosphere: Option<bool>,
    #[sea_orm(nullable)]
    pub cleanliness: Option<bool>,
    #[sea_orm(nullable)]
    pub decor: Option<bool>,
    #[sea_orm(nullable)]
    pub drink: Option<bool>,
    #[sea_orm(nullable)]
    pub entertainment: Option<bool>,
    #[sea_orm(nullable)]
    pub food: Option<bool>,
    #[sea_orm(nullable)]
    pub quality: Option<bool>,
    #[sea_orm(nullable)]
    pub service: Option<bool>,
    #[sea_orm(nullable)]
    pub speed: Option<bool>,
    #[sea_orm(nullable)]
    pub value: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::review::Entity",
        from = "Column::ReviewId",
        to = "super::review::Column::Id",
        on_delete = "Cascade"
    )]
    Review,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
