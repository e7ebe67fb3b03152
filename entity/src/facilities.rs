use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "facilities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::venue_facilities::Entity")]
    VenueFacilities,
}

impl Related<super::venue_facilities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VenueFacilities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
