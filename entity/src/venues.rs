use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub address: String,
    pub location_url: Option<String>,
    pub contact: Option<String>,
    pub description: Option<String>,
    /// Denormalized count of child courts, reconciled by `sync-court-counts`.
    pub number_of_courts: i32,
    /// One of "pending", "approved", "rejected".
    pub verification_status: String,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::courts::Entity")]
    Courts,
    #[sea_orm(has_many = "super::venue_facilities::Entity")]
    VenueFacilities,
    #[sea_orm(has_many = "super::operational_hours::Entity")]
    OperationalHours,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::courts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courts.def()
    }
}

impl Related<super::venue_facilities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VenueFacilities.def()
    }
}

impl Related<super::operational_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OperationalHours.def()
    }
}

impl Model {
    pub fn is_verified(&self) -> bool {
        self.verification_status == "approved"
    }
}

impl ActiveModelBehavior for ActiveModel {}
