use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub venue_id: Uuid,
    pub name: String,
    pub category_id: Option<i32>,
    pub price_per_hour: Decimal,
    pub is_active: bool,
    pub maintenance_notes: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::venues::Entity",
        from = "Column::VenueId",
        to = "super::venues::Column::Id"
    )]
    Venue,
    #[sea_orm(
        belongs_to = "super::sports_categories::Entity",
        from = "Column::CategoryId",
        to = "super::sports_categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::court_sessions::Entity")]
    Sessions,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::venues::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Venue.def()
    }
}

impl Related<super::sports_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::court_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
