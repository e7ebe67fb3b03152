use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub court_id: i32,
    pub session_id: Option<i32>,
    pub booking_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub duration_hours: Decimal,
    pub total_price: Decimal,
    /// One of "pending", "confirmed", "cancelled", "completed".
    pub booking_status: String,
    /// One of "unpaid", "paid", "refunded".
    pub payment_status: String,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::courts::Entity",
        from = "Column::CourtId",
        to = "super::courts::Column::Id"
    )]
    Court,
    #[sea_orm(
        belongs_to = "super::court_sessions::Entity",
        from = "Column::SessionId",
        to = "super::court_sessions::Column::Id"
    )]
    Session,
    #[sea_orm(has_one = "super::payments::Entity")]
    Payment,
    #[sea_orm(has_one = "super::reviews::Entity")]
    Review,
    #[sea_orm(has_many = "super::pendapatan::Entity")]
    Pendapatan,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::courts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Court.def()
    }
}

impl Related<super::court_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::pendapatan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pendapatan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
