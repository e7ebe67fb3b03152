use sea_orm::prelude::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub court_id: i32,
    pub session_ids: Vec<i32>,
    /// YYYY-MM-DD
    pub booking_date: String,
    pub payment_method: String,
    pub notes: Option<String>,
    /// Testing path: booking starts out confirmed/paid instead of pending/unpaid.
    pub auto_confirm: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedBookingSummary {
    pub id: uuid::Uuid,
    pub session: String,
    pub start_time: String,
    pub end_time: String,
    pub price: Decimal,
}
