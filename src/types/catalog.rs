use sea_orm::prelude::Decimal;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct OperationalHourInput {
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: i32,
    pub open_time: String,
    pub close_time: String,
    pub is_closed: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    pub address: String,
    pub contact: Option<String>,
    pub description: Option<String>,
    pub location_url: Option<String>,
    pub facility_ids: Option<Vec<i32>>,
    pub operational_hours: Option<Vec<OperationalHourInput>>,
}

#[derive(Deserialize)]
pub struct CreateCourtRequest {
    pub name: String,
    pub category_id: Option<i32>,
    pub price_per_hour: Decimal,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub session_name: Option<String>,
    /// "HH:MM" or bare "HHMM".
    pub start_time: String,
    pub end_time: String,
    /// Optional court price update rolled into the same call.
    pub price: Option<Decimal>,
}

#[derive(Deserialize)]
pub struct SessionsQuery {
    /// Availability date, YYYY-MM-DD; defaults to today.
    pub date: Option<String>,
}
