use sea_orm::prelude::Decimal;
use std::env;

pub fn get_database_url() -> Result<String, env::VarError> {
    env::var("DATABASE_URL")
}

pub fn get_server_address() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

pub fn get_jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| "lapangin-insecure-dev-secret".to_string())
}

/// Platform cut of every booking, in percent. Seed data elsewhere may suggest
/// per-booking variability; production code always charges 10%.
pub fn platform_commission_rate() -> Decimal {
    Decimal::new(1000, 2)
}
