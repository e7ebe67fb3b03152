use actix_web::{http::header, HttpRequest};
use entity::activity_logs;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

pub fn client_ip(req: &HttpRequest) -> Option<String> {
    let info = req.connection_info();
    info.realip_remote_addr().map(str::to_owned)
}

pub fn user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Best-effort activity trail for admin monitoring. A failed insert is
/// logged and swallowed so it never breaks the request it decorates.
pub async fn log_activity(
    db: &DatabaseConnection,
    user_id: Uuid,
    action_type: &str,
    description: String,
    req: &HttpRequest,
) {
    let entry = activity_logs::ActiveModel {
        user_id: Set(user_id),
        action_type: Set(action_type.to_string()),
        description: Set(description),
        ip_address: Set(client_ip(req)),
        user_agent: Set(user_agent(req)),
        timestamp: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    if let Err(e) = entry.insert(db).await {
        log::warn!("Failed to record activity log: {}", e);
    }
}
