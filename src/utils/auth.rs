use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::middleware::auth::AuthenticatedUser;

/// Reject callers whose role does not match. Uses the booking-side
/// `success`/`message` envelope.
pub fn check_role(
    auth_user: &web::ReqData<AuthenticatedUser>,
    role: &str,
) -> Result<(), HttpResponse> {
    if auth_user.role != role {
        return Err(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": format!("Access denied. {} role required.", role)
        })));
    }
    Ok(())
}

/// Admin gate for the revenue/refund surface, which answers with the
/// `status: ok|error` envelope.
pub fn check_admin_role(auth_user: &web::ReqData<AuthenticatedUser>) -> Result<(), HttpResponse> {
    if auth_user.role != "admin" {
        return Err(HttpResponse::Forbidden().json(json!({
            "status": "error",
            "message": "Only admin users can perform this action"
        })));
    }
    Ok(())
}
