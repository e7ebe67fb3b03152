use actix_web::{web, Error, HttpRequest, HttpResponse, Result};
use entity::{users, venues};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::json;
use uuid::Uuid;

use crate::middleware::auth::AuthenticatedUser;
use crate::types::admin::MitraStatusRequest;
use crate::utils::activity::log_activity;
use crate::utils::auth::check_admin_role;

/// Approve or reject a mitra account. The decision cascades to every venue
/// the mitra owns.
pub async fn update_mitra_status(
    db: web::Data<DatabaseConnection>,
    mitra_id: web::Path<Uuid>,
    req: web::Json<MitraStatusRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
    http_req: HttpRequest,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_admin_role(&auth_user) {
        return Ok(resp);
    }

    if req.status != "approved" && req.status != "rejected" {
        return Ok(HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid status"
        })));
    }

    let mitra = users::Entity::find_by_id(*mitra_id)
        .filter(users::Column::Role.eq("mitra"))
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let mitra = match mitra {
        Some(m) => m,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "status": "error",
                "message": "Mitra not found"
            })))
        }
    };

    let approved = req.status == "approved";
    let mitra_uuid = mitra.id;

    let mut active: users::ActiveModel = mitra.into();
    active.is_verified = Set(approved);
    active.is_active = Set(approved);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db.get_ref()).await.map_err(|e| {
        log::error!("Mitra status update error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to update mitra status")
    })?;

    let mut cascade = venues::Entity::update_many()
        .col_expr(
            venues::Column::VerificationStatus,
            Expr::value(req.status.clone()),
        )
        .filter(venues::Column::OwnerId.eq(mitra_uuid));
    if !approved {
        cascade = cascade.col_expr(
            venues::Column::RejectionReason,
            Expr::value(req.rejection_reason.clone()),
        );
    }
    let result = cascade.exec(db.get_ref()).await.map_err(|e| {
        log::error!("Venue cascade error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to update venues")
    })?;

    log_activity(
        db.get_ref(),
        auth_user.id,
        "verification",
        format!("Mitra {} {}", mitra_uuid, req.status),
        &http_req,
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": format!(
            "Mitra {} successfully. {} venue(s) also {}.",
            req.status, result.rows_affected, req.status
        ),
        "data": {
            "id": mitra_uuid,
            "status": req.status,
            "venues_affected": result.rows_affected
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::utils::jwt::create_jwt_token;
    use actix_web::{test, App};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn admin_id() -> Uuid {
        Uuid::parse_str("c3a85f64-5717-4562-b3fc-2c963f66afa9").unwrap()
    }

    fn mitra_fixture(verified: bool) -> users::Model {
        let now = chrono::Utc::now().naive_utc();
        users::Model {
            id: Uuid::parse_str("c3a85f64-5717-4562-b3fc-2c963f66afa2").unwrap(),
            username: "mitra1".to_string(),
            email: "mitra@test.com".to_string(),
            password_hash: "x".to_string(),
            role: "mitra".to_string(),
            phone_number: None,
            address: None,
            is_verified: verified,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn bearer(role: &str) -> String {
        format!(
            "Bearer {}",
            create_jwt_token(&admin_id().to_string(), role).unwrap()
        )
    }

    async fn call(
        db: sea_orm::DatabaseConnection,
        req: test::TestRequest,
    ) -> (actix_web::http::StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .service(routes::api::configure_routes()),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body: serde_json::Value = test::read_body_json(res).await;
        (status, body)
    }

    #[actix_rt::test]
    async fn invalid_status_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let req = test::TestRequest::patch()
            .uri("/api/admin/mitras/c3a85f64-5717-4562-b3fc-2c963f66afa2/status")
            .insert_header(("Authorization", bearer("admin")))
            .set_json(json!({ "status": "suspended" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid status");
    }

    #[actix_rt::test]
    async fn unknown_mitra_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();
        let req = test::TestRequest::patch()
            .uri("/api/admin/mitras/c3a85f64-5717-4562-b3fc-2c963f66afa2/status")
            .insert_header(("Authorization", bearer("admin")))
            .set_json(json!({ "status": "approved" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Mitra not found");
    }

    #[actix_rt::test]
    async fn approval_cascades_to_venues() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![mitra_fixture(false)]])
            .append_query_results([vec![mitra_fixture(true)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .append_query_results([vec![entity::activity_logs::Model {
                id: 1,
                user_id: admin_id(),
                action_type: "verification".to_string(),
                description: "test".to_string(),
                ip_address: None,
                user_agent: None,
                timestamp: chrono::Utc::now().naive_utc(),
            }]])
            .into_connection();
        let req = test::TestRequest::patch()
            .uri("/api/admin/mitras/c3a85f64-5717-4562-b3fc-2c963f66afa2/status")
            .insert_header(("Authorization", bearer("admin")))
            .set_json(json!({ "status": "approved" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["data"]["venues_affected"], 2);
    }
}
