use actix_web::{web, Error, HttpResponse, Result};
use entity::{pendapatan, users};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde_json::json;
use uuid::Uuid;

use crate::middleware::auth::AuthenticatedUser;
use crate::types::revenue::{CreateRefundRequest, ListRefundsQuery, RefundRequest};
use crate::utils::auth::check_admin_role;
use crate::utils::pagination::PaginationInfo;
use crate::utils::refunds::{cancelled_refund_note, format_refund_note, parse_refund_note};

fn refund_entry_json(entry: &pendapatan::Model) -> serde_json::Value {
    // Refund metadata is string-embedded in notes; parse it back out for display
    let parsed = entry.notes.as_deref().and_then(parse_refund_note);
    json!({
        "id": entry.id,
        "booking_id": entry.booking_id,
        "mitra_id": entry.mitra_id,
        "amount": entry.amount,
        "commission_rate": entry.commission_rate,
        "commission_amount": entry.commission_amount,
        "net_amount": entry.net_amount,
        "payment_status": entry.payment_status,
        "refund_reason": parsed.as_ref().map(|p| p.reason.clone()),
        "processed_by": parsed.as_ref().map(|p| p.processed_by.clone()),
        "original_notes": parsed.as_ref().map(|p| p.original_notes.clone()),
        "notes": entry.notes,
        "paid_at": entry.paid_at,
        "updated_at": entry.updated_at
    })
}

pub async fn list_refunds(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ListRefundsQuery>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_admin_role(&auth_user) {
        return Ok(resp);
    }

    let base = pendapatan::Entity::find()
        .filter(pendapatan::Column::PaymentStatus.eq("refunded"))
        .order_by_desc(pendapatan::Column::UpdatedAt);

    let total = base.clone().count(db.get_ref()).await.map_err(|e| {
        log::error!("Database error: {}", e);
        actix_web::error::ErrorInternalServerError("Database error occurred")
    })?;

    let page = query.pagination.get_page();
    let limit = query.pagination.get_limit();
    let entries = base
        .offset(query.pagination.get_offset())
        .limit(limit)
        .all(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let data: Vec<_> = entries.iter().map(refund_entry_json).collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "data": data,
        "pagination": PaginationInfo::new(page, total, limit)
    })))
}

/// Legacy alias listing kept from the original API surface.
pub async fn list_refunds_plain(
    db: web::Data<DatabaseConnection>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_admin_role(&auth_user) {
        return Ok(resp);
    }

    let entries = pendapatan::Entity::find()
        .filter(pendapatan::Column::PaymentStatus.eq("refunded"))
        .order_by_desc(pendapatan::Column::UpdatedAt)
        .all(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let data: Vec<_> = entries.iter().map(refund_entry_json).collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "data": data
    })))
}

async fn process_refund(
    db: &DatabaseConnection,
    pendapatan_id: Uuid,
    reason: String,
    admin_id: Uuid,
) -> Result<Result<pendapatan::Model, HttpResponse>, Error> {
    let entry = pendapatan::Entity::find_by_id(pendapatan_id)
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let entry = match entry {
        Some(p) => p,
        None => {
            return Ok(Err(HttpResponse::NotFound().json(json!({
                "status": "error",
                "message": "Pendapatan not found"
            }))))
        }
    };

    if entry.payment_status == "refunded" {
        return Ok(Err(HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Transaction is already refunded"
        }))));
    }

    let admin_name = users::Entity::find_by_id(admin_id)
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?
        .map(|u| u.username)
        .unwrap_or_else(|| admin_id.to_string());

    let note = format_refund_note(&reason, &admin_name, entry.notes.as_deref());

    let mut active: pendapatan::ActiveModel = entry.into();
    active.payment_status = Set("refunded".to_string());
    active.notes = Set(Some(note));
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(db).await.map_err(|e| {
        log::error!("Refund processing error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to process refund")
    })?;

    Ok(Ok(updated))
}

pub async fn create_refund(
    db: web::Data<DatabaseConnection>,
    req: web::Json<RefundRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_admin_role(&auth_user) {
        return Ok(resp);
    }

    let pendapatan_id = match req.pendapatan_id {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "pendapatan_id is required"
            })))
        }
    };

    let reason = req.reason.clone().unwrap_or_else(|| "No reason given".to_string());
    let updated = match process_refund(db.get_ref(), pendapatan_id, reason, auth_user.id).await? {
        Ok(updated) => updated,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Refund processed successfully",
        "data": {
            "id": updated.id,
            "status": updated.payment_status,
            "notes": updated.notes
        }
    })))
}

pub async fn create_refund_by_id(
    db: web::Data<DatabaseConnection>,
    pendapatan_id: web::Path<Uuid>,
    req: web::Json<CreateRefundRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_admin_role(&auth_user) {
        return Ok(resp);
    }

    let reason = req.reason.clone().unwrap_or_else(|| "No reason given".to_string());
    let updated = match process_refund(db.get_ref(), *pendapatan_id, reason, auth_user.id).await? {
        Ok(updated) => updated,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Refund processed successfully",
        "data": {
            "id": updated.id,
            "status": updated.payment_status,
            "notes": updated.notes
        }
    })))
}

pub async fn cancel_refund(
    db: web::Data<DatabaseConnection>,
    pendapatan_id: web::Path<Uuid>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_admin_role(&auth_user) {
        return Ok(resp);
    }

    let entry = pendapatan::Entity::find_by_id(*pendapatan_id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    // Only entries currently sitting in refunded state can be reversed
    let entry = match entry {
        Some(p) if p.payment_status == "refunded" => p,
        _ => {
            return Ok(HttpResponse::NotFound().json(json!({
                "status": "error",
                "message": "Refund not found"
            })))
        }
    };

    let note = cancelled_refund_note(entry.notes.as_deref());

    let mut active: pendapatan::ActiveModel = entry.into();
    active.payment_status = Set("paid".to_string());
    active.notes = Set(Some(note));
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(db.get_ref()).await.map_err(|e| {
        log::error!("Refund cancellation error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to cancel refund")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Refund cancelled successfully",
        "data": {
            "id": updated.id,
            "status": updated.payment_status,
            "notes": updated.notes
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::utils::jwt::create_jwt_token;
    use actix_web::{test, App};
    use sea_orm::prelude::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn admin_id() -> Uuid {
        Uuid::parse_str("b3a85f64-5717-4562-b3fc-2c963f66afa9").unwrap()
    }

    fn entry_fixture(status: &str, notes: Option<&str>) -> pendapatan::Model {
        let now = chrono::Utc::now().naive_utc();
        pendapatan::Model {
            id: Uuid::parse_str("b3a85f64-5717-4562-b3fc-2c963f66afd1").unwrap(),
            mitra_id: Uuid::parse_str("b3a85f64-5717-4562-b3fc-2c963f66afa2").unwrap(),
            booking_id: Uuid::parse_str("b3a85f64-5717-4562-b3fc-2c963f66afb1").unwrap(),
            amount: Decimal::new(20000000, 2),
            commission_rate: Decimal::new(1000, 2),
            commission_amount: Decimal::new(2000000, 2),
            net_amount: Decimal::new(18000000, 2),
            payment_status: status.to_string(),
            paid_at: Some(now),
            notes: notes.map(str::to_owned),
            created_at: now,
            updated_at: now,
        }
    }

    fn admin_fixture() -> users::Model {
        let now = chrono::Utc::now().naive_utc();
        users::Model {
            id: admin_id(),
            username: "admin".to_string(),
            email: "admin@test.com".to_string(),
            password_hash: "x".to_string(),
            role: "admin".to_string(),
            phone_number: None,
            address: None,
            is_verified: true,
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
    async fn refunds_are_admin_only() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let req = test::TestRequest::post()
            .uri("/api/revenue/refunds")
            .insert_header(("Authorization", bearer("mitra")))
            .set_json(json!({ "pendapatan_id": "b3a85f64-5717-4562-b3fc-2c963f66afd1" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::FORBIDDEN);
        assert_eq!(body["status"], "error");
    }

    #[actix_rt::test]
    async fn refund_requires_pendapatan_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let req = test::TestRequest::post()
            .uri("/api/revenue/refunds")
            .insert_header(("Authorization", bearer("admin")))
            .set_json(json!({ "reason": "Test" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "pendapatan_id is required");
    }

    #[actix_rt::test]
    async fn double_refund_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entry_fixture("refunded", Some("REFUND: Test"))]])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/revenue/refunds")
            .insert_header(("Authorization", bearer("admin")))
            .set_json(json!({
                "pendapatan_id": "b3a85f64-5717-4562-b3fc-2c963f66afd1",
                "reason": "Test"
            }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("already refunded"));
    }

    #[actix_rt::test]
    async fn refund_marks_entry_and_embeds_note() {
        let refunded = entry_fixture(
            "refunded",
            Some("REFUND: Customer request | Processed by: admin | Original notes: N/A"),
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entry_fixture("paid", None)]])
            .append_query_results([vec![admin_fixture()]])
            .append_query_results([vec![refunded]])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/revenue/refunds/b3a85f64-5717-4562-b3fc-2c963f66afd1/create")
            .insert_header(("Authorization", bearer("admin")))
            .set_json(json!({ "reason": "Customer request" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["data"]["status"], "refunded");
        assert!(body["data"]["notes"].as_str().unwrap().starts_with("REFUND:"));
    }

    #[actix_rt::test]
    async fn cancel_refund_on_non_refunded_entry_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entry_fixture("paid", None)]])
            .into_connection();
        let req = test::TestRequest::delete()
            .uri("/api/revenue/refunds/b3a85f64-5717-4562-b3fc-2c963f66afd1/cancel")
            .insert_header(("Authorization", bearer("admin")));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Refund not found");
    }

    #[actix_rt::test]
    async fn cancel_refund_restores_paid_state() {
        let mut restored = entry_fixture("paid", Some("[CANCELLED] REFUND: Test"));
        restored.payment_status = "paid".to_string();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![entry_fixture("refunded", Some("REFUND: Test"))]])
            .append_query_results([vec![restored]])
            .into_connection();
        let req = test::TestRequest::delete()
            .uri("/api/revenue/refunds/b3a85f64-5717-4562-b3fc-2c963f66afd1/cancel")
            .insert_header(("Authorization", bearer("admin")));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["data"]["status"], "paid");
        assert!(body["data"]["notes"]
            .as_str()
            .unwrap()
            .starts_with("[CANCELLED]"));
    }
}
