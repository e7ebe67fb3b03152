use actix_web::{web, Error, HttpRequest, HttpResponse, Result};
use chrono::{NaiveDate, NaiveTime};
use entity::{bookings, court_sessions, courts, payments, pendapatan, venues};
use sea_orm::{
    prelude::Decimal, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, SqlErr,
};
use serde_json::json;
use uuid::Uuid;

use crate::constants;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::booking::{CancelBookingRequest, CreateBookingRequest, CreatedBookingSummary};
use crate::utils::activity::log_activity;

/// Wall-clock session length expressed in hours as a decimal (08:00-09:30 -> 1.5).
fn session_duration_hours(start: NaiveTime, end: NaiveTime) -> Decimal {
    let minutes = (end - start).num_minutes();
    Decimal::from(minutes) / Decimal::from(60)
}

/// A booking can still be called off strictly before its date, and only
/// while it is neither cancelled nor completed.
pub fn is_cancellable(booking_date: NaiveDate, today: NaiveDate, booking_status: &str) -> bool {
    booking_date > today && booking_status != "cancelled" && booking_status != "completed"
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

pub async fn create_booking(
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateBookingRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
    http_req: HttpRequest,
) -> Result<HttpResponse, Error> {
    // Only regular users book courts; mitra and admin accounts are turned away
    if auth_user.role != "user" {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only regular users can create bookings. Mitra and admin accounts cannot book venues."
        })));
    }

    if req.session_ids.is_empty() || req.payment_method.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Missing required fields"
        })));
    }

    let booking_date = match NaiveDate::parse_from_str(&req.booking_date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid date format"
            })))
        }
    };

    if booking_date < today() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Cannot book for past dates"
        })));
    }

    let court = courts::Entity::find_by_id(req.court_id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let court = match court {
        Some(c) => c,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Court not found"
            })))
        }
    };

    // The venue owner receives the pendapatan rows created below
    let venue = venues::Entity::find_by_id(court.venue_id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let venue = match venue {
        Some(v) => v,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Venue not found"
            })))
        }
    };

    let sessions = court_sessions::Entity::find()
        .filter(court_sessions::Column::CourtId.eq(court.id))
        .filter(court_sessions::Column::Id.is_in(req.session_ids.clone()))
        .all(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    if sessions.len() != req.session_ids.len() {
        return Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "One or more sessions not found"
        })));
    }

    let auto_confirm = req.auto_confirm.unwrap_or(false);
    let now = chrono::Utc::now().naive_utc();

    // Each session becomes its own Booking+Payment+Pendapatan triple. The
    // batch is not transactional: a conflict partway through leaves the
    // earlier triples committed.
    let mut created_bookings: Vec<CreatedBookingSummary> = Vec::new();
    let mut total_price = Decimal::ZERO;

    for session in sessions {
        let already_booked = bookings::Entity::find()
            .filter(bookings::Column::CourtId.eq(court.id))
            .filter(bookings::Column::BookingDate.eq(booking_date))
            .filter(bookings::Column::SessionId.eq(session.id))
            .filter(bookings::Column::BookingStatus.is_in(["pending", "confirmed"]))
            .one(db.get_ref())
            .await
            .map_err(|e| {
                log::error!("Database error: {}", e);
                actix_web::error::ErrorInternalServerError("Database error occurred")
            })?;

        if already_booked.is_some() {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": format!(
                    "Session {} is already booked for this date",
                    session.session_name
                )
            })));
        }

        let duration = session_duration_hours(session.start_time, session.end_time);
        let price = court.price_per_hour * duration;

        let new_booking = bookings::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(auth_user.id),
            court_id: Set(court.id),
            session_id: Set(Some(session.id)),
            booking_date: Set(booking_date),
            start_time: Set(session.start_time),
            end_time: Set(session.end_time),
            duration_hours: Set(duration),
            total_price: Set(price),
            booking_status: Set(if auto_confirm { "confirmed" } else { "pending" }.to_string()),
            payment_status: Set(if auto_confirm { "paid" } else { "unpaid" }.to_string()),
            notes: Set(req.notes.clone()),
            cancellation_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let booking = match new_booking.insert(db.get_ref()).await {
            Ok(b) => b,
            // Two requests racing for the same slot: the unique index on
            // (court, booking_date, start_time) rejects the loser.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "message": format!(
                        "Session {} is already booked for this date",
                        session.session_name
                    )
                })));
            }
            Err(e) => {
                log::error!("Booking creation error: {}", e);
                return Err(actix_web::error::ErrorInternalServerError(
                    "Failed to create booking",
                ));
            }
        };

        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_id: Set(booking.id),
            amount: Set(price),
            payment_method: Set(req.payment_method.clone()),
            transaction_id: Set(Some(format!(
                "TRX-{}-{}",
                booking.id,
                now.format("%Y%m%d%H%M%S")
            ))),
            notes: Set(None),
            paid_at: Set(auto_confirm.then_some(now)),
        };

        payment.insert(db.get_ref()).await.map_err(|e| {
            log::error!("Payment creation error: {}", e);
            actix_web::error::ErrorInternalServerError("Failed to create payment record")
        })?;

        let revenue = pendapatan::ActiveModel {
            id: Set(Uuid::new_v4()),
            mitra_id: Set(venue.owner_id),
            booking_id: Set(booking.id),
            amount: Set(price),
            commission_rate: Set(constants::config::platform_commission_rate()),
            commission_amount: Set(Decimal::ZERO),
            net_amount: Set(Decimal::ZERO),
            payment_status: Set(if auto_confirm { "paid" } else { "pending" }.to_string()),
            paid_at: Set(auto_confirm.then_some(now)),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        revenue.insert(db.get_ref()).await.map_err(|e| {
            log::error!("Pendapatan creation error: {}", e);
            actix_web::error::ErrorInternalServerError("Failed to create revenue record")
        })?;

        total_price += price;
        created_bookings.push(CreatedBookingSummary {
            id: booking.id,
            session: session.session_name,
            start_time: session.start_time.format("%H:%M").to_string(),
            end_time: session.end_time.format("%H:%M").to_string(),
            price,
        });
    }

    // One trail row per batch, not per booking
    log_activity(
        db.get_ref(),
        auth_user.id,
        "booking",
        format!(
            "Created {} booking(s) for {} - {}",
            created_bookings.len(),
            venue.name,
            court.name
        ),
        &http_req,
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Booking created successfully",
        "data": {
            "bookings": created_bookings,
            "total_price": total_price,
            "status": if auto_confirm { "confirmed" } else { "pending" }
        }
    })))
}

pub async fn cancel_booking(
    db: web::Data<DatabaseConnection>,
    booking_id: web::Path<Uuid>,
    auth_user: web::ReqData<AuthenticatedUser>,
    body: web::Bytes,
    http_req: HttpRequest,
) -> Result<HttpResponse, Error> {
    let booking = bookings::Entity::find_by_id(*booking_id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let booking = match booking {
        Some(b) => b,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Booking not found"
            })))
        }
    };

    if booking.user_id != auth_user.id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "You are not authorized to cancel this booking"
        })));
    }

    if booking.booking_status == "cancelled" {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Booking is already cancelled"
        })));
    }

    if booking.booking_date <= today() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Cannot cancel booking on or after the booking date"
        })));
    }

    // Reason rides in an optional JSON body on both DELETE and POST
    let reason = serde_json::from_slice::<CancelBookingRequest>(&body)
        .unwrap_or_default()
        .reason;

    let was_paid = booking.payment_status == "paid";
    let venue_info = (booking.court_id, booking.booking_date);
    let now = chrono::Utc::now().naive_utc();

    let mut active: bookings::ActiveModel = booking.into();
    active.booking_status = Set("cancelled".to_string());
    active.cancellation_reason = Set(reason);
    if was_paid {
        active.payment_status = Set("refunded".to_string());
    }
    active.updated_at = Set(now);

    let cancelled = active.update(db.get_ref()).await.map_err(|e| {
        log::error!("Booking cancellation error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to cancel booking")
    })?;

    if was_paid {
        // Mirror the refund into the revenue ledger; a missing row is
        // logged, not raised
        let revenue = pendapatan::Entity::find()
            .filter(pendapatan::Column::BookingId.eq(cancelled.id))
            .one(db.get_ref())
            .await
            .map_err(|e| {
                log::error!("Database error: {}", e);
                actix_web::error::ErrorInternalServerError("Database error occurred")
            })?;

        match revenue {
            Some(entry) => {
                let mut active: pendapatan::ActiveModel = entry.into();
                active.payment_status = Set("refunded".to_string());
                active.updated_at = Set(now);
                active.update(db.get_ref()).await.map_err(|e| {
                    log::error!("Pendapatan refund error: {}", e);
                    actix_web::error::ErrorInternalServerError("Failed to update revenue record")
                })?;
            }
            None => {
                log::warn!("No pendapatan record found for booking {}", cancelled.id);
            }
        }
    }

    log_activity(
        db.get_ref(),
        auth_user.id,
        "cancel",
        format!(
            "Booking cancelled: court {} on {}",
            venue_info.0, venue_info.1
        ),
        &http_req,
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Booking has been successfully cancelled",
        "data": {
            "booking_id": cancelled.id,
            "booking_status": cancelled.booking_status,
            "payment_status": cancelled.payment_status,
            "cancelled_at": cancelled.updated_at
        }
    })))
}

pub async fn get_booking_status(
    db: web::Data<DatabaseConnection>,
    booking_id: web::Path<Uuid>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let booking = bookings::Entity::find_by_id(*booking_id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let booking = match booking {
        Some(b) => b,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Booking not found"
            })))
        }
    };

    if booking.user_id != auth_user.id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "You are not authorized to view this booking"
        })));
    }

    let court = courts::Entity::find_by_id(booking.court_id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let (court_name, venue_id) = match &court {
        Some(c) => (c.name.clone(), Some(c.venue_id)),
        None => ("Unknown".to_string(), None),
    };

    let venue_name = match venue_id {
        Some(id) => venues::Entity::find_by_id(id)
            .one(db.get_ref())
            .await
            .map_err(|e| {
                log::error!("Database error: {}", e);
                actix_web::error::ErrorInternalServerError("Database error occurred")
            })?
            .map(|v| v.name)
            .unwrap_or_else(|| "Unknown".to_string()),
        None => "Unknown".to_string(),
    };

    let cancellable = is_cancellable(booking.booking_date, today(), &booking.booking_status);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "booking_id": booking.id,
            "venue_name": venue_name,
            "court_name": court_name,
            "booking_date": booking.booking_date,
            "start_time": booking.start_time.format("%H:%M").to_string(),
            "end_time": booking.end_time.format("%H:%M").to_string(),
            "booking_status": booking.booking_status,
            "payment_status": booking.payment_status,
            "total_price": booking.total_price,
            "is_cancellable": cancellable,
            "cancellation_reason": booking.cancellation_reason
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::utils::jwt::create_jwt_token;
    use actix_web::{test, App};
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn user_id() -> Uuid {
        Uuid::parse_str("f3a85f64-5717-4562-b3fc-2c963f66afa1").unwrap()
    }

    fn mitra_id() -> Uuid {
        Uuid::parse_str("f3a85f64-5717-4562-b3fc-2c963f66afa2").unwrap()
    }

    fn venue_id() -> Uuid {
        Uuid::parse_str("f3a85f64-5717-4562-b3fc-2c963f66afa3").unwrap()
    }

    fn court_fixture() -> courts::Model {
        courts::Model {
            id: 1,
            venue_id: venue_id(),
            name: "Court 1".to_string(),
            category_id: None,
            price_per_hour: Decimal::new(10000000, 2),
            is_active: true,
            maintenance_notes: None,
            description: None,
        }
    }

    fn venue_fixture() -> venues::Model {
        let now = chrono::Utc::now().naive_utc();
        venues::Model {
            id: venue_id(),
            name: "Test Venue".to_string(),
            owner_id: mitra_id(),
            address: "Test Address".to_string(),
            location_url: None,
            contact: None,
            description: None,
            number_of_courts: 1,
            verification_status: "approved".to_string(),
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn session_fixture() -> court_sessions::Model {
        court_sessions::Model {
            id: 10,
            court_id: 1,
            session_name: "Morning".to_string(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            is_active: true,
        }
    }

    fn booking_fixture(date: NaiveDate, status: &str, payment: &str) -> bookings::Model {
        let now = chrono::Utc::now().naive_utc();
        bookings::Model {
            id: Uuid::parse_str("f3a85f64-5717-4562-b3fc-2c963f66afb1").unwrap(),
            user_id: user_id(),
            court_id: 1,
            session_id: Some(10),
            booking_date: date,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_hours: Decimal::from(2),
            total_price: Decimal::new(20000000, 2),
            booking_status: status.to_string(),
            payment_status: payment.to_string(),
            notes: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn payment_fixture() -> payments::Model {
        payments::Model {
            id: Uuid::parse_str("f3a85f64-5717-4562-b3fc-2c963f66afc1").unwrap(),
            booking_id: booking_fixture(fixture_date(), "pending", "unpaid").id,
            amount: Decimal::new(20000000, 2),
            payment_method: "bank_transfer".to_string(),
            transaction_id: Some("TRX-test".to_string()),
            notes: None,
            paid_at: None,
        }
    }

    fn pendapatan_fixture(status: &str) -> pendapatan::Model {
        let now = chrono::Utc::now().naive_utc();
        pendapatan::Model {
            id: Uuid::parse_str("f3a85f64-5717-4562-b3fc-2c963f66afd1").unwrap(),
            mitra_id: mitra_id(),
            booking_id: booking_fixture(fixture_date(), "pending", "unpaid").id,
            amount: Decimal::new(20000000, 2),
            commission_rate: Decimal::new(1000, 2),
            commission_amount: Decimal::new(2000000, 2),
            net_amount: Decimal::new(18000000, 2),
            payment_status: status.to_string(),
            paid_at: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn activity_fixture() -> entity::activity_logs::Model {
        entity::activity_logs::Model {
            id: 1,
            user_id: user_id(),
            action_type: "booking".to_string(),
            description: "test".to_string(),
            ip_address: None,
            user_agent: None,
            timestamp: chrono::Utc::now().naive_utc(),
        }
    }

    fn fixture_date() -> NaiveDate {
        today() + Duration::days(3)
    }

    fn bearer(role: &str) -> String {
        format!("Bearer {}", create_jwt_token(&user_id().to_string(), role).unwrap())
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

    fn create_payload(date: NaiveDate) -> serde_json::Value {
        json!({
            "court_id": 1,
            "session_ids": [10],
            "booking_date": date.format("%Y-%m-%d").to_string(),
            "payment_method": "bank_transfer"
        })
    }

    #[::core::prelude::v1::test]
    fn duration_and_price_for_two_hour_session() {
        let duration = session_duration_hours(
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        assert_eq!(duration, Decimal::from(2));
        assert_eq!(
            Decimal::new(10000000, 2) * duration,
            Decimal::new(20000000, 2)
        );
    }

    #[::core::prelude::v1::test]
    fn half_hour_granularity() {
        let duration = session_duration_hours(
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        );
        assert_eq!(duration, Decimal::new(15, 1));
    }

    #[::core::prelude::v1::test]
    fn cancellable_flag_rules() {
        let today = today();
        assert!(is_cancellable(today + Duration::days(1), today, "pending"));
        assert!(!is_cancellable(today, today, "pending"));
        assert!(!is_cancellable(today - Duration::days(1), today, "confirmed"));
        assert!(!is_cancellable(today + Duration::days(1), today, "cancelled"));
        assert!(!is_cancellable(today + Duration::days(1), today, "completed"));
    }

    #[actix_rt::test]
    async fn create_booking_requires_authentication() {
        use actix_web::ResponseError;

        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .set_json(create_payload(fixture_date()));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .service(routes::api::configure_routes()),
        )
        .await;
        // middleware rejects before the handler runs
        match test::try_call_service(&app, req.to_request()).await {
            Ok(res) => assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED),
            Err(e) => assert_eq!(
                e.as_response_error().status_code(),
                actix_web::http::StatusCode::UNAUTHORIZED
            ),
        }
    }

    #[actix_rt::test]
    async fn create_booking_rejects_non_customers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(("Authorization", bearer("mitra")))
            .set_json(create_payload(fixture_date()));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
    }

    #[actix_rt::test]
    async fn create_booking_rejects_past_dates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(("Authorization", bearer("user")))
            .set_json(create_payload(today() - Duration::days(1)));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Cannot book for past dates");
    }

    #[actix_rt::test]
    async fn create_booking_unknown_court_is_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<courts::Model>::new()])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(("Authorization", bearer("user")))
            .set_json(create_payload(fixture_date()));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Court not found");
    }

    #[actix_rt::test]
    async fn create_booking_refuses_taken_session() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![court_fixture()]])
            .append_query_results([vec![venue_fixture()]])
            .append_query_results([vec![session_fixture()]])
            .append_query_results([vec![booking_fixture(fixture_date(), "pending", "unpaid")]])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(("Authorization", bearer("user")))
            .set_json(create_payload(fixture_date()));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Session Morning is already booked for this date"
        );
    }

    #[actix_rt::test]
    async fn create_booking_happy_path() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![court_fixture()]])
            .append_query_results([vec![venue_fixture()]])
            .append_query_results([vec![session_fixture()]])
            .append_query_results([Vec::<bookings::Model>::new()])
            .append_query_results([vec![booking_fixture(fixture_date(), "pending", "unpaid")]])
            .append_query_results([vec![payment_fixture()]])
            .append_query_results([vec![pendapatan_fixture("pending")]])
            .append_query_results([vec![activity_fixture()]])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/bookings")
            .insert_header(("Authorization", bearer("user")))
            .set_json(create_payload(fixture_date()));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["bookings"].as_array().unwrap().len(), 1);
        let total: Decimal = body["data"]["total_price"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(total, Decimal::from(200000));
    }

    #[actix_rt::test]
    async fn cancel_rejects_already_cancelled() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking_fixture(fixture_date(), "cancelled", "refunded")]])
            .into_connection();
        let req = test::TestRequest::delete()
            .uri("/api/bookings/f3a85f64-5717-4562-b3fc-2c963f66afb1/cancel")
            .insert_header(("Authorization", bearer("user")));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Booking is already cancelled");
    }

    #[actix_rt::test]
    async fn cancel_rejects_same_day() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking_fixture(today(), "confirmed", "paid")]])
            .into_connection();
        let req = test::TestRequest::delete()
            .uri("/api/bookings/f3a85f64-5717-4562-b3fc-2c963f66afb1/cancel")
            .insert_header(("Authorization", bearer("user")));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Cannot cancel booking on or after the booking date"
        );
    }

    #[actix_rt::test]
    async fn cancel_rejects_other_users_booking() {
        let mut foreign = booking_fixture(fixture_date(), "pending", "unpaid");
        foreign.user_id = mitra_id();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![foreign]])
            .into_connection();
        let req = test::TestRequest::delete()
            .uri("/api/bookings/f3a85f64-5717-4562-b3fc-2c963f66afb1/cancel")
            .insert_header(("Authorization", bearer("user")));
        let (status, _) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_rt::test]
    async fn cancel_paid_booking_refunds_ledger() {
        let mut cancelled = booking_fixture(fixture_date(), "cancelled", "refunded");
        cancelled.cancellation_reason = Some("rain".to_string());
        let mut refunded = pendapatan_fixture("refunded");
        refunded.payment_status = "refunded".to_string();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![booking_fixture(fixture_date(), "confirmed", "paid")]])
            .append_query_results([vec![cancelled]])
            .append_query_results([vec![pendapatan_fixture("paid")]])
            .append_query_results([vec![refunded]])
            .append_query_results([vec![activity_fixture()]])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/bookings/f3a85f64-5717-4562-b3fc-2c963f66afb1/cancel")
            .insert_header(("Authorization", bearer("user")))
            .set_json(json!({ "reason": "rain" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["data"]["booking_status"], "cancelled");
        assert_eq!(body["data"]["payment_status"], "refunded");
    }
}
