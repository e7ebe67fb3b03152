use actix_web::{web, Error, HttpResponse, Result};
use chrono::{NaiveDate, NaiveTime};
use entity::{bookings, court_sessions, courts, venues};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use serde_json::json;

use crate::middleware::auth::AuthenticatedUser;
use crate::types::catalog::{CreateSessionRequest, SessionsQuery};
use crate::utils::auth::check_role;

/// Accepts "08:00", "08:00:00" and the bare "0800" the venue dashboard sends.
pub(crate) fn parse_flexible_time(raw: &str) -> Option<NaiveTime> {
    let normalized = if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        format!("{}:{}", &raw[..2], &raw[2..])
    } else {
        raw.to_string()
    };
    NaiveTime::parse_from_str(&normalized, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&normalized, "%H:%M:%S"))
        .ok()
}

/// Availability listing: one row per session with an `is_available` flag for
/// the requested date. Matching is by exact session, not interval overlap.
pub async fn list_court_sessions(
    db: web::Data<DatabaseConnection>,
    court_id: web::Path<i32>,
    query: web::Query<SessionsQuery>,
) -> Result<HttpResponse, Error> {
    let court = courts::Entity::find_by_id(*court_id)
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

    let date = match &query.date {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "message": "Invalid date format"
                })))
            }
        },
        None => chrono::Utc::now().date_naive(),
    };

    let sessions = court_sessions::Entity::find()
        .filter(court_sessions::Column::CourtId.eq(court.id))
        .order_by_asc(court_sessions::Column::StartTime)
        .all(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let mut sessions_data = Vec::new();
    for session in sessions {
        let is_booked = bookings::Entity::find()
            .filter(bookings::Column::CourtId.eq(court.id))
            .filter(bookings::Column::SessionId.eq(session.id))
            .filter(bookings::Column::BookingDate.eq(date))
            .filter(bookings::Column::BookingStatus.is_in(["pending", "confirmed"]))
            .one(db.get_ref())
            .await
            .map_err(|e| {
                log::error!("Database error: {}", e);
                actix_web::error::ErrorInternalServerError("Database error occurred")
            })?
            .is_some();

        let duration_minutes = (session.end_time - session.start_time).num_minutes();

        sessions_data.push(json!({
            "id": session.id,
            "session_name": session.session_name,
            "start_time": session.start_time.format("%H:%M").to_string(),
            "end_time": session.end_time.format("%H:%M").to_string(),
            "duration_minutes": duration_minutes,
            "is_booked": is_booked,
            "is_available": !is_booked
        }));
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "court_id": court.id,
        "court_name": court.name,
        "price_per_hour": court.price_per_hour,
        "date": date.format("%Y-%m-%d").to_string(),
        "sessions": sessions_data
    })))
}

pub async fn create_court_session(
    db: web::Data<DatabaseConnection>,
    court_id: web::Path<i32>,
    req: web::Json<CreateSessionRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_role(&auth_user, "mitra") {
        return Ok(resp);
    }

    let court = courts::Entity::find_by_id(*court_id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    // Ownership runs court -> venue -> owner
    let court = match court {
        Some(c) => c,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Court not found or you do not have access"
            })))
        }
    };

    let venue = venues::Entity::find_by_id(court.venue_id)
        .filter(venues::Column::OwnerId.eq(auth_user.id))
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    if venue.is_none() {
        return Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Court not found or you do not have access"
        })));
    }

    let (start_time, end_time) = match (
        parse_flexible_time(&req.start_time),
        parse_flexible_time(&req.end_time),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid time format"
            })))
        }
    };

    if end_time <= start_time {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "End time must be after start time"
        })));
    }

    let existing = court_sessions::Entity::find()
        .filter(court_sessions::Column::CourtId.eq(court.id))
        .filter(court_sessions::Column::StartTime.eq(start_time))
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    if existing.is_some() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": format!(
                "A session starting at {} already exists for this court",
                start_time.format("%H:%M")
            )
        })));
    }

    let session_name = req
        .session_name
        .clone()
        .unwrap_or_else(|| format!("Session {}", start_time.format("%H:%M")));

    let new_session = court_sessions::ActiveModel {
        court_id: Set(court.id),
        session_name: Set(session_name),
        start_time: Set(start_time),
        end_time: Set(end_time),
        is_active: Set(true),
        ..Default::default()
    };

    let session = match new_session.insert(db.get_ref()).await {
        Ok(s) => s,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": format!(
                    "A session starting at {} already exists for this court",
                    start_time.format("%H:%M")
                )
            })));
        }
        Err(e) => {
            log::error!("Session creation error: {}", e);
            return Err(actix_web::error::ErrorInternalServerError(
                "Failed to create session",
            ));
        }
    };

    // Price rides along with the schedule form on the dashboard
    let price_per_hour = match req.price {
        Some(price) => {
            let mut active: courts::ActiveModel = court.into();
            active.price_per_hour = Set(price);
            let updated = active.update(db.get_ref()).await.map_err(|e| {
                log::error!("Court price update error: {}", e);
                actix_web::error::ErrorInternalServerError("Failed to update court price")
            })?;
            updated.price_per_hour
        }
        None => court.price_per_hour,
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Session created successfully",
        "data": {
            "id": session.id,
            "session_name": session.session_name,
            "start_time": session.start_time.format("%H:%M").to_string(),
            "end_time": session.end_time.format("%H:%M").to_string(),
            "price_per_hour": price_per_hour
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::parse_flexible_time;
    use chrono::NaiveTime;

    #[test]
    fn accepts_colon_and_bare_formats() {
        let expected = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        assert_eq!(parse_flexible_time("08:00"), Some(expected));
        assert_eq!(parse_flexible_time("0800"), Some(expected));
        assert_eq!(parse_flexible_time("08:00:00"), Some(expected));
    }

    #[test]
    fn rejects_nonsense() {
        assert_eq!(parse_flexible_time("8am"), None);
        assert_eq!(parse_flexible_time("25:00"), None);
        assert_eq!(parse_flexible_time(""), None);
    }
}
