use actix_web::{web, Error, HttpRequest, HttpResponse, Result};
use entity::{courts, facilities, operational_hours, sports_categories, venue_facilities, venues};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use serde_json::json;
use uuid::Uuid;

use crate::handlers::court_handler::parse_flexible_time;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::catalog::{CreateCourtRequest, CreateVenueRequest};
use crate::utils::activity::log_activity;
use crate::utils::auth::check_role;

pub async fn create_venue(
    db: web::Data<DatabaseConnection>,
    req: web::Json<CreateVenueRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
    http_req: HttpRequest,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_role(&auth_user, "mitra") {
        return Ok(resp);
    }

    if req.name.trim().is_empty() || req.address.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Missing required fields"
        })));
    }

    // Facilities are attached in the same request; verify them up front
    let facility_ids = req.facility_ids.clone().unwrap_or_default();
    if !facility_ids.is_empty() {
        let found = facilities::Entity::find()
            .filter(facilities::Column::Id.is_in(facility_ids.clone()))
            .all(db.get_ref())
            .await
            .map_err(|e| {
                log::error!("Database error: {}", e);
                actix_web::error::ErrorInternalServerError("Database error occurred")
            })?;
        if found.len() != facility_ids.len() {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "One or more facilities not found"
            })));
        }
    }

    let mut hours = Vec::new();
    for input in req.operational_hours.as_deref().unwrap_or_default() {
        if !(0..=6).contains(&input.day_of_week) {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Invalid day of week"
            })));
        }
        let open_time = parse_flexible_time(&input.open_time);
        let close_time = parse_flexible_time(&input.close_time);
        match (open_time, close_time) {
            (Some(open), Some(close)) => hours.push((input.day_of_week, open, close, input.is_closed.unwrap_or(false))),
            _ => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "message": "Invalid time format"
                })))
            }
        }
    }

    let now = chrono::Utc::now().naive_utc();
    let new_venue = venues::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(req.name.clone()),
        owner_id: Set(auth_user.id),
        address: Set(req.address.clone()),
        location_url: Set(req.location_url.clone()),
        contact: Set(req.contact.clone()),
        description: Set(req.description.clone()),
        number_of_courts: Set(0),
        verification_status: Set("pending".to_string()),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let venue = new_venue.insert(db.get_ref()).await.map_err(|e| {
        log::error!("Venue creation error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to create venue")
    })?;

    for facility_id in facility_ids {
        let link = venue_facilities::ActiveModel {
            venue_id: Set(venue.id),
            facility_id: Set(facility_id),
            ..Default::default()
        };
        link.insert(db.get_ref()).await.map_err(|e| {
            log::error!("Venue facility link error: {}", e);
            actix_web::error::ErrorInternalServerError("Failed to attach facility")
        })?;
    }

    for (day_of_week, open, close, is_closed) in hours {
        let entry = operational_hours::ActiveModel {
            venue_id: Set(venue.id),
            day_of_week: Set(day_of_week),
            open_time: Set(open),
            close_time: Set(close),
            is_closed: Set(is_closed),
            ..Default::default()
        };
        match entry.insert(db.get_ref()).await {
            Ok(_) => {}
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "message": "Duplicate operational hours for a day"
                })));
            }
            Err(e) => {
                log::error!("Operational hours error: {}", e);
                return Err(actix_web::error::ErrorInternalServerError(
                    "Failed to save operational hours",
                ));
            }
        }
    }

    log_activity(
        db.get_ref(),
        auth_user.id,
        "create",
        format!("Created venue {}", venue.name),
        &http_req,
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Venue created successfully. Awaiting admin verification.",
        "data": {
            "id": venue.id,
            "name": venue.name,
            "address": venue.address,
            "verification_status": venue.verification_status,
            "number_of_courts": venue.number_of_courts
        }
    })))
}

pub async fn create_court(
    db: web::Data<DatabaseConnection>,
    venue_id: web::Path<Uuid>,
    req: web::Json<CreateCourtRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
    http_req: HttpRequest,
) -> Result<HttpResponse, Error> {
    if let Err(resp) = check_role(&auth_user, "mitra") {
        return Ok(resp);
    }

    if req.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Missing required fields"
        })));
    }

    let venue = venues::Entity::find_by_id(*venue_id)
        .filter(venues::Column::OwnerId.eq(auth_user.id))
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
                "message": "Venue not found or you do not have access"
            })))
        }
    };

    if let Some(category_id) = req.category_id {
        let category = sports_categories::Entity::find_by_id(category_id)
            .one(db.get_ref())
            .await
            .map_err(|e| {
                log::error!("Database error: {}", e);
                actix_web::error::ErrorInternalServerError("Database error occurred")
            })?;
        if category.is_none() {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Sports category not found"
            })));
        }
    }

    let new_court = courts::ActiveModel {
        venue_id: Set(venue.id),
        name: Set(req.name.clone()),
        category_id: Set(req.category_id),
        price_per_hour: Set(req.price_per_hour),
        is_active: Set(true),
        maintenance_notes: Set(None),
        description: Set(req.description.clone()),
        ..Default::default()
    };

    let court = match new_court.insert(db.get_ref()).await {
        Ok(c) => c,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "A court with this name already exists for this venue"
            })));
        }
        Err(e) => {
            log::error!("Court creation error: {}", e);
            return Err(actix_web::error::ErrorInternalServerError(
                "Failed to create court",
            ));
        }
    };

    log_activity(
        db.get_ref(),
        auth_user.id,
        "create",
        format!("Created court {} at {}", court.name, venue.name),
        &http_req,
    )
    .await;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Court created successfully",
        "data": {
            "id": court.id,
            "venue_id": court.venue_id,
            "name": court.name,
            "category_id": court.category_id,
            "price_per_hour": court.price_per_hour,
            "is_active": court.is_active
        }
    })))
}
