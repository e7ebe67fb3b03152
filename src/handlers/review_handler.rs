use actix_web::{web, Error, HttpResponse, Result};
use entity::{bookings, courts, reviews, users, venues};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, SqlErr,
};
use serde_json::json;
use std::collections::HashMap;
use uuid::Uuid;

use crate::middleware::auth::AuthenticatedUser;
use crate::types::review::{CreateReviewRequest, UpdateReviewRequest};

const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

pub async fn list_venue_reviews(
    db: web::Data<DatabaseConnection>,
    venue_id: web::Path<Uuid>,
) -> Result<HttpResponse, Error> {
    let venue = venues::Entity::find_by_id(*venue_id)
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
                "status": "error",
                "message": "Venue not found"
            })))
        }
    };

    let rows = reviews::Entity::find()
        .find_also_related(bookings::Entity)
        .join(JoinType::InnerJoin, bookings::Relation::Court.def())
        .filter(courts::Column::VenueId.eq(venue.id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    // One lookup for all reviewers instead of a query per row
    let user_ids: Vec<Uuid> = rows
        .iter()
        .filter_map(|(_, booking)| booking.as_ref().map(|b| b.user_id))
        .collect();
    let usernames: HashMap<Uuid, String> = if user_ids.is_empty() {
        HashMap::new()
    } else {
        users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(db.get_ref())
            .await
            .map_err(|e| {
                log::error!("Database error: {}", e);
                actix_web::error::ErrorInternalServerError("Database error occurred")
            })?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect()
    };

    let total = rows.len();
    let avg_rating = if total == 0 {
        0.0
    } else {
        rows.iter().map(|(r, _)| r.rating as f64).sum::<f64>() / total as f64
    };

    let reviews_data: Vec<_> = rows
        .into_iter()
        .map(|(review, booking)| {
            let user = booking
                .and_then(|b| usernames.get(&b.user_id).cloned())
                .unwrap_or_else(|| "Unknown".to_string());
            json!({
                "id": review.id,
                "user": user,
                "rating": review.rating,
                "comment": review.comment,
                "created_at": review.created_at
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": {
            "reviews": reviews_data,
            "avg_rating": avg_rating,
            "total_reviews": total
        }
    })))
}

pub async fn create_venue_review(
    db: web::Data<DatabaseConnection>,
    venue_id: web::Path<Uuid>,
    req: web::Json<CreateReviewRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let venue = venues::Entity::find_by_id(*venue_id)
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
                "status": "error",
                "message": "Venue not found"
            })))
        }
    };

    let rating = match req.rating {
        Some(r) if (MIN_RATING..=MAX_RATING).contains(&r) => r,
        _ => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Rating must be between 1 and 5"
            })))
        }
    };

    // Most recent completed visit at this venue that has no review yet
    let booking = bookings::Entity::find()
        .filter(bookings::Column::UserId.eq(auth_user.id))
        .filter(bookings::Column::BookingStatus.eq("completed"))
        .join(JoinType::InnerJoin, bookings::Relation::Court.def())
        .filter(courts::Column::VenueId.eq(venue.id))
        .join(JoinType::LeftJoin, bookings::Relation::Review.def())
        .filter(reviews::Column::Id.is_null())
        .order_by_desc(bookings::Column::BookingDate)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let booking = match booking {
        Some(b) => b,
        None => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "You must complete a booking at this venue before leaving a review"
            })))
        }
    };

    let new_review = reviews::ActiveModel {
        booking_id: Set(booking.id),
        rating: Set(rating),
        comment: Set(req.comment.clone()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };

    let review = match new_review.insert(db.get_ref()).await {
        Ok(r) => r,
        // Unique booking_id index backstops the one-review-per-booking gate
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "A review already exists for this booking"
            })));
        }
        Err(e) => {
            log::error!("Review creation error: {}", e);
            return Err(actix_web::error::ErrorInternalServerError(
                "Failed to create review",
            ));
        }
    };

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Review submitted successfully",
        "data": {
            "id": review.id,
            "booking_id": review.booking_id,
            "rating": review.rating,
            "comment": review.comment,
            "created_at": review.created_at
        }
    })))
}

async fn find_owned_review(
    db: &DatabaseConnection,
    review_id: i32,
    caller: Uuid,
) -> Result<Result<(reviews::Model, bookings::Model), HttpResponse>, Error> {
    let review = reviews::Entity::find_by_id(review_id)
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let review = match review {
        Some(r) => r,
        None => {
            return Ok(Err(HttpResponse::NotFound().json(json!({
                "status": "error",
                "message": "Review not found"
            }))))
        }
    };

    let booking = bookings::Entity::find_by_id(review.booking_id)
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    match booking {
        Some(b) if b.user_id == caller => Ok(Ok((review, b))),
        _ => Ok(Err(HttpResponse::Forbidden().json(json!({
            "status": "error",
            "message": "Permission denied"
        })))),
    }
}

pub async fn update_review(
    db: web::Data<DatabaseConnection>,
    review_id: web::Path<i32>,
    req: web::Json<UpdateReviewRequest>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let (review, _) = match find_owned_review(db.get_ref(), *review_id, auth_user.id).await? {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };

    if let Some(rating) = req.rating {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Ok(HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Rating must be between 1 and 5"
            })));
        }
    }

    let mut active: reviews::ActiveModel = review.into();
    if let Some(rating) = req.rating {
        active.rating = Set(rating);
    }
    if let Some(comment) = &req.comment {
        active.comment = Set(Some(comment.clone()));
    }

    let updated = active.update(db.get_ref()).await.map_err(|e| {
        log::error!("Review update error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to update review")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Review updated successfully",
        "data": {
            "id": updated.id,
            "rating": updated.rating,
            "comment": updated.comment,
            "created_at": updated.created_at
        }
    })))
}

pub async fn delete_review(
    db: web::Data<DatabaseConnection>,
    review_id: web::Path<i32>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let (review, _) = match find_owned_review(db.get_ref(), *review_id, auth_user.id).await? {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };

    review.delete(db.get_ref()).await.map_err(|e| {
        log::error!("Review deletion error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to delete review")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Review deleted successfully"
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

    fn customer_id() -> Uuid {
        Uuid::parse_str("a3a85f64-5717-4562-b3fc-2c963f66afa1").unwrap()
    }

    fn venue_fixture() -> venues::Model {
        let now = chrono::Utc::now().naive_utc();
        venues::Model {
            id: Uuid::parse_str("a3a85f64-5717-4562-b3fc-2c963f66afa3").unwrap(),
            name: "Test Venue".to_string(),
            owner_id: Uuid::parse_str("a3a85f64-5717-4562-b3fc-2c963f66afa2").unwrap(),
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

    fn completed_booking() -> bookings::Model {
        let now = chrono::Utc::now().naive_utc();
        bookings::Model {
            id: Uuid::parse_str("a3a85f64-5717-4562-b3fc-2c963f66afb1").unwrap(),
            user_id: customer_id(),
            court_id: 1,
            session_id: Some(10),
            booking_date: now.date(),
            start_time: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_hours: Decimal::from(2),
            total_price: Decimal::new(20000000, 2),
            booking_status: "completed".to_string(),
            payment_status: "paid".to_string(),
            notes: None,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn review_fixture() -> reviews::Model {
        reviews::Model {
            id: 7,
            booking_id: completed_booking().id,
            rating: 4,
            comment: Some("Good venue".to_string()),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn bearer(user: Uuid) -> String {
        format!(
            "Bearer {}",
            create_jwt_token(&user.to_string(), "user").unwrap()
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
    async fn rating_out_of_bounds_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![venue_fixture()]])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/venues/a3a85f64-5717-4562-b3fc-2c963f66afa3/reviews")
            .insert_header(("Authorization", bearer(customer_id())))
            .set_json(json!({ "rating": 6, "comment": "Test" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Rating must be between 1 and 5");
    }

    #[actix_rt::test]
    async fn review_needs_a_completed_unreviewed_booking() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![venue_fixture()]])
            .append_query_results([Vec::<bookings::Model>::new()])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/venues/a3a85f64-5717-4562-b3fc-2c963f66afa3/reviews")
            .insert_header(("Authorization", bearer(customer_id())))
            .set_json(json!({ "rating": 4 }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[actix_rt::test]
    async fn review_attaches_to_latest_completed_booking() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![venue_fixture()]])
            .append_query_results([vec![completed_booking()]])
            .append_query_results([vec![review_fixture()]])
            .into_connection();
        let req = test::TestRequest::post()
            .uri("/api/venues/a3a85f64-5717-4562-b3fc-2c963f66afa3/reviews")
            .insert_header(("Authorization", bearer(customer_id())))
            .set_json(json!({ "rating": 4, "comment": "Good venue" }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["rating"], 4);
    }

    #[actix_rt::test]
    async fn update_by_non_author_is_forbidden() {
        let mut foreign_booking = completed_booking();
        foreign_booking.user_id = Uuid::parse_str("a3a85f64-5717-4562-b3fc-2c963f66afa2").unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![review_fixture()]])
            .append_query_results([vec![foreign_booking]])
            .into_connection();
        let req = test::TestRequest::put()
            .uri("/api/reviews/7")
            .insert_header(("Authorization", bearer(customer_id())))
            .set_json(json!({ "rating": 5 }));
        let (status, body) = call(db, req).await;
        assert_eq!(status, actix_web::http::StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Permission denied");
    }
}
