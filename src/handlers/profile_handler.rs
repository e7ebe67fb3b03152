use actix_web::{web, Error, HttpResponse, Result};
use entity::users;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};
use serde_json::json;

use crate::middleware::auth::AuthenticatedUser;
use crate::types::auth::{UpdateProfileRequest, UserResponse};

pub async fn get_profile(
    db: web::Data<DatabaseConnection>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let user = users::Entity::find_by_id(auth_user.id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let user = match user {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "User not found"
            })))
        }
    };

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": { "user": UserResponse::from(user) }
    })))
}

pub async fn update_profile(
    db: web::Data<DatabaseConnection>,
    auth_user: web::ReqData<AuthenticatedUser>,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, Error> {
    let user = users::Entity::find_by_id(auth_user.id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let user = match user {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "User not found"
            })))
        }
    };

    if let Some(username) = &req.username {
        if username != &user.username {
            let taken = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .one(db.get_ref())
                .await
                .map_err(|e| {
                    log::error!("Database error: {}", e);
                    actix_web::error::ErrorInternalServerError("Database error occurred")
                })?;
            if taken.is_some() {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "success": false,
                    "message": "Username is already taken"
                })));
            }
        }
    }

    let mut active: users::ActiveModel = user.into();
    if let Some(username) = &req.username {
        active.username = Set(username.clone());
    }
    if let Some(email) = &req.email {
        active.email = Set(email.clone());
    }
    if let Some(phone_number) = &req.phone_number {
        active.phone_number = Set(Some(phone_number.clone()));
    }
    if let Some(address) = &req.address {
        active.address = Set(Some(address.clone()));
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(db.get_ref()).await.map_err(|e| {
        log::error!("Profile update error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to update profile")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Profile updated successfully",
        "data": { "user": UserResponse::from(updated) }
    })))
}

/// Explicit self-service deletion; the only hard delete on accounts.
pub async fn delete_profile(
    db: web::Data<DatabaseConnection>,
    auth_user: web::ReqData<AuthenticatedUser>,
) -> Result<HttpResponse, Error> {
    let user = users::Entity::find_by_id(auth_user.id)
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let user = match user {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "User not found"
            })))
        }
    };

    user.delete(db.get_ref()).await.map_err(|e| {
        log::error!("Account deletion error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to delete account")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Account deleted successfully"
    })))
}
