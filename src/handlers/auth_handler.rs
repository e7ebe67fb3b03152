use actix_web::{web, Error, HttpResponse, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use entity::users;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde_json::json;
use uuid::Uuid;

use crate::types::auth::{LoginRequest, RegisterRequest, UserResponse};
use crate::utils::jwt::create_jwt_token;

pub async fn register(
    db: web::Data<DatabaseConnection>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, Error> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Missing required fields"
        })));
    }

    // Admin accounts are provisioned out of band, never via self-registration
    let role = req.role.clone().unwrap_or_else(|| "user".to_string());
    if role != "user" && role != "mitra" {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid role"
        })));
    }

    let existing_username = users::Entity::find()
        .filter(users::Column::Username.eq(&req.username))
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    if existing_username.is_some() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Username is already taken"
        })));
    }

    let existing_email = users::Entity::find()
        .filter(users::Column::Email.eq(&req.email))
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    if existing_email.is_some() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "User with this email already exists"
        })));
    }

    let password_hash = hash(&req.password, DEFAULT_COST).map_err(|e| {
        log::error!("Password hashing error: {}", e);
        actix_web::error::ErrorInternalServerError("Error processing password")
    })?;

    let now = chrono::Utc::now().naive_utc();
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(req.username.clone()),
        email: Set(req.email.clone()),
        password_hash: Set(password_hash),
        role: Set(role),
        phone_number: Set(req.phone_number.clone()),
        address: Set(req.address.clone()),
        is_verified: Set(false),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let user = new_user.insert(db.get_ref()).await.map_err(|e| {
        log::error!("User creation error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to create user")
    })?;

    let token = create_jwt_token(&user.id.to_string(), &user.role).map_err(|e| {
        log::error!("JWT token creation error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to create authentication token")
    })?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "User registered successfully",
        "token": token,
        "user": UserResponse::from(user),
    })))
}

pub async fn login(
    db: web::Data<DatabaseConnection>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, Error> {
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(&req.username))
        .one(db.get_ref())
        .await
        .map_err(|e| {
            log::error!("Database error: {}", e);
            actix_web::error::ErrorInternalServerError("Database error occurred")
        })?;

    let user = match user {
        Some(u) => u,
        None => {
            return Ok(HttpResponse::Unauthorized().json(json!({
                "success": false,
                "message": "Invalid username or password"
            })))
        }
    };

    if !user.is_active {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Account is deactivated"
        })));
    }

    let is_valid = verify(&req.password, &user.password_hash).map_err(|e| {
        log::error!("Password verification error: {}", e);
        actix_web::error::ErrorInternalServerError("Error verifying password")
    })?;

    if !is_valid {
        return Ok(HttpResponse::Unauthorized().json(json!({
            "success": false,
            "message": "Invalid username or password"
        })));
    }

    let token = create_jwt_token(&user.id.to_string(), &user.role).map_err(|e| {
        log::error!("JWT token creation error: {}", e);
        actix_web::error::ErrorInternalServerError("Failed to create authentication token")
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "user": UserResponse::from(user),
    })))
}
