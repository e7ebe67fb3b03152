use crate::handlers::auth_handler;
use actix_web::web;

pub fn configure_auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/register", web::post().to(auth_handler::register))
        .route("/login", web::post().to(auth_handler::login))
}
