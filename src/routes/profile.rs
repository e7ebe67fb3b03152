use crate::handlers::profile_handler;
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_profile_routes() -> actix_web::Scope {
    web::scope("/profile")
        .route("", web::get().to(profile_handler::get_profile).wrap(AuthMiddleware))
        .route("", web::put().to(profile_handler::update_profile).wrap(AuthMiddleware))
        .route("", web::delete().to(profile_handler::delete_profile).wrap(AuthMiddleware))
}
