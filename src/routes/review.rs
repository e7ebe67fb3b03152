use crate::handlers::review_handler;
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_review_routes() -> actix_web::Scope {
    web::scope("/reviews")
        .route(
            "/{review_id}",
            web::put().to(review_handler::update_review).wrap(AuthMiddleware),
        )
        .route(
            "/{review_id}",
            web::delete().to(review_handler::delete_review).wrap(AuthMiddleware),
        )
}
