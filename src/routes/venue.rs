use crate::handlers::{review_handler, venue_handler};
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_venue_routes() -> actix_web::Scope {
    web::scope("/venues")
        .route("", web::post().to(venue_handler::create_venue).wrap(AuthMiddleware))
        .route(
            "/{venue_id}/courts",
            web::post().to(venue_handler::create_court).wrap(AuthMiddleware),
        )
        // Review listing is public; creating one requires a signed-in customer
        .route(
            "/{venue_id}/reviews",
            web::get().to(review_handler::list_venue_reviews),
        )
        .route(
            "/{venue_id}/reviews",
            web::post().to(review_handler::create_venue_review).wrap(AuthMiddleware),
        )
}
