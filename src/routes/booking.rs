use crate::handlers::booking_handler;
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_booking_routes() -> actix_web::Scope {
    web::scope("/bookings")
        .route("", web::post().to(booking_handler::create_booking).wrap(AuthMiddleware))
        // Cancellation answers to both DELETE and POST for client compatibility
        .route(
            "/{booking_id}/cancel",
            web::delete().to(booking_handler::cancel_booking).wrap(AuthMiddleware),
        )
        .route(
            "/{booking_id}/cancel",
            web::post().to(booking_handler::cancel_booking).wrap(AuthMiddleware),
        )
        .route(
            "/{booking_id}/status",
            web::get().to(booking_handler::get_booking_status).wrap(AuthMiddleware),
        )
}
