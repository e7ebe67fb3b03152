use crate::handlers::court_handler;
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_court_routes() -> actix_web::Scope {
    web::scope("/courts")
        .route(
            "/{court_id}/sessions",
            web::get().to(court_handler::list_court_sessions),
        )
        .route(
            "/{court_id}/sessions",
            web::post().to(court_handler::create_court_session).wrap(AuthMiddleware),
        )
}
