use crate::handlers::health::{health_check, index};
use actix_web::web;

pub fn configure_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .service(crate::routes::auth::configure_auth_routes())
                .service(crate::routes::profile::configure_profile_routes())
                .service(crate::routes::venue::configure_venue_routes())
                .service(crate::routes::court::configure_court_routes())
                .service(crate::routes::booking::configure_booking_routes())
                .service(crate::routes::review::configure_review_routes())
                .service(crate::routes::revenue::configure_revenue_routes())
                .service(crate::routes::admin::configure_admin_routes()),
        )
}
