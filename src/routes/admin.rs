use crate::handlers::admin_handler;
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_admin_routes() -> actix_web::Scope {
    web::scope("/admin").route(
        "/mitras/{mitra_id}/status",
        web::patch().to(admin_handler::update_mitra_status).wrap(AuthMiddleware),
    )
}
