use crate::handlers::revenue_handler;
use crate::middleware::auth::AuthMiddleware;
use actix_web::web;

pub fn configure_revenue_routes() -> actix_web::Scope {
    web::scope("/revenue")
        .route(
            "/refunds",
            web::get().to(revenue_handler::list_refunds).wrap(AuthMiddleware),
        )
        .route(
            "/refunds",
            web::post().to(revenue_handler::create_refund).wrap(AuthMiddleware),
        )
        .route(
            "/refunds/list",
            web::get().to(revenue_handler::list_refunds_plain).wrap(AuthMiddleware),
        )
        .route(
            "/refunds/{pendapatan_id}/create",
            web::post().to(revenue_handler::create_refund_by_id).wrap(AuthMiddleware),
        )
        .route(
            "/refunds/{pendapatan_id}/cancel",
            web::delete().to(revenue_handler::cancel_refund).wrap(AuthMiddleware),
        )
}
