use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header,
    Error, HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::utils::jwt::verify_jwt_token;

/// Authenticated principal injected into request extensions by [`AuthMiddleware`].
/// Role checks happen per handler; the middleware only answers the
/// authenticated-or-not question, so 401 always wins over 403.
#[derive(Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub role: String,
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "));

            match auth_header {
                Some(token) => match verify_jwt_token(token) {
                    Ok(claims) => {
                        let user_id = Uuid::parse_str(&claims.sub)
                            .map_err(|_| ErrorUnauthorized("Invalid token"))?;
                        req.extensions_mut().insert(AuthenticatedUser {
                            id: user_id,
                            role: claims.role,
                        });
                        let res = svc.call(req).await?;
                        Ok(res)
                    }
                    Err(_) => Err(ErrorUnauthorized("Invalid token")),
                },
                None => Err(ErrorUnauthorized("Authentication required")),
            }
        })
    }
}
