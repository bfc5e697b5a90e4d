use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{Header, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::identity::{Identity, Principal},
    errors::{AppError, AppResult},
};

/// Resolves the bearer token of each request into an [`Identity`].
///
/// Requests without an `Authorization` header continue as anonymous; the
/// access rules decide what an anonymous caller may do. A header that is
/// present but invalid, or names an account that no longer exists, is
/// rejected with 401.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
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
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let identity = match resolve_identity(&req).await {
                Ok(identity) => identity,
                Err(e) => {
                    log::warn!("Rejected credentials on {}: {}", req.path(), e);
                    return Ok(req.into_response(e.error_response()).map_into_right_body());
                }
            };
            log::debug!("Request {} resolved to {}", req.path(), identity.label());

            req.extensions_mut().insert(identity);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

async fn resolve_identity(req: &ServiceRequest) -> AppResult<Identity> {
    if !req.headers().contains_key(AUTHORIZATION) {
        return Ok(Identity::Anonymous);
    }

    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

    let header = Authorization::<Bearer>::parse(req)
        .map_err(|_| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    let claims = state
        .jwt_service
        .validate_token(header.as_ref().token())
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    let account_id = claims
        .account_id()
        .ok_or_else(|| AppError::Unauthorized("Invalid token subject".to_string()))?;

    let account = state
        .account_service
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

    Ok(Identity::Account(Principal::from(&account)))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned().unwrap_or_default();
        ready(Ok(identity))
    }
}
