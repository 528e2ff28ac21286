//! Role gate middleware
//!
//! Applies a minimum-role check to every route in a scope. Rejections render
//! the same 401/403 envelope as the per-handler API guard.

use crate::auth::guard::Guard;
use crate::auth::guard::api::request_context;
use crate::auth::rbac::Role;
use crate::utils::error::ConsoleError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{ResponseError, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;

/// Minimum-role gate for a scope
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    minimum: Role,
}

impl RoleGate {
    pub fn new(minimum: Role) -> Self {
        Self { minimum }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RoleGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGateService {
            service: Rc::new(service),
            minimum: self.minimum,
        }))
    }
}

/// Service implementation for the role gate
pub struct RoleGateService<S> {
    service: Rc<S>,
    minimum: Role,
}

impl<S, B> Service<ServiceRequest> for RoleGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let minimum = self.minimum;

        Box::pin(async move {
            let outcome = match req.app_data::<web::Data<Guard>>().cloned() {
                Some(guard) => {
                    let ctx = request_context(req.request());
                    guard
                        .require_role(&ctx, minimum)
                        .await
                        .map(|_| ())
                        .map_err(ConsoleError::from)
                }
                None => Err(ConsoleError::internal("Guard is not registered as app data")),
            };

            match outcome {
                Ok(()) => service.call(req).await.map(ServiceResponse::map_into_left_body),
                Err(e) => {
                    debug!(path = %req.path(), %minimum, "Role gate rejected request");
                    let response = e.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
