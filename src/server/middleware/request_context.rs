//! Request context middleware
//!
//! Builds the [`RequestContext`] once per request and stores it in the
//! request extensions, where the guard adapters pick it up.

use super::helpers::{REQUEST_ID_HEADER, client_ip, extract_session_token, request_id_from_headers};
use crate::core::RequestContext;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::HttpMessage;
use actix_web::http::header::{HeaderName, HeaderValue, USER_AGENT};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::debug;
use uuid::Uuid;

/// Request context middleware for Actix-web
#[derive(Debug, Clone)]
pub struct RequestContextMiddleware {
    session_cookie: Rc<str>,
}

impl RequestContextMiddleware {
    pub fn new(session_cookie: &str) -> Self {
        Self {
            session_cookie: Rc::from(session_cookie),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestContextMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestContextMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestContextMiddlewareService {
            service,
            session_cookie: Rc::clone(&self.session_cookie),
        }))
    }
}

/// Service implementation for the request context middleware
pub struct RequestContextMiddlewareService<S> {
    service: S,
    session_cookie: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for RequestContextMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id =
            request_id_from_headers(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
        let path = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| req.path().to_string());
        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);

        let ctx = RequestContext {
            request_id: request_id.clone(),
            path,
            session_token: extract_session_token(req.headers(), &self.session_cookie),
            client_ip: client_ip(&req),
            user_agent,
        };

        debug!(
            request_id = %ctx.request_id,
            path = %ctx.path,
            has_credentials = ctx.has_credentials(),
            "Request context built"
        );
        req.extensions_mut().insert(ctx);

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(res)
        })
    }
}
