use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::sync::Arc;

use crate::services::delivery_auth::DeliveryVerifier;

/// Authenticates event deliveries. Without a verifier every request passes through.
#[derive(Clone, Default)]
pub struct DeliveryAuth {
    verifier: Option<Arc<DeliveryVerifier>>,
}

impl DeliveryAuth {
    pub fn new(verifier: Option<DeliveryVerifier>) -> Self {
        Self {
            verifier: verifier.map(Arc::new),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

impl<S, B> Transform<S, ServiceRequest> for DeliveryAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = DeliveryAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(DeliveryAuthService {
            service,
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct DeliveryAuthService<S> {
    service: S,
    verifier: Option<Arc<DeliveryVerifier>>,
}

impl<S, B> Service<ServiceRequest> for DeliveryAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(verifier) = &self.verifier {
            let header = req
                .headers()
                .get(actix_web::http::header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            match verifier.verify_header(header) {
                Ok(claims) => {
                    log::debug!("🔑 Delivery authenticated: sub={}", claims.sub.as_deref().unwrap_or("-"));
                    req.extensions_mut().insert(claims);
                }
                Err(e) => {
                    log::warn!("🚫 Rejected event delivery on {}: {}", req.path(), e);
                    return Box::pin(async move { Err(actix_web::error::ErrorUnauthorized(e.to_string())) });
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
