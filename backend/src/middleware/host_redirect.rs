//! Redirect vanity hostnames on the site root.
//!
//! For `GET /` the middleware resolves the request host with a fresh
//! [`ResolutionGuard`] and answers `302 Found` when the resolver returns a
//! target different from the requested path. Everything else falls through to
//! normal routing untouched.
//!
//! The host is read from actix's connection info: `Forwarded` and
//! `X-Forwarded-Host` win over `Host`, and the URI authority is used when no
//! header carries one (HTTP/2 `:authority`).

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, header};
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

use crate::domain::ResolutionGuard;
use crate::domain::ports::DomainResolutionQuery;
use crate::inbound::http::domain_resolution::strip_port;

/// Middleware factory holding the resolver.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use site_backend::domain::ports::FixtureDomainResolutionQuery;
/// use site_backend::middleware::HostRedirect;
///
/// let app = App::new().wrap(HostRedirect::new(Arc::new(FixtureDomainResolutionQuery)));
/// ```
#[derive(Clone)]
pub struct HostRedirect {
    resolution: Arc<dyn DomainResolutionQuery>,
}

impl HostRedirect {
    /// Wrap routing with redirects decided by `resolution`.
    pub fn new(resolution: Arc<dyn DomainResolutionQuery>) -> Self {
        Self { resolution }
    }
}

impl<S, B> Transform<S, ServiceRequest> for HostRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = HostRedirectMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(HostRedirectMiddleware {
            service: Rc::new(service),
            resolution: Arc::clone(&self.resolution),
        }))
    }
}

/// Service wrapper produced by [`HostRedirect`].
pub struct HostRedirectMiddleware<S> {
    service: Rc<S>,
    resolution: Arc<dyn DomainResolutionQuery>,
}

/// Hostname to resolve, when the request is a root page load.
fn root_page_host(req: &ServiceRequest) -> Option<String> {
    if req.method() != Method::GET || req.path() != "/" {
        return None;
    }
    let info = req.connection_info();
    let host = strip_port(info.host());
    (!host.is_empty()).then(|| host.to_owned())
}

impl<S, B> Service<ServiceRequest> for HostRedirectMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let resolution = Arc::clone(&self.resolution);
        Box::pin(async move {
            if let Some(hostname) = root_page_host(&req) {
                let guard = ResolutionGuard::new();
                let target = resolution.resolve(&hostname, &guard).await;
                if let Some(target) = target.filter(|target| target.path != req.path()) {
                    info!(%hostname, path = %target.path, kind = target.kind.as_str(), "redirecting vanity hostname");
                    let response = HttpResponse::Found()
                        .insert_header((header::LOCATION, target.path))
                        .finish();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
