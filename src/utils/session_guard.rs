use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error as ActixError, HttpMessage, HttpResponse};
use futures::future::{ok, Ready};
use log::{debug, warn};
use std::future::Future;
use std::pin::Pin;

use crate::utils::registry;
use crate::utils::session::SessionController;

// Route guard for the dashboard scope. A request without an active session
// is redirected to the login entry point; a session whose role has no
// navigation entry for the requested sub-path is redirected back to the
// dashboard root. On success the session is placed in request extensions
// for the handlers downstream.
pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Transform = SessionGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionGuardMiddleware { service })
    }
}

pub struct SessionGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = req
            .app_data::<web::Data<SessionController>>()
            .and_then(|controller| controller.restore().ok())
            .flatten();

        let session = match session {
            Some(session) => session,
            None => {
                debug!("🚪 No active session for {}, redirecting to login", req.path());
                return Box::pin(redirect(req, "/login"));
            }
        };

        let segment = dashboard_segment(req.path());
        if !registry::role_can_reach(session.role, segment) {
            warn!(
                "🚫 Role {} has no access to dashboard segment '{}', redirecting",
                session.role, segment
            );
            return Box::pin(redirect(req, "/dashboard"));
        }

        req.extensions_mut().insert(session);

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

// First path segment after /dashboard, empty for the dashboard root
fn dashboard_segment(path: &str) -> &str {
    path.strip_prefix("/dashboard")
        .unwrap_or("")
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or("")
}

async fn redirect<B>(
    req: ServiceRequest,
    location: &'static str,
) -> Result<ServiceResponse<EitherBody<B>>, ActixError> {
    let (req, _payload) = req.into_parts();
    let response = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
        .map_into_right_body();
    Ok(ServiceResponse::new(req, response))
}
