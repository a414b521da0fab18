//! Liveness and readiness probes.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, web};

use crate::inbound::http::envelope::ApiEnvelope;

const READY_MESSAGE: &str = "Serviço disponível";
const UNAVAILABLE_MESSAGE: &str = "Serviço indisponível";

/// Probe flags shared between the server and the health routes.
///
/// The server starts live but not ready; it turns ready once the
/// repositories are built and unhealthy when shutdown begins.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Live, not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe_response(probe_ok: bool) -> HttpResponse {
    let (status, message) = if probe_ok {
        (StatusCode::OK, READY_MESSAGE)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE)
    };
    let mut response = ApiEnvelope::<()>::message_only(message).respond(status);
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case(false, true, "/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, true, "/health/ready", StatusCode::OK)]
    #[case(true, true, "/health/live", StatusCode::OK)]
    #[case(true, false, "/health/live", StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn probes_follow_state(
        #[case] ready_flag: bool,
        #[case] live_flag: bool,
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let state = web::Data::new(HealthState::new());
        if ready_flag {
            state.mark_ready();
        }
        if !live_flag {
            state.mark_unhealthy();
        }
        let app = actix_test::init_service(
            App::new()
                .app_data(state.clone())
                .service(super::ready)
                .service(super::live),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
    }
}
