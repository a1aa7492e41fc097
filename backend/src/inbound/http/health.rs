//! Orchestration probes.
//!
//! The process moves through three phases: `Starting` until the server has
//! bound its socket, `Serving`, then `Draining` once a shutdown signal has
//! arrived. Readiness holds only while serving; liveness fails once draining
//! so load balancers stop routing before the listener closes.

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{HttpResponse, get, http::header, web};
use tracing::info;

const STARTING: u8 = 0;
const SERVING: u8 = 1;
const DRAINING: u8 = 2;

/// Lifecycle phase shared by the probes and the shutdown task.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(STARTING),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Serving`. Has no effect once draining.
    pub fn mark_ready(&self) {
        let _ = self
            .phase
            .compare_exchange(STARTING, SERVING, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Enter `Draining`.
    pub fn mark_unhealthy(&self) {
        self.phase.store(DRAINING, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.phase.load(Ordering::Acquire) == SERVING
    }

    pub fn is_alive(&self) -> bool {
        self.phase.load(Ordering::Acquire) != DRAINING
    }
}

fn probe(ok: bool) -> HttpResponse {
    let mut builder = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving requests"),
        (status = 503, description = "Starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_ready())
}

/// Liveness probe. 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is alive"),
        (status = 503, description = "Draining before shutdown")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive())
}

/// Wait for `shutdown`, fail the probes, keep serving for `grace`, then stop
/// the server gracefully.
///
/// The server should be built with signal handling disabled so this task owns
/// the shutdown sequence.
pub async fn drain_on<F>(
    shutdown: F,
    grace: Duration,
    state: web::Data<HealthState>,
    server: ServerHandle,
) where
    F: Future<Output = ()>,
{
    shutdown.await;
    state.mark_unhealthy();
    info!(grace_ms = grace.as_millis(), "shutdown requested; draining");
    tokio::time::sleep(grace).await;
    server.stop(true).await;
    info!("server stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpServer, test};
    use rstest::rstest;

    #[derive(Clone, Copy, Debug)]
    enum Phase {
        Starting,
        Serving,
        Draining,
    }

    fn state_in(phase: Phase) -> web::Data<HealthState> {
        let state = web::Data::new(HealthState::new());
        match phase {
            Phase::Starting => {}
            Phase::Serving => state.mark_ready(),
            Phase::Draining => {
                state.mark_ready();
                state.mark_unhealthy();
            }
        }
        state
    }

    #[rstest]
    #[case(Phase::Starting, StatusCode::SERVICE_UNAVAILABLE, StatusCode::OK)]
    #[case(Phase::Serving, StatusCode::OK, StatusCode::OK)]
    #[case(Phase::Draining, StatusCode::SERVICE_UNAVAILABLE, StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn probes_follow_the_phase(
        #[case] phase: Phase,
        #[case] ready_status: StatusCode,
        #[case] live_status: StatusCode,
    ) {
        let app = test::init_service(
            App::new()
                .app_data(state_in(phase))
                .service(ready)
                .service(live),
        )
        .await;

        for (uri, expected) in [("/health/ready", ready_status), ("/health/live", live_status)] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), expected, "{uri} while {phase:?}");
            assert_eq!(
                res.headers()
                    .get(header::CACHE_CONTROL)
                    .and_then(|value| value.to_str().ok()),
                Some("no-store")
            );
        }
    }

    #[rstest]
    #[::core::prelude::v1::test]
    fn draining_is_terminal() {
        let state = HealthState::new();
        state.mark_unhealthy();
        state.mark_ready();
        assert!(!state.is_ready());
        assert!(!state.is_alive());
    }

    #[actix_web::test]
    async fn shutdown_signal_fails_liveness_then_stops_the_server() {
        let state = web::Data::new(HealthState::new());
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let app_state = state.clone();
        let server = HttpServer::new(move || App::new().app_data(app_state.clone()).service(live))
            .disable_signals()
            .shutdown_timeout(1)
            .workers(1)
            .listen(listener)
            .expect("listen")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        state.mark_ready();

        let (signal, received) = tokio::sync::oneshot::channel::<()>();
        let drain = actix_web::rt::spawn(drain_on(
            async move {
                let _ = received.await;
            },
            Duration::from_millis(300),
            state.clone(),
            handle,
        ));

        let client = awc::Client::default();
        let url = format!("http://{addr}/health/live");
        let before = client.get(&url).send().await.expect("probe before signal");
        assert_eq!(before.status(), StatusCode::OK);

        signal.send(()).expect("drain task listening");
        tokio::time::sleep(Duration::from_millis(50)).await;
        let during = client.get(&url).send().await.expect("probe while draining");
        assert_eq!(during.status(), StatusCode::SERVICE_UNAVAILABLE);
        drop(client);

        drain.await.expect("drain task");
        running
            .await
            .expect("server task")
            .expect("server exits cleanly");
        assert!(!state.is_alive());
    }
}
