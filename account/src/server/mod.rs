//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use account::Trace;
#[cfg(debug_assertions)]
use account::doc::ApiDoc;
use account::domain::SignupService;
use account::domain::ports::{FixtureTokenService, InMemoryUserService};
use account::inbound::http::signup::{json_config, sign_up};
use account::inbound::http::state::HttpState;

fn build_http_state() -> web::Data<HttpState> {
    let signup = SignupService::new(
        Arc::new(InMemoryUserService::new()),
        Arc::new(FixtureTokenService),
    );
    web::Data::new(HttpState::new(Arc::new(signup)))
}

fn build_app(
    http_state: web::Data<HttpState>,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .app_data(json_config(json_limit))
        .wrap(Trace)
        .service(sign_up);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("account")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("configure Prometheus metrics: {e}")))
}

/// Construct an Actix HTTP server from the loaded settings.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when metrics registration, binding the
/// socket or starting the server fails.
pub fn create_server(settings: &ServerSettings) -> std::io::Result<Server> {
    let http_state = build_http_state();
    let json_limit = settings.json_limit();
    #[cfg(feature = "metrics")]
    let metrics = build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(http_state.clone(), json_limit);

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics.clone());

        app
    })
    .bind(settings.bind_addr())?
    .run();

    info!(bind_addr = settings.bind_addr(), json_limit, "account server listening");
    Ok(server)
}
