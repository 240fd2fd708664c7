//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::auth::JwtVerifier;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::mobile_sync::get_mobile_sync;
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    verifier: web::Data<JwtVerifier>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        verifier,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(verifier)
        .wrap(Trace)
        .service(get_mobile_sync)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        verifier,
        sync_zone: _,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let verifier = web::Data::new(verifier);

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            verifier: verifier.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::{fixture, rstest};

    #[fixture]
    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::default()),
            verifier: web::Data::new(JwtVerifier::from_secret(b"server-test-secret")),
        }
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready() {
        let health_state = web::Data::new(HealthState::new());
        assert!(!health_state.is_ready(), "state should start unready");

        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("loopback address"),
            JwtVerifier::from_secret(b"server-test-secret"),
        );
        let _server = create_server(health_state.clone(), config).expect("server should build");

        assert!(health_state.is_ready(), "server creation should mark readiness");
    }

    #[rstest]
    #[actix_rt::test]
    async fn sync_route_requires_a_bearer_token(deps: AppDependencies) {
        let app = actix_test::init_service(build_app(deps)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/mobile/sync").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_rt::test]
    async fn liveness_probe_is_routed(deps: AppDependencies) {
        let app = actix_test::init_service(build_app(deps)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
