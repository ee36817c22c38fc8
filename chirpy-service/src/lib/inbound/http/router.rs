use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::AuthorizationGuard;
use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::metrics;
use super::handlers::admin::reset;
use super::handlers::chirps::create_chirp;
use super::handlers::chirps::delete_chirp;
use super::handlers::chirps::get_chirp;
use super::handlers::chirps::list_chirps;
use super::handlers::health::healthz;
use super::handlers::login::login;
use super::handlers::refresh::refresh;
use super::handlers::refresh::revoke;
use super::handlers::users::create_user;
use super::handlers::users::update_user;
use super::handlers::webhooks::polka_webhook;
use super::metrics::count_file_server_hits;
use super::metrics::Metrics;
use super::middleware::authenticate as auth_middleware;
use crate::config::Config;
use crate::config::Platform;
use crate::domain::chirp::service::ChirpService;
use crate::domain::refresh_token::service::RefreshTokenService;
use crate::domain::session::service::SessionService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::chirp::PostgresChirpRepository;
use crate::outbound::repositories::refresh_token::PostgresRefreshTokenRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

pub type AppUserService = UserService<PostgresUserRepository>;
pub type AppChirpService = ChirpService<PostgresChirpRepository>;
pub type AppRefreshTokenService = RefreshTokenService<PostgresRefreshTokenRepository>;
pub type AppSessionService = SessionService<AppUserService, AppRefreshTokenService>;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<AppUserService>,
    pub chirp_service: Arc<AppChirpService>,
    pub refresh_token_service: Arc<AppRefreshTokenService>,
    pub session_service: Arc<AppSessionService>,
    pub guard: Arc<AuthorizationGuard>,
    pub metrics: Arc<Metrics>,
    pub platform: Platform,
}

impl AppState {
    /// Wire services, signing secret and webhook key from startup config.
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let jwt_handler = JwtHandler::new(config.jwt.secret.as_bytes());
        let authenticator = Arc::new(Authenticator::new(
            jwt_handler.clone(),
            config.access_token_ttl(),
        ));

        let user_service = Arc::new(UserService::new(Arc::new(PostgresUserRepository::new(
            pool.clone(),
        ))));
        let chirp_service = Arc::new(ChirpService::new(Arc::new(PostgresChirpRepository::new(
            pool.clone(),
        ))));
        let refresh_token_service = Arc::new(RefreshTokenService::new(
            Arc::new(PostgresRefreshTokenRepository::new(pool)),
            authenticator.clone(),
            config.refresh_token_ttl(),
            config.store_timeout(),
        ));
        let session_service = Arc::new(SessionService::new(
            user_service.clone(),
            refresh_token_service.clone(),
            authenticator,
        ));

        Self {
            user_service,
            chirp_service,
            refresh_token_service,
            session_service,
            guard: Arc::new(AuthorizationGuard::new(
                jwt_handler,
                config.polka.api_key.clone(),
            )),
            metrics: Arc::new(Metrics::new()),
            platform: config.platform,
        }
    }
}

pub fn create_router(state: AppState, file_server_root: impl AsRef<Path>) -> Router {
    let authenticated = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    let api_routes = Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
        .route("/api/polka/webhooks", post(polka_webhook))
        .route(
            "/api/users",
            post(create_user).merge(put(update_user).route_layer(authenticated())),
        )
        .route(
            "/api/chirps",
            get(list_chirps).merge(post(create_chirp).route_layer(authenticated())),
        )
        .route(
            "/api/chirps/:chirp_id",
            get(get_chirp).merge(delete(delete_chirp).route_layer(authenticated())),
        );

    let admin_routes = Router::new()
        .route("/admin/metrics", get(metrics))
        .route("/admin/reset", post(reset));

    let file_server = Router::new()
        .nest_service("/app", ServeDir::new(file_server_root))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            count_file_server_hits,
        ));

    // Headers are left out of the span: they carry bearer tokens and API keys.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(api_routes)
        .merge(admin_routes)
        .merge(file_server)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
