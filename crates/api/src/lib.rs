//! # Mentorbook API
//!
//! Web server for the mentorbook booking service. It exposes mentor
//! profiles, availability windows, free slots and session bookings as JSON
//! endpoints.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract the request and call the [`MentorshipService`]
//! - **Middleware**: Actor identity and error-to-response mapping
//! - **Config**: Environment-driven server and scheduling configuration
//!
//! The router never touches the database directly; persistence is behind
//! the service's ports, so the same router runs over PostgreSQL or the
//! in-memory store.

/// Configuration module for API settings
pub mod config;
/// Request handlers that delegate to the service
pub mod handlers;
/// Actor extraction and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use mentorbook_core::service::MentorshipService;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub service: MentorshipService,
    clock: Clock,
}

impl ApiState {
    pub fn new(service: MentorshipService) -> Self {
        Self::with_clock(service, Arc::new(Utc::now))
    }

    /// State with a fixed notion of "now", for reproducible responses.
    pub fn with_clock(service: MentorshipService, clock: Clock) -> Self {
        Self { service, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: ApiState) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Mentor profile endpoints
        .merge(routes::mentor::routes())
        // Availability windows and free slots
        .merge(routes::availability::routes())
        // Session booking endpoints
        .merge(routes::booking::routes())
        .with_state(Arc::new(state))
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise everything at `level` and above
/// is printed.
pub fn init_tracing(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize tracing: {}", e))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(middleware::auth::ACTOR_HEADER),
        ])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and service
///
/// Tracing must already be initialized (see [`init_tracing`]).
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `service` - Booking service wired to its persistence ports
pub async fn start_server(config: config::ApiConfig, service: MentorshipService) -> Result<()> {
    let mut router = app(ApiState::new(service));

    // Apply CORS configuration if origins are specified
    if let Some(origins) = &config.cors_origins {
        router = router.layer(cors_layer(origins));
    }

    let router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
