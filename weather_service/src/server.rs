//! HTTP server exposing the weather store over a REST API.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Serialize;
use tokio::{net::TcpListener, sync::oneshot};
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::WeatherError,
    model::{WeatherObservation, WeatherUpdate},
    settings::ServerConfig,
    store::WeatherStorage,
};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WeatherStorage>,
}

impl AppState {
    pub fn new(store: Arc<dyn WeatherStorage>) -> Self {
        Self { store }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    cities: usize,
}

/// Build the router with the weather routes and the middleware stack.
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    // The bare collection paths carry no city, so handlers answer 400
    // instead of the router's 404.
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/weather", get(get_weather).put(update_weather))
        .route("/api/v1/weather/", get(get_weather).put(update_weather))
        .route("/api/v1/weather/:city", get(get_weather).put(update_weather))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(config.max_request_size_bytes()))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}

fn city_from_path(path: Option<Path<String>>) -> Result<String, WeatherError> {
    match path {
        Some(Path(city)) if !city.is_empty() => Ok(city),
        _ => Err(WeatherError::MissingCity),
    }
}

/// Return the latest observation for a city.
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    path: Option<Path<String>>,
) -> Result<Json<WeatherObservation>, WeatherError> {
    let city = city_from_path(path)?;

    state
        .store
        .get(&city)
        .map(Json)
        .ok_or(WeatherError::NotFound(city))
}

/// Replace the observation for a city with the request body.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn update_weather(
    State(state): State<AppState>,
    path: Option<Path<String>>,
    body: Bytes,
) -> Result<StatusCode, WeatherError> {
    let city = city_from_path(path)?;

    let update = WeatherUpdate::from_json(&body).map_err(|e| {
        warn!(%city, "rejected update body: {}", e);
        WeatherError::InvalidBody(e.to_string())
    })?;

    let observation = update.into_observation(city.as_str(), Utc::now());
    state.store.put(&city, observation);

    info!(%city, "weather updated");
    Ok(StatusCode::NO_CONTENT)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        cities: state.store.len(),
    })
}

/// Bind to the configured address and serve until SIGINT or SIGTERM.
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind HTTP server to {addr}"))?;

    serve_with_shutdown(listener, state, config, wait_for_shutdown()).await
}

/// Serve on `listener` until `shutdown` resolves.
///
/// Once shutdown starts no new connections are accepted. In-flight
/// requests get `config.shutdown_grace_seconds` to finish and are dropped
/// after that.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    config: &ServerConfig,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state, config);
    let grace = config.shutdown_grace();

    info!("HTTP server listening on {}", listener.local_addr()?);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut handle = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut handle => {
            // Server stopped before any shutdown request.
            return joined
                .context("HTTP server task failed")?
                .context("HTTP server error");
        }
        _ = shutdown => {}
    }

    info!("Shutting down, waiting up to {:?} for in-flight requests", grace);
    let _ = stop_tx.send(());

    match drain(&mut handle, grace).await {
        Ok(()) => info!("HTTP server shutdown complete"),
        Err(e) => error!("HTTP server error during shutdown: {:#}", e),
    }
    Ok(())
}

async fn drain(
    handle: &mut tokio::task::JoinHandle<std::io::Result<()>>,
    grace: Duration,
) -> Result<()> {
    match tokio::time::timeout(grace, &mut *handle).await {
        Ok(joined) => joined
            .context("HTTP server task failed")?
            .context("HTTP server error"),
        Err(_) => {
            warn!("Grace period elapsed, abandoning in-flight requests");
            handle.abort();
            Ok(())
        }
    }
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
