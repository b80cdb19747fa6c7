//! Actix Web server exposing the waypoint store, the map overlay and the
//! notification bridge.
//!
//! Handlers share one `ServerState` across workers; the waypoint list and the
//! overlay each sit behind their own mutex. A waypoint update holds the store
//! lock while it redraws the overlay, so the lock order is always store then
//! overlay.

use std::sync::{Arc, Mutex};

use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer,
    error::InternalError,
    http::{Method, header},
    middleware::DefaultHeaders,
    web::{self, Bytes},
};
use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use overlay::{OverlayController, OverlayOptions, ValidationMode};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    bridge,
    config::ServerConfig,
    data::{
        BoatResponse, BoatUpdate, ClearResponse, MessageResponse, OverlaySnapshot, SharedOverlay,
        SharedWaypoints, WindObservation, WindResponse,
    },
    feed, html, telemetry,
    waypoints::WaypointStore,
};

/// Shared state backing HTTP handlers.
#[derive(Clone)]
pub(crate) struct ServerState {
    pub(crate) overlay: SharedOverlay,
    pub(crate) waypoints: SharedWaypoints,
    pub(crate) metrics: Option<PrometheusHandle>,
}

impl ServerState {
    pub(crate) fn new(validation: ValidationMode, metrics: Option<PrometheusHandle>) -> Self {
        let overlay: OverlayController = OverlayController::new(OverlayOptions {
            validation,
            ..OverlayOptions::default()
        });
        Self {
            overlay: Arc::new(Mutex::new(overlay)),
            waypoints: Arc::new(Mutex::new(WaypointStore::default())),
            metrics,
        }
    }
}

/// Register every route. Unmatched requests fall through to [`fallback`].
pub(crate) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = MessageResponse::new(err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .route("/", web::get().to(index_route))
    .route("/assets/{name}", web::get().to(asset_route))
    .route("/waypoints", web::post().to(replace_waypoints))
    .route("/waypoints", web::get().to(list_waypoints))
    .route("/overlay", web::get().to(overlay_snapshot))
    .route("/overlay/boat", web::post().to(update_boat))
    .route("/overlay/wind", web::post().to(add_wind_arrow))
    .route("/overlay/wind", web::delete().to(clear_wind_arrows))
    .route("/metrics", web::get().to(metrics_route));
}

pub(crate) fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, DELETE, OPTIONS"))
}

/// Start the server on the current thread and block until it exits.
pub(crate) fn run(config: ServerConfig) -> Result<()> {
    let metrics = match telemetry::init_metrics_recorder() {
        Ok(handle) => Some(handle.clone()),
        Err(err) => {
            warn!("Metrics disabled: {err:#}");
            None
        }
    };
    let state = ServerState::new(config.validation, metrics);

    actix_web::rt::System::new().block_on(async move {
        if let Some(feed_config) = config.feed.clone() {
            actix_web::rt::spawn(feed::run(feed_config, state.overlay.clone()));
        }

        let server_state = state.clone();
        let mut server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(server_state.clone()))
                .wrap(cors_headers())
                .configure(routes)
                .default_service(web::to(fallback))
        });
        if let Some(workers) = config.workers {
            server = server.workers(workers);
        }
        let server = server
            .bind((config.host.as_str(), config.port))
            .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
            .run();

        info!("Server running at http://{}:{}", config.host, config.port);
        server.await.context("HTTP server error")
    })
}

/// CORS preflight, bridge interception, or 404.
async fn fallback(req: HttpRequest, body: Bytes) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::NoContent().finish();
    }
    if bridge::intercepts(req.path()) {
        return bridge::handle(&req, &body);
    }
    HttpResponse::NotFound().json(MessageResponse::new("Not found"))
}

fn poisoned(err: impl std::fmt::Display) -> HttpResponse {
    error!("shared state poisoned: {err}");
    HttpResponse::InternalServerError().json(MessageResponse::new(err.to_string()))
}

/// Serve the live map page.
async fn index_route() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html::map::MAP_INDEX_HTML)
}

async fn asset_route(name: web::Path<String>) -> HttpResponse {
    match html::icons::lookup(&name) {
        Some(svg) => HttpResponse::Ok()
            .content_type("image/svg+xml")
            .append_header(("Cache-Control", "max-age=3600"))
            .body(svg),
        None => HttpResponse::NotFound().json(MessageResponse::new("Not found")),
    }
}

/// Replace the stored waypoint list and mirror coordinate entries on the map.
async fn replace_waypoints(body: Bytes, state: web::Data<ServerState>) -> HttpResponse {
    let payload = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);

    let mut store = match state.waypoints.lock() {
        Ok(guard) => guard,
        Err(err) => return poisoned(err),
    };
    match store.replace(payload) {
        Ok(count) => info!("Stored {count} waypoints"),
        Err(err) => {
            metrics::counter!("waypoints_rejected_total").increment(1);
            warn!("Rejected waypoint update: {err}");
            return HttpResponse::BadRequest().json(MessageResponse::new(err.to_string()));
        }
    }
    metrics::counter!("waypoints_replaced_total").increment(1);

    // Redraw under the store lock so the overlay always matches the stored list.
    match state.overlay.lock() {
        Ok(mut overlay) => {
            if let Err(err) = overlay.sync_waypoints(&store.coordinates()) {
                warn!("Waypoints stored but not drawn: {err}");
            }
        }
        Err(err) => return poisoned(err),
    }

    HttpResponse::Ok().json(MessageResponse::new("Waypoints updated successfully"))
}

async fn list_waypoints(state: web::Data<ServerState>) -> HttpResponse {
    match state.waypoints.lock() {
        Ok(store) => HttpResponse::Ok().json(store.list()),
        Err(err) => poisoned(err),
    }
}

/// Boat state plus everything on the map surface, for the browser page.
async fn overlay_snapshot(state: web::Data<ServerState>) -> HttpResponse {
    let overlay = match state.overlay.lock() {
        Ok(guard) => guard,
        Err(err) => return poisoned(err),
    };
    HttpResponse::Ok()
        .append_header(("Cache-Control", "no-cache"))
        .json(OverlaySnapshot {
            boat: overlay.boat(),
            surface: overlay.surface().snapshot(),
        })
}

async fn update_boat(
    update: web::Json<BoatUpdate>,
    state: web::Data<ServerState>,
) -> HttpResponse {
    let mut overlay = match state.overlay.lock() {
        Ok(guard) => guard,
        Err(err) => return poisoned(err),
    };
    match overlay.update_boat(update.lat, update.lon, update.heading) {
        Ok(()) => HttpResponse::Ok().json(BoatResponse {
            boat: overlay.boat(),
        }),
        Err(err) => HttpResponse::UnprocessableEntity().json(MessageResponse::new(err.to_string())),
    }
}

async fn add_wind_arrow(
    observation: web::Json<WindObservation>,
    state: web::Data<ServerState>,
) -> HttpResponse {
    let mut overlay = match state.overlay.lock() {
        Ok(guard) => guard,
        Err(err) => return poisoned(err),
    };
    match overlay.add_wind_arrow(
        observation.lat,
        observation.lon,
        observation.direction,
        observation.speed,
    ) {
        Ok(Some(id)) => {
            metrics::counter!("wind_arrows_added_total").increment(1);
            HttpResponse::Created().json(WindResponse { id: Some(id) })
        }
        Ok(None) => {
            metrics::counter!("wind_arrows_rejected_total").increment(1);
            HttpResponse::Ok().json(WindResponse { id: None })
        }
        Err(err) => {
            metrics::counter!("wind_arrows_rejected_total").increment(1);
            HttpResponse::UnprocessableEntity().json(MessageResponse::new(err.to_string()))
        }
    }
}

async fn clear_wind_arrows(state: web::Data<ServerState>) -> HttpResponse {
    match state.overlay.lock() {
        Ok(mut overlay) => HttpResponse::Ok().json(ClearResponse {
            removed: overlay.clear_wind_arrows(),
        }),
        Err(err) => poisoned(err),
    }
}

async fn metrics_route(state: web::Data<ServerState>) -> HttpResponse {
    match &state.metrics {
        Some(handle) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(handle.render()),
        None => HttpResponse::ServiceUnavailable()
            .json(MessageResponse::new("Metrics recorder not installed")),
    }
}
