//! HTTP handlers for the schedule endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use nsmu_ics_core::{GroupId, Schedule, provider::LessonsProvider};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<LessonsProvider>,
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_app() -> Router {
    let state = AppState {
        provider: Arc::new(LessonsProvider::from_env()),
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/json/all/{curse}/{group}/{spec}", get(json_all_handler))
        .route(
            "/api/json/lections/{curse}/{group}/{spec}",
            get(json_lections_handler),
        )
        .route("/api/ical/all/{curse}/{group}/{spec}", get(ical_all_handler))
        .route(
            "/api/ical/lections/{curse}/{group}/{spec}",
            get(ical_lections_handler),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "NSMU Schedule Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "NSMU web schedule as JSON and iCalendar",
        "endpoints": {
            "health": "/health",
            "json": "/api/json/{all|lections}/{curse}/{group}/{spec}",
            "ical": "/api/ical/{all|lections}/{curse}/{group}/{spec}"
        }
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// All lessons of a group as JSON.
async fn json_all_handler(
    Path((curse, group, spec)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> Json<Schedule> {
    let group_id = group_id_from_path(&curse, &group, &spec);
    Json(state.provider.get_lessons(&group_id).await)
}

/// Lections of a group as JSON.
async fn json_lections_handler(
    Path((curse, group, spec)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> Json<Schedule> {
    let group_id = group_id_from_path(&curse, &group, &spec);
    Json(state.provider.get_lections(&group_id).await)
}

/// All lessons of a group as an iCalendar document.
async fn ical_all_handler(
    Path((curse, group, spec)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let group_id = group_id_from_path(&curse, &group, &spec);
    let schedule = state.provider.get_lessons(&group_id).await;
    calendar_response(&schedule)
}

/// Lections of a group as an iCalendar document.
async fn ical_lections_handler(
    Path((curse, group, spec)): Path<(String, String, String)>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let group_id = group_id_from_path(&curse, &group, &spec);
    let schedule = state.provider.get_lections(&group_id).await;
    calendar_response(&schedule)
}

fn group_id_from_path(curse: &str, group: &str, spec: &str) -> GroupId {
    tracing::info!(curse, group, spec, "schedule request");
    GroupId::from_parts(curse, group, spec)
}

fn calendar_response(schedule: &Schedule) -> (StatusCode, [(&'static str, &'static str); 1], String) {
    (
        StatusCode::OK,
        [("Content-Type", "text/calendar; charset=utf-8")],
        schedule.to_calendar_text(),
    )
}
