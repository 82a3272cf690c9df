//! Status check endpoints.

use axum::Json;
use serde::Serialize;

/// Payload of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub const WORKING: &'static str = "API is working";
}

/// GET /api/status: reports that the API is up. Any request body is ignored.
pub async fn check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: StatusResponse::WORKING,
    })
}

/// Payload of the legacy `GET /status` route.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub uptime: &'static str,
}

/// GET /status: legacy service status.
pub async fn service() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "running",
        uptime: "100%",
    })
}
