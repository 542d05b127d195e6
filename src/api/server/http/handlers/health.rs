use axum::{http::StatusCode, response::Json};
use serde_json::json;

use crate::core::EngineType;

pub async fn check() -> (StatusCode, Json<serde_json::Value>) {
    let engines: Vec<&str> = EngineType::ALL.iter().map(|e| e.name()).collect();
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "dbgrant",
            "version": env!("CARGO_PKG_VERSION"),
            "engines": engines,
        })),
    )
}
