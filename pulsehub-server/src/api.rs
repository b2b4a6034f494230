// Pulsehub Server - HTTP API for the telemetry store
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Request handlers and wire types.
//!
//! The four core operations (ingest, recent readings, statistics,
//! ingestion control) plus liveness and status endpoints. Response
//! envelopes follow the dashboard wire contract: camelCase fields and a
//! `success` flag.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use pulsehub::{NewReading, Reading, ReadingMetadata, SensorType, StoreStatistics};
use pulsehub_simulator::IngestionStatus;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =====================================================================
// Ingest
// =====================================================================

/// Ingest request body; every field optional so validation happens here,
/// not in the deserializer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub sensor_id: Option<String>,
    pub sensor_type: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    #[serde(default)]
    pub metadata: Option<ReadingMetadata>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub reading: Reading,
}

/// Accept one external reading into the store.
pub async fn ingest_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let sensor_id = request
        .sensor_id
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField("sensorId"))?;
    let sensor_type: SensorType = request
        .sensor_type
        .ok_or(ApiError::MissingField("sensorType"))?
        .parse()?;
    let value = request.value.ok_or(ApiError::MissingField("value"))?;
    let unit = request
        .unit
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField("unit"))?;
    let metadata = request.metadata.unwrap_or_default();

    let reading = state.store.write().await.add_reading(NewReading {
        sensor_id,
        sensor_type,
        value,
        unit,
        metadata,
    });

    Ok(Json(IngestResponse {
        success: true,
        reading,
    }))
}

// =====================================================================
// Recent readings
// =====================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ReadingsQuery {
    /// Maximum readings to return; zero or negative yields an empty list.
    pub limit: Option<i64>,
    /// Optional sensor type filter.
    #[serde(rename = "type")]
    pub sensor_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReadingsResponse {
    pub success: bool,
    pub count: usize,
    pub readings: Vec<Reading>,
}

/// List recent readings, newest first.
pub async fn readings_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReadingsQuery>,
) -> Result<Json<ReadingsResponse>, ApiError> {
    let filter = match query.sensor_type.as_deref() {
        Some(s) => Some(s.parse::<SensorType>()?),
        None => None,
    };
    let limit = query.limit.unwrap_or(50).max(0) as usize;

    let readings = state.store.read().await.recent_readings(limit, filter);

    Ok(Json(ReadingsResponse {
        success: true,
        count: readings.len(),
        readings,
    }))
}

// =====================================================================
// Statistics
// =====================================================================

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StoreStatistics,
}

/// Current store health statistics.
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let stats = state.store.read().await.statistics();
    Json(StatsResponse {
        success: true,
        stats,
    })
}

// =====================================================================
// Ingestion control
// =====================================================================

#[derive(Debug, Deserialize)]
pub struct ControlRequest {
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ControlResponse {
    pub success: bool,
    pub message: String,
    pub status: IngestionStatus,
}

/// Start or stop the simulated producer set.
pub async fn control_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ControlRequest>,
) -> Result<Json<ControlResponse>, ApiError> {
    let action = request.action.ok_or(ApiError::MissingField("action"))?;

    let mut controller = state.controller.write().await;
    let message = match action.as_str() {
        "start" => {
            controller.start();
            "ingestion started"
        }
        "stop" => {
            controller.stop().await;
            "ingestion stopped"
        }
        other => return Err(ApiError::InvalidAction(other.to_string())),
    };

    Ok(Json(ControlResponse {
        success: true,
        message: message.to_string(),
        status: controller.status(),
    }))
}

#[derive(Debug, Serialize)]
pub struct GeneratorStatusResponse {
    pub success: bool,
    pub status: IngestionStatus,
}

/// Read-only ingestion status.
pub async fn generator_status_handler(
    State(state): State<Arc<AppState>>,
) -> Json<GeneratorStatusResponse> {
    let status = state.controller.read().await.status();
    Json(GeneratorStatusResponse {
        success: true,
        status,
    })
}

// =====================================================================
// Liveness and status
// =====================================================================

/// Health check handler.
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Server status information.
#[derive(Debug, Serialize)]
pub struct ServerStatus {
    pub version: String,
    pub uptime_secs: u64,
    pub ingestion: IngestionStatus,
}

/// Status handler - returns JSON status information.
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<ServerStatus> {
    Json(ServerStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        ingestion: state.controller.read().await.status(),
    })
}

/// Root handler - shows a simple HTML page.
pub async fn index_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Pulsehub</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
        h1 { color: #2c3e50; }
        a { color: #3498db; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .endpoints { background: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0; }
        .endpoint { margin: 10px 0; }
        code { background: #e9ecef; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>Pulsehub</h1>
    <p>Bounded in-memory telemetry store with simulated multi-sensor ingestion.</p>

    <div class="endpoints">
        <h2>Endpoints</h2>
        <div class="endpoint"><code>POST /api/sensors/ingest</code> - Ingest one reading</div>
        <div class="endpoint"><a href="/api/sensors/readings">/api/sensors/readings</a> - Recent readings (<code>?limit=50&amp;type=temperature</code>)</div>
        <div class="endpoint"><a href="/api/sensors/stats">/api/sensors/stats</a> - Store statistics</div>
        <div class="endpoint"><code>POST /api/generator</code> - Control ingestion (<code>{"action": "start" | "stop"}</code>)</div>
        <div class="endpoint"><a href="/api/generator">/api/generator</a> - Ingestion status</div>
        <div class="endpoint"><a href="/health">/health</a> - Health check</div>
        <div class="endpoint"><a href="/status">/status</a> - Server status (JSON)</div>
    </div>

    <p>See <a href="https://github.com/zeekmartin/pulsehub">pulsehub</a> for more information.</p>
</body>
</html>"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsehub::{Quality, TelemetryStore};
    use pulsehub_simulator::{IngestionController, SensorProfile};
    use std::time::Instant;
    use tokio::sync::RwLock;

    fn test_state() -> Arc<AppState> {
        let store = Arc::new(RwLock::new(TelemetryStore::new()));
        let controller =
            IngestionController::new(Arc::clone(&store), SensorProfile::defaults()).with_seed(1);
        Arc::new(AppState {
            store,
            controller: RwLock::new(controller),
            start_time: Instant::now(),
        })
    }

    fn ingest_request(value: f64) -> IngestRequest {
        IngestRequest {
            sensor_id: Some("temp-01".to_string()),
            sensor_type: Some("temperature".to_string()),
            value: Some(value),
            unit: Some("°C".to_string()),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_ingest_returns_stored_reading() {
        let state = test_state();

        let Json(response) = ingest_handler(State(Arc::clone(&state)), Json(ingest_request(22.5)))
            .await
            .unwrap();

        assert!(response.success);
        assert!(!response.reading.id.is_empty());
        assert_eq!(response.reading.sensor_id, "temp-01");
        assert_eq!(response.reading.metadata.quality, Quality::Good);
        assert_eq!(state.store.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_ingest_missing_fields_rejected() {
        let state = test_state();

        let mut request = ingest_request(22.5);
        request.sensor_id = None;
        let err = ingest_handler(State(Arc::clone(&state)), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");

        let mut request = ingest_request(22.5);
        request.value = None;
        let err = ingest_handler(State(Arc::clone(&state)), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");

        // Nothing reached the store
        assert!(state.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_unknown_sensor_type_rejected() {
        let state = test_state();

        let mut request = ingest_request(1.0);
        request.sensor_type = Some("light".to_string());
        let err = ingest_handler(State(state), Json(request))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(err.to_string().contains("light"));
    }

    #[tokio::test]
    async fn test_readings_default_limit_and_order() {
        let state = test_state();
        for i in 0..60 {
            ingest_handler(State(Arc::clone(&state)), Json(ingest_request(i as f64)))
                .await
                .unwrap();
        }

        let Json(response) = readings_handler(State(state), Query(ReadingsQuery::default()))
            .await
            .unwrap();

        assert_eq!(response.count, 50);
        assert_eq!(response.readings[0].value, 59.0);
    }

    #[tokio::test]
    async fn test_readings_type_filter_and_negative_limit() {
        let state = test_state();
        ingest_handler(State(Arc::clone(&state)), Json(ingest_request(21.0)))
            .await
            .unwrap();

        let query = ReadingsQuery {
            limit: None,
            sensor_type: Some("humidity".to_string()),
        };
        let Json(response) = readings_handler(State(Arc::clone(&state)), Query(query))
            .await
            .unwrap();
        assert_eq!(response.count, 0);

        let query = ReadingsQuery {
            limit: Some(-5),
            sensor_type: None,
        };
        let Json(response) = readings_handler(State(Arc::clone(&state)), Query(query))
            .await
            .unwrap();
        assert_eq!(response.count, 0);

        let query = ReadingsQuery {
            limit: None,
            sensor_type: Some("infrared".to_string()),
        };
        let err = readings_handler(State(state), Query(query)).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_stats_reflect_store() {
        let state = test_state();

        let Json(response) = stats_handler(State(Arc::clone(&state))).await;
        assert_eq!(response.stats.total_readings, 0);
        assert_eq!(response.stats.active_sensors, 0);

        ingest_handler(State(Arc::clone(&state)), Json(ingest_request(22.0)))
            .await
            .unwrap();
        let Json(response) = stats_handler(State(state)).await;
        assert_eq!(response.stats.total_readings, 1);
        assert_eq!(response.stats.active_sensors, 1);
    }

    #[tokio::test]
    async fn test_control_start_and_stop() {
        let state = test_state();

        let request = ControlRequest {
            action: Some("start".to_string()),
        };
        let Json(response) = control_handler(State(Arc::clone(&state)), Json(request))
            .await
            .unwrap();
        assert!(response.status.is_running);
        assert_eq!(response.status.active_streams, 4);

        let request = ControlRequest {
            action: Some("stop".to_string()),
        };
        let Json(response) = control_handler(State(Arc::clone(&state)), Json(request))
            .await
            .unwrap();
        assert!(!response.status.is_running);
        assert_eq!(response.status.active_streams, 0);
    }

    #[tokio::test]
    async fn test_control_invalid_action_rejected() {
        let state = test_state();

        let request = ControlRequest {
            action: Some("pause".to_string()),
        };
        let err = control_handler(State(Arc::clone(&state)), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ACTION");

        let request = ControlRequest { action: None };
        let err = control_handler(State(Arc::clone(&state)), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");

        // Ingestion untouched by rejected commands
        assert!(!state.controller.read().await.status().is_running);
    }

    #[tokio::test]
    async fn test_generator_status_read_only() {
        let state = test_state();

        let Json(response) = generator_status_handler(State(Arc::clone(&state))).await;
        assert!(!response.status.is_running);
        assert_eq!(response.status.active_streams, 0);
    }
}
