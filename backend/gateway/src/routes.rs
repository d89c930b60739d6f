//! API route handlers.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tracing::{info, warn};

use glowcheck_core::{ImageInput, ImageSource, PhaseEvent};
use glowcheck_markdown::{excerpt, render_html};
use glowcheck_media::{decode_image, resize_for_display};

use crate::server::GatewayState;

/// Liveness endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "glowcheck",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// `POST /api/preview` — body: raw image bytes; returns a resized PNG for
/// display, or 400 if the image cannot be decoded.
pub async fn preview(
    body: Bytes,
) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), (StatusCode, Json<Value>)> {
    let img = decode_image(&body).map_err(|e| {
        warn!(error = %e, "preview rejected");
        bad_request(e.to_string())
    })?;
    let png = resize_for_display(&img).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    #[serde(default)]
    pub source: Option<String>,
}

/// `POST /api/analyze?source=upload|camera` — body: raw image bytes.
///
/// Rejects undecodable input up front, then runs the pipeline on its own
/// task and streams phase events back as SSE. Closing the response stream
/// stops the pipeline at the next phase boundary.
pub async fn analyze(
    State(state): State<GatewayState>,
    Query(params): Query<AnalyzeParams>,
    body: Bytes,
) -> Result<
    Sse<impl Stream<Item = Result<SseEvent, Infallible>>>,
    (StatusCode, Json<Value>),
> {
    // Decode up front so a bad payload is a 400, not a failed stream.
    decode_image(&body).map_err(|e| {
        warn!(error = %e, "analysis rejected at upload");
        bad_request(e.to_string())
    })?;

    let source = ImageSource::from_tag(params.source.as_deref().unwrap_or("upload"));
    let image = ImageInput::new(body, source);
    info!(?source, bytes = image.bytes.len(), "starting analysis request");

    let (tx, rx) = mpsc::channel::<PhaseEvent>(16);
    let orchestrator = state.orchestrator.clone();
    tokio::spawn(async move {
        orchestrator.run(image, tx).await;
    });

    let stream = ReceiverStream::new(rx)
        .map(|event| Ok(event_to_sse(&event)));

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Map a pipeline event onto an SSE frame. Completed phases additionally
/// carry the server-rendered HTML so the page can inject it directly.
fn event_to_sse(event: &PhaseEvent) -> SseEvent {
    SseEvent::default()
        .event(event.kind())
        .data(event_json(event).to_string())
}

fn event_json(event: &PhaseEvent) -> Value {
    let mut value = serde_json::to_value(event).unwrap_or_else(|_| json!({}));
    if let PhaseEvent::PhaseCompleted { phase, content, .. } = event {
        info!(%phase, report = %excerpt(content, 120), "phase report ready");
        value["html"] = Value::String(render_html(content));
        value["label"] = Value::String(phase.label().to_string());
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcheck_core::{FailedStage, Phase};
    use uuid::Uuid;

    #[test]
    fn completed_event_json_carries_rendered_html_and_label() {
        let event = PhaseEvent::PhaseCompleted {
            session_id: Uuid::new_v4(),
            phase: Phase::IngredientAnalysis,
            content: "# Glycerin\n\n*humectant*".into(),
            produced_at: chrono::Utc::now(),
        };
        let json = event_json(&event);
        assert_eq!(json["type"], "phase_completed");
        assert_eq!(json["label"], "Ingredient Analysis");
        let html = json["html"].as_str().unwrap();
        assert!(html.contains("<h1>Glycerin</h1>"));
        assert!(html.contains("<em>humectant</em>"));
    }

    #[test]
    fn failed_event_json_names_the_stage() {
        let event = PhaseEvent::AnalysisFailed {
            session_id: Uuid::new_v4(),
            stage: FailedStage::Phase(Phase::HealthAssessment),
            message: "rate limited".into(),
        };
        let json = event_json(&event);
        assert_eq!(json["type"], "analysis_failed");
        assert_eq!(json["stage"]["phase"], "health_assessment");
        assert!(json.get("html").is_none());
    }

    #[test]
    fn source_tag_parsing_defaults_to_upload() {
        assert_eq!(ImageSource::from_tag("camera"), ImageSource::Camera);
        assert_eq!(ImageSource::from_tag("anything"), ImageSource::Upload);
    }
}
