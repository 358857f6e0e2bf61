//! Streamed generation over Server-Sent Events (SSE)
//!
//! `POST /api/generate/stream` runs the same pipeline as `/api/generate` but
//! emits a `stage` event before each remote step, then exactly one `result`
//! or `error` event. The run executes on its own task and reports through a
//! channel; the response stream ends once the run is done.

use crate::api::generate::{GenerateRequest, GenerateResponse};
use crate::error::AppError;
use crate::pipeline::{validate_prompt, PipelineStage};
use crate::state::SharedState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde_json::json;
use tokio::sync::mpsc;

/// SSE event name for stage updates
pub const STAGE_EVENT: &str = "stage";

/// SSE event name for the final answer and image
pub const RESULT_EVENT: &str = "result";

/// SSE event name for a failed run
pub const ERROR_EVENT: &str = "error";

/// What the pipeline task reports back to the response stream
#[derive(Debug)]
enum RunEvent {
    Stage(PipelineStage),
    Finished(GenerateResponse),
    Failed(AppError),
}

impl RunEvent {
    fn into_sse(self) -> Result<Event, axum::Error> {
        match self {
            RunEvent::Stage(stage) => Event::default().event(STAGE_EVENT).json_data(json!({
                "stage": stage,
                "message": stage.message(),
            })),
            RunEvent::Finished(response) => {
                Event::default().event(RESULT_EVENT).json_data(response)
            }
            RunEvent::Failed(err) => Event::default().event(ERROR_EVENT).json_data(err.to_json()),
        }
    }
}

/// POST /api/generate/stream - Run the pipeline and stream stage updates
///
/// An empty prompt or malformed body is rejected with a plain JSON error
/// before any stream is opened, and no remote call is made.
pub async fn generate_stream(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    validate_prompt(&request.prompt)?;

    tracing::info!(
        prompt_len = request.prompt.len(),
        "Streamed generate request received"
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(run_pipeline(state, request.prompt, tx));

    use async_stream::stream;

    let stream = stream! {
        while let Some(event) = rx.recv().await {
            yield event.into_sse();
        }
    };

    Ok(Sse::new(stream).into_response())
}

/// Run one pipeline, forwarding stage updates and the outcome to `tx`
async fn run_pipeline(state: SharedState, prompt: String, tx: mpsc::UnboundedSender<RunEvent>) {
    let stage_tx = tx.clone();
    let result = state
        .pipeline
        .run_with_progress(&prompt, &move |stage| {
            tracing::debug!(stage = ?stage, "Pipeline stage started");
            // Receiver is gone when the client disconnected; the run still completes
            let _ = stage_tx.send(RunEvent::Stage(stage));
        })
        .await;

    let event = match result
        .map_err(AppError::from)
        .and_then(GenerateResponse::from_output)
    {
        Ok(response) => RunEvent::Finished(response),
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "Streamed run failed");
            RunEvent::Failed(err)
        }
    };

    let _ = tx.send(event);
}
