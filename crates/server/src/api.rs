use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use conveyor_common::{job::Job, queue::JobQueue};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/*
    Ingress
    HTTP boundary of the processor. Validates the request, synthesizes a job with a
    fresh time-derived id and attempts a non-blocking enqueue. A full queue surfaces
    to the client as 503 backpressure, never as buffering or waiting.
    The router is built once at startup and handed to the listener.
*/

#[derive(Debug, Clone)]
pub struct ServerState {
    pub queue: Arc<JobQueue>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/enqueue", get(enqueue_handler).post(enqueue_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct EnqueueParams {
    payload: Option<String>,
}

pub async fn enqueue_handler(
    State(state): State<ServerState>,
    Query(params): Query<EnqueueParams>,
) -> Result<String, IngressError> {
    let payload = match params.payload.as_deref() {
        None | Some("") => return Err(IngressError::MissingPayload),
        Some(payload) => payload,
    };

    let job = Job::new(Job::time_derived_id(), payload);
    let job_id = job.id;
    if !state.queue.enqueue(job) {
        warn!("Rejected job {}: queue is at capacity", job_id);
        return Err(IngressError::QueueFull);
    }

    info!("Enqueued job {}", job_id);
    Ok(format!("Job {} enqueued\n", job_id))
}

#[derive(Debug, Serialize)]
pub struct QueueStats {
    pub queued: usize,
    pub capacity: usize,
    pub closed: bool,
}

pub async fn stats_handler(State(state): State<ServerState>) -> Json<QueueStats> {
    Json(QueueStats {
        queued: state.queue.len(),
        capacity: state.queue.capacity(),
        closed: state.queue.is_closed(),
    })
}

#[derive(Error, Debug)]
pub enum IngressError {
    /// Request carried no usable payload; no job was created.
    #[error("Missing payload")]
    MissingPayload,

    /// Bounded queue is at capacity (or closed); explicit backpressure to the caller.
    #[error("Job queue is full")]
    QueueFull,
}

impl IngressError {
    fn status(&self) -> StatusCode {
        match self {
            IngressError::MissingPayload => StatusCode::BAD_REQUEST,
            IngressError::QueueFull => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for IngressError {
    fn into_response(self) -> Response {
        (self.status(), format!("{}\n", self)).into_response()
    }
}
