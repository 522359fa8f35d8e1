//! HTTP handlers for resume analysis.
//!
//! `handle_analyze` streams NDJSON progress lines while the pipeline runs in
//! a spawned task; `handle_parse_resume` is the synchronous extract-and-parse
//! subset for callers that only want structured resume data.

use axum::{
    body::Body,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use futures::StreamExt;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::info;

use crate::analyze::pipeline;
use crate::analyze::progress::ProgressEvent;
use crate::errors::AppError;
use crate::models::resume::ParsedResume;
use crate::state::AppState;

const PROGRESS_CHANNEL_CAPACITY: usize = 32;

struct ResumeUpload {
    filename: String,
    bytes: Bytes,
}

async fn read_resume_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let filename = field
            .file_name()
            .unwrap_or("resume.pdf")
            .to_string();
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(
                "Only PDF resumes are supported".to_string(),
            ));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }
        return Ok(ResumeUpload { filename, bytes });
    }

    Err(AppError::Validation(
        "No resume file provided".to_string(),
    ))
}

/// POST /api/v1/analyze — runs the full pipeline, streaming one JSON object
/// per line: progress events, then a terminal result or error event.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_resume_upload(multipart).await?;
    info!(filename = %upload.filename, size = upload.bytes.len(), "analysis requested");

    let (tx, rx) = mpsc::channel::<ProgressEvent>(PROGRESS_CHANNEL_CAPACITY);
    tokio::spawn(pipeline::run(state, upload.bytes, upload.filename, tx));

    let lines = ReceiverStream::new(rx).map(|event| {
        let mut line = serde_json::to_string(&event).unwrap_or_else(|_| {
            r#"{"type":"error","error":"failed to serialize event"}"#.to_string()
        });
        line.push('\n');
        Ok::<Bytes, Infallible>(Bytes::from(line))
    });

    Ok((
        [
            (header::CONTENT_TYPE, "application/x-ndjson"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(lines),
    )
        .into_response())
}

/// POST /api/v1/parse-resume — extracts text and returns the parsed resume
/// without the search, market, or analysis stages.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let upload = read_resume_upload(multipart).await?;
    info!(filename = %upload.filename, size = upload.bytes.len(), "parse-only requested");

    let raw_text = state
        .pdf
        .extract_text(upload.bytes, &upload.filename)
        .await
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    if raw_text.trim().is_empty() {
        return Err(AppError::Pdf("extracted text was empty".to_string()));
    }

    let resume = super::resume_parser::parse_resume(&state.llm, &raw_text).await?;
    Ok(Json(resume))
}
