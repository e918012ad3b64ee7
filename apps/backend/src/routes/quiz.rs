//! Quiz conversion endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use quiz_core::{parse_with, summarize, Conversion, ImageTable};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

const DOWNLOAD_FILENAME: &str = "questoes_moodle.xml";

/// GET /api/quiz/defaults
/// Returns the policy and layout applied when a request sets no overrides
pub async fn defaults(State(state): State<AppState>) -> Json<DefaultsResponse> {
    Json(DefaultsResponse {
        policy: state.config.policy.clone(),
        layout: state.config.layout.clone(),
    })
}

/// POST /api/quiz/parse
/// Returns the structured questions and summary without rendering XML
pub async fn parse(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ParseResponse>> {
    let Json(request) = payload?;
    let policy = request.policy.apply(&state.config.policy);

    let questions = parse_with(&request.text, &policy);
    let summary = summarize(&questions);

    Ok(Json(ParseResponse { questions, summary }))
}

/// POST /api/quiz/convert
pub async fn convert(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>> {
    let Json(request) = payload?;
    let conversion = run_conversion(&state, request)?;

    Ok(Json(ConvertResponse {
        xml: conversion.xml,
        total: conversion.summary.total,
        warnings: conversion.summary.warnings,
        unresolved_images: conversion.unresolved_images,
    }))
}

/// POST /api/quiz/download
/// Same as convert, but returns the document as an XML attachment
pub async fn download(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) = payload?;
    let conversion = run_conversion(&state, request)?;

    Ok((
        [
            (CONTENT_TYPE, "application/xml; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
            ),
        ],
        conversion.xml,
    ))
}

fn run_conversion(state: &AppState, request: ConvertRequest) -> Result<Conversion> {
    let images = ImageTable::try_from(request.images)?;
    let policy = request.policy.apply(&state.config.policy);
    let layout = request.layout.apply(&state.config.layout, request.shuffle);

    let conversion = quiz_core::convert(&request.text, &policy, &layout, &images);

    tracing::info!(
        questions = conversion.summary.total,
        warnings = conversion.summary.warnings.len(),
        images = images.len(),
        unresolved_images = conversion.unresolved_images.len(),
        "Converted quiz"
    );

    Ok(conversion)
}
