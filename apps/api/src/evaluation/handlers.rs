//! Axum route handlers for the Evaluation API.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::standards::EXTRACTION_NOTICE;
use crate::evaluation::{
    EvaluationResult, EvaluationStrategy, FixedPolicyEvaluator, Proposal, ReferenceEvaluator,
    RequiredSectionSet, StylePolicy,
};
use crate::extraction::{parse_document, TextExtractor};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StandardsResponse {
    pub sections: RequiredSectionSet,
    pub style: StylePolicy,
}

#[derive(Debug, Serialize)]
pub struct ExtractStandardsResponse {
    pub sections: RequiredSectionSet,
    pub notice: &'static str,
}

/// One multipart part, buffered in memory.
struct UploadPart {
    file_name: Option<String>,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/standards
///
/// Returns the fixed organizational checklist and style policy.
pub async fn handle_get_standards(State(state): State<AppState>) -> Json<StandardsResponse> {
    Json(StandardsResponse {
        sections: state.standard_sections.as_ref().clone(),
        style: state.style.as_ref().clone(),
    })
}

/// POST /api/v1/standards/extract
///
/// Multipart: `reference` (file). Previews the checklist mined from a reference document.
pub async fn handle_extract_standards(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractStandardsResponse>, AppError> {
    let mut parts = read_parts(multipart).await?;
    let reference = take_part(&mut parts, "reference")?;
    let text = extract_text(state.extractor, reference).await?;
    let sections = RequiredSectionSet::from_reference(&text)?;
    info!("Derived {} sections from reference document", sections.len());

    Ok(Json(ExtractStandardsResponse {
        sections,
        notice: EXTRACTION_NOTICE,
    }))
}

/// POST /api/v1/evaluations/fixed
///
/// Multipart: `proposal` (file) or `document` (JSON paragraph model), and an
/// optional `sections` JSON array replacing the configured checklist.
pub async fn handle_evaluate_fixed(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationResult>, AppError> {
    let mut parts = read_parts(multipart).await?;

    let sections = match parts.remove("sections") {
        Some(part) => parse_section_override(&part.bytes)?,
        None => state.standard_sections.as_ref().clone(),
    };
    let proposal = read_proposal(state.extractor, &mut parts).await?;

    let evaluator = FixedPolicyEvaluator::new(&state.style, state.spell_checker.as_ref());
    Ok(Json(evaluator.evaluate(&proposal, &sections)))
}

/// POST /api/v1/evaluations/reference
///
/// Multipart: `proposal` (file) or `document` (JSON paragraph model), and
/// `reference` (file) from which the checklist is mined.
pub async fn handle_evaluate_reference(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationResult>, AppError> {
    let mut parts = read_parts(multipart).await?;

    let reference = take_part(&mut parts, "reference")?;
    let reference_text = extract_text(state.extractor, reference).await?;
    let sections = RequiredSectionSet::from_reference(&reference_text)?;
    let proposal = read_proposal(state.extractor, &mut parts).await?;

    Ok(Json(ReferenceEvaluator.evaluate(&proposal, &sections)))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_parts(mut multipart: Multipart) -> Result<HashMap<String, UploadPart>, AppError> {
    let mut parts = HashMap::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        parts.insert(name, UploadPart { file_name, bytes });
    }
    Ok(parts)
}

fn take_part(parts: &mut HashMap<String, UploadPart>, name: &str) -> Result<UploadPart, AppError> {
    parts
        .remove(name)
        .ok_or_else(|| AppError::Validation(format!("Missing multipart part '{name}'")))
}

fn parse_section_override(bytes: &[u8]) -> Result<RequiredSectionSet, AppError> {
    let labels: Vec<String> = serde_json::from_slice(bytes).map_err(|e| {
        AppError::Validation(format!("'sections' must be a JSON array of strings: {e}"))
    })?;
    Ok(RequiredSectionSet::new(labels)?)
}

/// A `document` part wins over a `proposal` file.
async fn read_proposal(
    extractor: TextExtractor,
    parts: &mut HashMap<String, UploadPart>,
) -> Result<Proposal, AppError> {
    if let Some(part) = parts.remove("document") {
        return Ok(Proposal::from_document(parse_document(&part.bytes)?));
    }
    let part = parts.remove("proposal").ok_or_else(|| {
        AppError::Validation("Upload a 'proposal' file or a 'document' model".to_string())
    })?;
    let file_name = upload_file_name(&part, "proposal")?;
    info!("Evaluating upload '{file_name}' ({} bytes)", part.bytes.len());

    // PDF extraction is CPU-bound; run it off the async executor.
    tokio::task::spawn_blocking(move || extractor.extract_proposal(&file_name, &part.bytes))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "spawn_blocking failed extracting proposal: {e}"
            ))
        })?
        .map_err(AppError::from)
}

async fn extract_text(extractor: TextExtractor, part: UploadPart) -> Result<String, AppError> {
    let file_name = upload_file_name(&part, "reference")?;
    tokio::task::spawn_blocking(move || extractor.extract_text(&file_name, &part.bytes))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "spawn_blocking failed extracting reference: {e}"
            ))
        })?
        .map_err(AppError::from)
}

fn upload_file_name(part: &UploadPart, name: &str) -> Result<String, AppError> {
    part.file_name
        .clone()
        .ok_or_else(|| AppError::Validation(format!("Part '{name}' must be a file upload")))
}
