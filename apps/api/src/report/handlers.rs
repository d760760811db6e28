//! Axum route handler for report downloads.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::evaluation::EvaluationResult;
use crate::report::{compose_report, REPORT_FILE_NAME};

/// POST /api/v1/reports
///
/// Renders a previously returned EvaluationResult as a Markdown attachment.
pub async fn handle_render_report(Json(result): Json<EvaluationResult>) -> Response {
    info!(evaluation_id = %result.evaluation_id, "Rendering evaluation report");
    let markdown = compose_report(&result).to_markdown();

    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        markdown,
    )
        .into_response()
}
