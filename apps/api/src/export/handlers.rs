use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::layout::handlers::TemplateQuery;
use crate::layout::projector::project;
use crate::state::AppState;

/// GET /api/v1/export
pub async fn handle_export(
    State(state): State<AppState>,
    Query(params): Query<TemplateQuery>,
) -> Result<Response, AppError> {
    let doc = state.session.read().await.snapshot();
    let template = params.template.unwrap_or(doc.theme.template);
    let tree = project(&doc, template);

    let artifact = state
        .exporter
        .export(&tree, &doc.personal_info.full_name, &state.export_options)
        .await?;

    let disposition = HeaderValue::from_str(&content_disposition(&artifact.filename))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid Content-Disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// `attachment` with an ASCII `filename` and a UTF-8 `filename*` (RFC 6266).
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect();
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
