use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::layout::projector::project;
use crate::layout::tree::VisualTree;
use crate::models::resume::TemplateKind;
use crate::state::AppState;

/// Optional template override; the document's theme template otherwise.
#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    pub template: Option<TemplateKind>,
}

/// GET /api/v1/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(params): Query<TemplateQuery>,
) -> Json<VisualTree> {
    let doc = state.session.read().await.snapshot();
    let template = params.template.unwrap_or(doc.theme.template);
    Json(project(&doc, template))
}
