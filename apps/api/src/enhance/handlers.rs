use axum::{extract::State, Json};
use serde::Deserialize;

use crate::document::mutators::{entry_description, EntryList};
use crate::enhance::apply::{commit_enhancement, EnhanceOutcome, EnhanceTarget};
use crate::enhance::prompts::{DEFAULT_ROLE, DEFAULT_SKILLS};
use crate::errors::AppError;
use crate::layout::blocks::optional;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SummaryRequest {
    pub role: Option<String>,
    /// Overrides the document's skills.
    pub skills: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    pub list: EntryList,
    pub id: String,
}

/// POST /api/v1/enhance/summary
pub async fn handle_enhance_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<EnhanceOutcome>, AppError> {
    let doc = state.session.read().await.snapshot();
    let role = req
        .role
        .as_deref()
        .and_then(optional)
        .unwrap_or_else(|| DEFAULT_ROLE.to_string());
    let skills = req
        .skills
        .as_deref()
        .and_then(optional)
        .or_else(|| optional(&doc.skills))
        .unwrap_or_else(|| DEFAULT_SKILLS.to_string());

    let result = state.enhancer.summarize(&role, &skills).await?;
    let outcome = commit_enhancement(&state.session, EnhanceTarget::Summary, result).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/enhance/description
pub async fn handle_enhance_description(
    State(state): State<AppState>,
    Json(req): Json<DescriptionRequest>,
) -> Result<Json<EnhanceOutcome>, AppError> {
    let doc = state.session.read().await.snapshot();
    let text = entry_description(&doc, req.list, &req.id)
        .ok_or_else(|| AppError::NotFound(format!("No {} entry with id '{}'", req.list, req.id)))?
        .trim()
        .to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "Description is empty; write something to refine first".to_string(),
        ));
    }

    let result = state.enhancer.refine(&text).await?;
    let target = EnhanceTarget::Description {
        list: req.list,
        id: req.id,
    };
    let outcome = commit_enhancement(&state.session, target, result).await?;
    Ok(Json(outcome))
}
