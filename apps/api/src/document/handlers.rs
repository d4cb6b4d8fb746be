use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::document::mutators::DocumentEdit;
use crate::document::order::MoveDirection;
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::models::section::{SectionKey, SectionOrder};
use crate::state::AppState;

#[derive(Serialize)]
pub struct DocumentResponse {
    pub revision: u64,
    pub document: ResumeData,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStatus {
    pub key: SectionKey,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsResponse {
    pub revision: u64,
    pub sections: Vec<SectionStatus>,
    /// False once the user has reordered anything; drives the "reset order" control.
    pub is_default: bool,
}

impl SectionsResponse {
    fn new(order: &SectionOrder, revision: u64) -> Self {
        Self {
            revision,
            sections: order
                .iter()
                .map(|key| SectionStatus {
                    key,
                    can_move_up: order.can_move_up(key),
                    can_move_down: order.can_move_down(key),
                })
                .collect(),
            is_default: order.is_default(),
        }
    }
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<DocumentResponse> {
    let session = state.session.read().await;
    Json(DocumentResponse {
        revision: session.revision(),
        document: (*session.snapshot()).clone(),
    })
}

/// PUT /api/v1/document
pub async fn handle_replace_document(
    State(state): State<AppState>,
    Json(document): Json<ResumeData>,
) -> Result<Json<DocumentResponse>, AppError> {
    let mut session = state.session.write().await;
    let snapshot = session.replace(document)?;
    Ok(Json(DocumentResponse {
        revision: session.revision(),
        document: (*snapshot).clone(),
    }))
}

/// POST /api/v1/document/reset
pub async fn handle_reset_document(
    State(state): State<AppState>,
) -> Result<Json<DocumentResponse>, AppError> {
    let mut session = state.session.write().await;
    let snapshot = session.replace(ResumeData::default())?;
    info!("Document reset to blank starter");
    Ok(Json(DocumentResponse {
        revision: session.revision(),
        document: (*snapshot).clone(),
    }))
}

/// POST /api/v1/document/edits
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Json(edit): Json<DocumentEdit>,
) -> Result<Json<DocumentResponse>, AppError> {
    let mut session = state.session.write().await;
    let snapshot = session.apply(edit)?;
    Ok(Json(DocumentResponse {
        revision: session.revision(),
        document: (*snapshot).clone(),
    }))
}

/// GET /api/v1/document/sections
pub async fn handle_get_sections(State(state): State<AppState>) -> Json<SectionsResponse> {
    let session = state.session.read().await;
    Json(SectionsResponse::new(
        &session.snapshot().section_order(),
        session.revision(),
    ))
}

/// POST /api/v1/document/sections/:key/:direction
///
/// An unrecognised key leaves the order unchanged.
pub async fn handle_move_section(
    State(state): State<AppState>,
    Path((key, direction)): Path<(String, MoveDirection)>,
) -> Result<Json<SectionsResponse>, AppError> {
    let mut session = state.session.write().await;
    match SectionKey::parse(&key) {
        Some(key) => {
            session.apply(DocumentEdit::MoveSection { key, direction })?;
        }
        None => debug!(key = %key, "Ignoring move of unknown section"),
    }
    Ok(Json(SectionsResponse::new(
        &session.snapshot().section_order(),
        session.revision(),
    )))
}

/// POST /api/v1/document/sections/reset
pub async fn handle_reset_sections(
    State(state): State<AppState>,
) -> Result<Json<SectionsResponse>, AppError> {
    let mut session = state.session.write().await;
    session.apply(DocumentEdit::ResetSectionOrder)?;
    Ok(Json(SectionsResponse::new(
        &session.snapshot().section_order(),
        session.revision(),
    )))
}
