//! Writing gateway results back into the session.
//!
//! The gateway call happens with no lock held. Its result is applied afterwards as an
//! ordinary edit, so it lands last-writer-wins against whatever the user typed in the
//! meantime. A result whose target entry has since been removed is dropped.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::document::mutators::{entry_description, set_description, EntryList};
use crate::document::{DocumentEdit, EditError, EditorSession};
use crate::enhance::Enhancement;

/// The field a gateway result is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum EnhanceTarget {
    Summary,
    Description { list: EntryList, id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnhanceOutcome {
    /// Whether the document changed.
    pub applied: bool,
    pub text: Option<String>,
    /// Human-readable message when the gateway is not configured.
    pub notice: Option<String>,
    pub revision: u64,
}

pub async fn commit_enhancement(
    session: &RwLock<EditorSession>,
    target: EnhanceTarget,
    result: Enhancement,
) -> Result<EnhanceOutcome, EditError> {
    let mut session = session.write().await;

    let text = match result {
        Enhancement::Unavailable { message } => {
            return Ok(EnhanceOutcome {
                applied: false,
                text: None,
                notice: Some(message),
                revision: session.revision(),
            });
        }
        Enhancement::Generated(text) => text.trim().to_string(),
    };

    if text.is_empty() {
        debug!(?target, "Gateway returned empty text; field left unchanged");
        return Ok(EnhanceOutcome {
            applied: false,
            text: None,
            notice: None,
            revision: session.revision(),
        });
    }

    let edit = match &target {
        EnhanceTarget::Summary => DocumentEdit::SetSummary {
            value: text.clone(),
        },
        EnhanceTarget::Description { list, id } => {
            if entry_description(&session.snapshot(), *list, id).is_none() {
                info!(%list, id = %id, "Entry removed before enhancement finished; result dropped");
                return Ok(EnhanceOutcome {
                    applied: false,
                    text: Some(text),
                    notice: None,
                    revision: session.revision(),
                });
            }
            set_description(*list, id.clone(), text.clone())
        }
    };

    let before = session.revision();
    session.apply(edit)?;
    info!(?target, revision = session.revision(), "Enhancement applied");

    Ok(EnhanceOutcome {
        applied: session.revision() != before,
        text: Some(text),
        notice: None,
        revision: session.revision(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, ResumeData};

    fn make_session() -> RwLock<EditorSession> {
        let mut doc = ResumeData::default();
        doc.summary = "Old summary".to_string();
        doc.experience = vec![Experience {
            description: "• Did work".to_string(),
            ..Experience::new("e1")
        }];
        RwLock::new(EditorSession::new(doc))
    }

    #[tokio::test]
    async fn test_unavailable_leaves_document_untouched() {
        let session = make_session();
        let outcome = commit_enhancement(
            &session,
            EnhanceTarget::Summary,
            Enhancement::Unavailable {
                message: "offline".to_string(),
            },
        )
        .await
        .unwrap();

        assert!(!outcome.applied);
        assert_eq!(outcome.notice.as_deref(), Some("offline"));
        let guard = session.read().await;
        assert_eq!(guard.snapshot().summary, "Old summary");
        assert_eq!(guard.revision(), 0);
    }

    #[tokio::test]
    async fn test_empty_result_is_noop() {
        let session = make_session();
        let outcome = commit_enhancement(
            &session,
            EnhanceTarget::Summary,
            Enhancement::Generated("   ".to_string()),
        )
        .await
        .unwrap();

        assert!(!outcome.applied);
        assert_eq!(session.read().await.snapshot().summary, "Old summary");
    }

    #[tokio::test]
    async fn test_generated_summary_is_written() {
        let session = make_session();
        let outcome = commit_enhancement(
            &session,
            EnhanceTarget::Summary,
            Enhancement::Generated(" New summary ".to_string()),
        )
        .await
        .unwrap();

        assert!(outcome.applied);
        assert_eq!(outcome.revision, 1);
        assert_eq!(session.read().await.snapshot().summary, "New summary");
    }

    #[tokio::test]
    async fn test_description_written_to_target_entry() {
        let session = make_session();
        let target = EnhanceTarget::Description {
            list: EntryList::Experience,
            id: "e1".to_string(),
        };
        commit_enhancement(&session, target, Enhancement::Generated("• Led work".to_string()))
            .await
            .unwrap();
        assert_eq!(
            session.read().await.snapshot().experience[0].description,
            "• Led work"
        );
    }

    #[tokio::test]
    async fn test_removed_entry_drops_result() {
        let session = make_session();
        session
            .write()
            .await
            .apply(DocumentEdit::RemoveEntry {
                list: EntryList::Experience,
                id: "e1".to_string(),
            })
            .unwrap();

        let outcome = commit_enhancement(
            &session,
            EnhanceTarget::Description {
                list: EntryList::Experience,
                id: "e1".to_string(),
            },
            Enhancement::Generated("• Led work".to_string()),
        )
        .await
        .unwrap();

        assert!(!outcome.applied);
        assert_eq!(outcome.revision, 1);
        assert!(session.read().await.snapshot().experience.is_empty());
    }

    #[tokio::test]
    async fn test_later_user_edit_wins_over_earlier_snapshot() {
        let session = make_session();
        commit_enhancement(
            &session,
            EnhanceTarget::Summary,
            Enhancement::Generated("Generated".to_string()),
        )
        .await
        .unwrap();
        session
            .write()
            .await
            .apply(DocumentEdit::SetSummary {
                value: "Typed later".to_string(),
            })
            .unwrap();
        assert_eq!(session.read().await.snapshot().summary, "Typed later");
    }
}
