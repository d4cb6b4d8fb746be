//! The résumé document: the single aggregate the editor mutates and the projector reads.
//!
//! Every field defaults, so partial JSON snapshots deserialize into a well-formed document
//! with blank strings and empty lists rather than failing.

use serde::{Deserialize, Serialize};

use crate::document::skills::parse_skills;
use crate::models::section::SectionOrder;

pub const DEFAULT_PRIMARY_COLOR: &str = "#111827";

/// Label shown in place of the end date of a current position.
pub const PRESENT_LABEL: &str = "Present";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(alias = "name")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Classic,
    Timeline,
    Modern,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Timeline => "timeline",
            TemplateKind::Modern => "modern",
        }
    }
}

/// Presentation only; never affects content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub template: TemplateKind,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            template: TemplateKind::Classic,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,
    pub start_date: String,
    /// Kept even while `current` is set so un-toggling restores it.
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

impl Experience {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// End date as displayed: "Present" while current, the stored value otherwise.
    pub fn display_end(&self) -> &str {
        if self.current {
            PRESENT_LABEL
        } else {
            &self.end_date
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Stored but not rendered by any template.
    pub description: String,
}

impl Education {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub link: String,
    pub technologies: String,
}

impl Project {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub theme: Theme,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    /// Comma-separated; see `document::skills` for the list view.
    pub skills: String,
    pub projects: Vec<Project>,
    /// Absent in older snapshots; read it through `section_order()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_order: Option<SectionOrder>,
}

impl Default for ResumeData {
    /// Blank starter document with the default order written out explicitly.
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            theme: Theme::default(),
            summary: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: String::new(),
            projects: Vec::new(),
            section_order: Some(SectionOrder::canonical()),
        }
    }
}

impl ResumeData {
    /// The effective section order. The only place an absent order resolves to the default.
    pub fn section_order(&self) -> SectionOrder {
        self.section_order.unwrap_or_default()
    }

    /// Skills as the ordered token list the renderer and skills editor work with.
    pub fn skills_list(&self) -> Vec<String> {
        parse_skills(&self.skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::SectionKey;

    #[test]
    fn test_partial_snapshot_fills_defaults() {
        let doc: ResumeData =
            serde_json::from_str(r#"{"personalInfo":{"name":"Ada"},"summary":"Hi"}"#).unwrap();
        assert_eq!(doc.personal_info.full_name, "Ada");
        assert_eq!(doc.personal_info.email, "");
        assert_eq!(doc.theme.template, TemplateKind::Classic);
        assert_eq!(doc.theme.primary_color, DEFAULT_PRIMARY_COLOR);
        assert!(doc.experience.is_empty());
        assert!(doc.section_order.is_none());
    }

    #[test]
    fn test_section_order_resolves_default_when_absent() {
        let doc = ResumeData {
            section_order: None,
            ..ResumeData::default()
        };
        assert_eq!(doc.section_order().as_slice(), &SectionKey::ALL);
    }

    #[test]
    fn test_camel_case_shape() {
        let mut doc = ResumeData::default();
        doc.experience.push(Experience {
            start_date: "Jan 2020".to_string(),
            ..Experience::new("1")
        });
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("personalInfo").is_some());
        assert!(value.get("sectionOrder").is_some());
        assert_eq!(value["experience"][0]["startDate"], "Jan 2020");
        assert_eq!(value["theme"]["primaryColor"], DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn test_current_position_displays_present_but_keeps_end_date() {
        let mut exp = Experience {
            end_date: "Oct 2022".to_string(),
            current: true,
            ..Experience::new("1")
        };
        assert_eq!(exp.display_end(), PRESENT_LABEL);
        assert_eq!(exp.end_date, "Oct 2022");

        exp.current = false;
        assert_eq!(exp.display_end(), "Oct 2022");
    }

    #[test]
    fn test_rejects_invalid_section_order_in_snapshot() {
        let result: Result<ResumeData, _> =
            serde_json::from_str(r#"{"sectionOrder":["summary","summary"]}"#);
        assert!(result.is_err());
    }
}
