//! Content Mutators: typed edits that turn one document snapshot into the next.
//!
//! Each `DocumentEdit` names exactly one field (or one list operation), so there is no
//! string-keyed field lookup anywhere. `apply_edit` never modifies its input; it returns
//! the next snapshot. Updates, removals and moves that reference an unknown id are
//! no-ops, matching last-write-wins form binding.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::document::order::MoveDirection;
use crate::document::skills;
use crate::models::resume::{Education, Experience, Project, ResumeData, TemplateKind};
use crate::models::section::SectionKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("an entry with id '{id}' already exists in {list}")]
    DuplicateId { list: EntryList, id: String },
}

/// The three id-keyed entry lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryList {
    Experience,
    Education,
    Projects,
}

impl std::fmt::Display for EntryList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntryList::Experience => "experience",
            EntryList::Education => "education",
            EntryList::Projects => "projects",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Website,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExperienceChange {
    Role(String),
    Company(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EducationChange {
    School(String),
    Degree(String),
    Field(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ProjectChange {
    Name(String),
    Description(String),
    Link(String),
    Technologies(String),
}

/// One editor event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocumentEdit {
    SetPersonalInfo { field: PersonalField, value: String },
    SetPrimaryColor { value: String },
    SetTemplate { value: TemplateKind },
    SetSummary { value: String },
    SetSkills { value: String },
    AddSkill { value: String },
    UpdateSkill { index: usize, value: String },
    RemoveSkill { index: usize },
    AddExperience { #[serde(default)] id: Option<String> },
    AddEducation { #[serde(default)] id: Option<String> },
    AddProject { #[serde(default)] id: Option<String> },
    UpdateExperience { id: String, change: ExperienceChange },
    UpdateEducation { id: String, change: EducationChange },
    UpdateProject { id: String, change: ProjectChange },
    RemoveEntry { list: EntryList, id: String },
    MoveEntry { list: EntryList, id: String, direction: MoveDirection },
    MoveSection { key: SectionKey, direction: MoveDirection },
    ResetSectionOrder,
}

impl DocumentEdit {
    /// Short name for logs.
    pub fn op_name(&self) -> &'static str {
        match self {
            DocumentEdit::SetPersonalInfo { .. } => "set_personal_info",
            DocumentEdit::SetPrimaryColor { .. } => "set_primary_color",
            DocumentEdit::SetTemplate { .. } => "set_template",
            DocumentEdit::SetSummary { .. } => "set_summary",
            DocumentEdit::SetSkills { .. } => "set_skills",
            DocumentEdit::AddSkill { .. } => "add_skill",
            DocumentEdit::UpdateSkill { .. } => "update_skill",
            DocumentEdit::RemoveSkill { .. } => "remove_skill",
            DocumentEdit::AddExperience { .. } => "add_experience",
            DocumentEdit::AddEducation { .. } => "add_education",
            DocumentEdit::AddProject { .. } => "add_project",
            DocumentEdit::UpdateExperience { .. } => "update_experience",
            DocumentEdit::UpdateEducation { .. } => "update_education",
            DocumentEdit::UpdateProject { .. } => "update_project",
            DocumentEdit::RemoveEntry { .. } => "remove_entry",
            DocumentEdit::MoveEntry { .. } => "move_entry",
            DocumentEdit::MoveSection { .. } => "move_section",
            DocumentEdit::ResetSectionOrder => "reset_section_order",
        }
    }
}

/// Applies `edit` to `doc`, returning the next snapshot.
pub fn apply_edit(doc: &ResumeData, edit: DocumentEdit) -> Result<ResumeData, EditError> {
    let mut next = doc.clone();

    match edit {
        DocumentEdit::SetPersonalInfo { field, value } => {
            let info = &mut next.personal_info;
            let slot = match field {
                PersonalField::FullName => &mut info.full_name,
                PersonalField::Email => &mut info.email,
                PersonalField::Phone => &mut info.phone,
                PersonalField::Location => &mut info.location,
                PersonalField::Linkedin => &mut info.linkedin,
                PersonalField::Website => &mut info.website,
            };
            *slot = value;
        }
        DocumentEdit::SetPrimaryColor { value } => next.theme.primary_color = value,
        DocumentEdit::SetTemplate { value } => next.theme.template = value,
        DocumentEdit::SetSummary { value } => next.summary = value,
        DocumentEdit::SetSkills { value } => next.skills = value,
        DocumentEdit::AddSkill { value } => next.skills = skills::add_skill(&next.skills, &value),
        DocumentEdit::UpdateSkill { index, value } => {
            next.skills = skills::update_skill(&next.skills, index, &value)
        }
        DocumentEdit::RemoveSkill { index } => {
            next.skills = skills::remove_skill(&next.skills, index)
        }
        DocumentEdit::AddExperience { id } => {
            let id = claim_id(&next.experience, id, EntryList::Experience, |e| &e.id)?;
            next.experience.push(Experience::new(id));
        }
        DocumentEdit::AddEducation { id } => {
            let id = claim_id(&next.education, id, EntryList::Education, |e| &e.id)?;
            next.education.push(Education::new(id));
        }
        DocumentEdit::AddProject { id } => {
            let id = claim_id(&next.projects, id, EntryList::Projects, |p| &p.id)?;
            next.projects.push(Project::new(id));
        }
        DocumentEdit::UpdateExperience { id, change } => {
            if let Some(exp) = next.experience.iter_mut().find(|e| e.id == id) {
                match change {
                    ExperienceChange::Role(v) => exp.role = v,
                    ExperienceChange::Company(v) => exp.company = v,
                    ExperienceChange::StartDate(v) => exp.start_date = v,
                    ExperienceChange::EndDate(v) => exp.end_date = v,
                    // end_date stays as stored so switching back restores it.
                    ExperienceChange::Current(v) => exp.current = v,
                    ExperienceChange::Description(v) => exp.description = v,
                }
            }
        }
        DocumentEdit::UpdateEducation { id, change } => {
            if let Some(edu) = next.education.iter_mut().find(|e| e.id == id) {
                match change {
                    EducationChange::School(v) => edu.school = v,
                    EducationChange::Degree(v) => edu.degree = v,
                    EducationChange::Field(v) => edu.field = v,
                    EducationChange::StartDate(v) => edu.start_date = v,
                    EducationChange::EndDate(v) => edu.end_date = v,
                    EducationChange::Current(v) => edu.current = v,
                    EducationChange::Description(v) => edu.description = v,
                }
            }
        }
        DocumentEdit::UpdateProject { id, change } => {
            if let Some(proj) = next.projects.iter_mut().find(|p| p.id == id) {
                match change {
                    ProjectChange::Name(v) => proj.name = v,
                    ProjectChange::Description(v) => proj.description = v,
                    ProjectChange::Link(v) => proj.link = v,
                    ProjectChange::Technologies(v) => proj.technologies = v,
                }
            }
        }
        DocumentEdit::RemoveEntry { list, id } => match list {
            EntryList::Experience => next.experience.retain(|e| e.id != id),
            EntryList::Education => next.education.retain(|e| e.id != id),
            EntryList::Projects => next.projects.retain(|p| p.id != id),
        },
        DocumentEdit::MoveEntry { list, id, direction } => match list {
            EntryList::Experience => move_entry(&mut next.experience, &id, direction, |e| &e.id),
            EntryList::Education => move_entry(&mut next.education, &id, direction, |e| &e.id),
            EntryList::Projects => move_entry(&mut next.projects, &id, direction, |p| &p.id),
        },
        DocumentEdit::MoveSection { key, direction } => {
            let mut order = next.section_order();
            if order.shift(key, direction) {
                next.section_order = Some(order);
            }
        }
        DocumentEdit::ResetSectionOrder => {
            let mut order = next.section_order();
            order.reset();
            next.section_order = Some(order);
        }
    }

    Ok(next)
}

/// Description of the entry `id` in `list`, if it exists.
pub fn entry_description<'a>(doc: &'a ResumeData, list: EntryList, id: &str) -> Option<&'a str> {
    match list {
        EntryList::Experience => doc
            .experience
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.description.as_str()),
        EntryList::Education => doc
            .education
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.description.as_str()),
        EntryList::Projects => doc
            .projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.description.as_str()),
    }
}

/// Edit that overwrites the description of entry `id` in `list`.
pub fn set_description(list: EntryList, id: String, text: String) -> DocumentEdit {
    match list {
        EntryList::Experience => DocumentEdit::UpdateExperience {
            id,
            change: ExperienceChange::Description(text),
        },
        EntryList::Education => DocumentEdit::UpdateEducation {
            id,
            change: EducationChange::Description(text),
        },
        EntryList::Projects => DocumentEdit::UpdateProject {
            id,
            change: ProjectChange::Description(text),
        },
    }
}

/// Rejects a snapshot in which any entry list repeats an id.
pub fn check_unique_ids(doc: &ResumeData) -> Result<(), EditError> {
    first_duplicate(&doc.experience, EntryList::Experience, |e| &e.id)?;
    first_duplicate(&doc.education, EntryList::Education, |e| &e.id)?;
    first_duplicate(&doc.projects, EntryList::Projects, |p| &p.id)
}

fn first_duplicate<T>(
    entries: &[T],
    list: EntryList,
    id_of: impl Fn(&T) -> &String,
) -> Result<(), EditError> {
    let mut seen = HashSet::new();
    match entries.iter().map(id_of).find(|id| !seen.insert(id.as_str())) {
        Some(id) => Err(EditError::DuplicateId {
            list,
            id: id.clone(),
        }),
        None => Ok(()),
    }
}

fn claim_id<T>(
    entries: &[T],
    requested: Option<String>,
    list: EntryList,
    id_of: impl Fn(&T) -> &String,
) -> Result<String, EditError> {
    let id = requested
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    if entries.iter().any(|e| *id_of(e) == id) {
        return Err(EditError::DuplicateId { list, id });
    }
    Ok(id)
}

fn move_entry<T>(entries: &mut [T], id: &str, direction: MoveDirection, id_of: impl Fn(&T) -> &String) {
    let Some(i) = entries.iter().position(|e| id_of(e) == id) else {
        return;
    };
    match direction {
        MoveDirection::Up if i > 0 => entries.swap(i - 1, i),
        MoveDirection::Down if i + 1 < entries.len() => entries.swap(i, i + 1),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::SectionOrder;

    fn make_doc() -> ResumeData {
        let mut doc = ResumeData::default();
        doc.experience = vec![
            Experience {
                role: "Engineer".to_string(),
                end_date: "Oct 2022".to_string(),
                ..Experience::new("a")
            },
            Experience::new("b"),
            Experience::new("c"),
        ];
        doc.projects = vec![Project::new("p1")];
        doc
    }

    fn ids(doc: &ResumeData) -> Vec<&str> {
        doc.experience.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_apply_returns_new_snapshot_and_leaves_input() {
        let doc = make_doc();
        let next = apply_edit(
            &doc,
            DocumentEdit::SetSummary {
                value: "Builder of things".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.summary, "Builder of things");
        assert_eq!(doc.summary, "");
    }

    #[test]
    fn test_set_personal_info_targets_single_field() {
        let next = apply_edit(
            &make_doc(),
            DocumentEdit::SetPersonalInfo {
                field: PersonalField::Email,
                value: "ada@example.com".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.personal_info.email, "ada@example.com");
        assert_eq!(next.personal_info.full_name, "");
    }

    #[test]
    fn test_add_experience_generates_unique_id() {
        let doc = make_doc();
        let next = apply_edit(&doc, DocumentEdit::AddExperience { id: None }).unwrap();
        assert_eq!(next.experience.len(), 4);
        let new_id = &next.experience[3].id;
        assert!(!new_id.is_empty());
        assert!(!ids(&doc).contains(&new_id.as_str()));
    }

    #[test]
    fn test_add_with_existing_id_is_rejected() {
        let err = apply_edit(
            &make_doc(),
            DocumentEdit::AddExperience {
                id: Some("a".to_string()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, EditError::DuplicateId { list: EntryList::Experience, .. }));
    }

    #[test]
    fn test_update_by_id_only_touches_that_entry() {
        let next = apply_edit(
            &make_doc(),
            DocumentEdit::UpdateExperience {
                id: "b".to_string(),
                change: ExperienceChange::Company("Acme".to_string()),
            },
        )
        .unwrap();
        assert_eq!(next.experience[1].company, "Acme");
        assert_eq!(next.experience[0].company, "");
        assert_eq!(next.experience[2].company, "");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let doc = make_doc();
        let next = apply_edit(
            &doc,
            DocumentEdit::UpdateProject {
                id: "missing".to_string(),
                change: ProjectChange::Name("X".to_string()),
            },
        )
        .unwrap();
        assert_eq!(next, doc);
    }

    #[test]
    fn test_toggle_current_preserves_end_date() {
        let doc = make_doc();
        let on = apply_edit(
            &doc,
            DocumentEdit::UpdateExperience {
                id: "a".to_string(),
                change: ExperienceChange::Current(true),
            },
        )
        .unwrap();
        assert_eq!(on.experience[0].display_end(), "Present");
        assert_eq!(on.experience[0].end_date, "Oct 2022");

        let off = apply_edit(
            &on,
            DocumentEdit::UpdateExperience {
                id: "a".to_string(),
                change: ExperienceChange::Current(false),
            },
        )
        .unwrap();
        assert_eq!(off.experience[0].display_end(), "Oct 2022");
    }

    #[test]
    fn test_remove_entry_filters_by_id() {
        let next = apply_edit(
            &make_doc(),
            DocumentEdit::RemoveEntry {
                list: EntryList::Experience,
                id: "b".to_string(),
            },
        )
        .unwrap();
        assert_eq!(ids(&next), vec!["a", "c"]);
    }

    #[test]
    fn test_move_entry_swaps_neighbours_and_stops_at_edges() {
        let doc = make_doc();
        let next = apply_edit(
            &doc,
            DocumentEdit::MoveEntry {
                list: EntryList::Experience,
                id: "c".to_string(),
                direction: MoveDirection::Up,
            },
        )
        .unwrap();
        assert_eq!(ids(&next), vec!["a", "c", "b"]);

        let unchanged = apply_edit(
            &doc,
            DocumentEdit::MoveEntry {
                list: EntryList::Experience,
                id: "a".to_string(),
                direction: MoveDirection::Up,
            },
        )
        .unwrap();
        assert_eq!(ids(&unchanged), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_section_materializes_order_when_absent() {
        let doc = ResumeData {
            section_order: None,
            ..ResumeData::default()
        };
        let next = apply_edit(
            &doc,
            DocumentEdit::MoveSection {
                key: SectionKey::Skills,
                direction: MoveDirection::Up,
            },
        )
        .unwrap();
        let order = next.section_order.unwrap();
        assert_eq!(order.position(SectionKey::Skills), Some(2));
    }

    #[test]
    fn test_reset_section_order_edit() {
        let mut doc = make_doc();
        let mut order = SectionOrder::canonical();
        order.move_down(SectionKey::Summary);
        doc.section_order = Some(order);

        let next = apply_edit(&doc, DocumentEdit::ResetSectionOrder).unwrap();
        assert!(next.section_order().is_default());
    }

    #[test]
    fn test_skill_edits_keep_flat_string_normalized() {
        let mut doc = make_doc();
        doc.skills = "Go, , Rust".to_string();
        let next = apply_edit(
            &doc,
            DocumentEdit::AddSkill {
                value: "C++".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.skills, "Go, Rust, C++");

        let next = apply_edit(&next, DocumentEdit::RemoveSkill { index: 0 }).unwrap();
        assert_eq!(next.skills, "Rust, C++");
    }

    #[test]
    fn test_edit_json_shape() {
        let edit: DocumentEdit = serde_json::from_str(
            r#"{"op":"update_experience","id":"a","change":{"field":"startDate","value":"Jan 2020"}}"#,
        )
        .unwrap();
        assert_eq!(
            edit,
            DocumentEdit::UpdateExperience {
                id: "a".to_string(),
                change: ExperienceChange::StartDate("Jan 2020".to_string()),
            }
        );

        let edit: DocumentEdit = serde_json::from_str(r#"{"op":"add_project"}"#).unwrap();
        assert_eq!(edit, DocumentEdit::AddProject { id: None });
    }

    #[test]
    fn test_entry_description_lookup() {
        let mut doc = make_doc();
        doc.projects[0].description = "CLI tool".to_string();
        assert_eq!(entry_description(&doc, EntryList::Projects, "p1"), Some("CLI tool"));
        assert_eq!(entry_description(&doc, EntryList::Education, "p1"), None);
    }

    #[test]
    fn test_check_unique_ids_finds_repeated_entry() {
        let mut doc = make_doc();
        assert!(check_unique_ids(&doc).is_ok());

        doc.projects.push(Project::new("p1"));
        assert_eq!(
            check_unique_ids(&doc),
            Err(EditError::DuplicateId {
                list: EntryList::Projects,
                id: "p1".to_string(),
            })
        );
    }

    #[test]
    fn test_same_id_in_different_lists_is_allowed() {
        let mut doc = make_doc();
        doc.education.push(Education::new("a"));
        assert!(check_unique_ids(&doc).is_ok());
    }
}
