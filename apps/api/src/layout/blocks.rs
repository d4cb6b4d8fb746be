//! Building blocks shared by the three templates.

use crate::layout::tree::{ContactItem, Link, Node, TextStyle};
use crate::models::resume::{PersonalInfo, ResumeData, DEFAULT_PRIMARY_COLOR};

/// Shown by the headline templates when the name is blank.
pub const NAME_PLACEHOLDER: &str = "Your Name";

const BULLET_MARKERS: [char; 2] = ['•', '-'];

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Theme accent, falling back to the default when the stored colour is blank.
pub fn accent_color(doc: &ResumeData) -> String {
    let color = doc.theme.primary_color.trim();
    if color.is_empty() {
        DEFAULT_PRIMARY_COLOR.to_string()
    } else {
        color.to_string()
    }
}

/// Renders a free-text description.
///
/// Blank lines are dropped. If any remaining line starts with `•` or `-`, the whole block
/// becomes one bullet list with that marker stripped; otherwise each line is a paragraph.
pub fn description_nodes(text: &str, style: &TextStyle) -> Vec<Node> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Vec::new();
    }

    if lines.iter().any(|l| l.starts_with(BULLET_MARKERS)) {
        let items = lines
            .iter()
            .map(|&l| {
                l.strip_prefix(BULLET_MARKERS)
                    .map(str::trim_start)
                    .unwrap_or(l)
                    .to_string()
            })
            .collect();
        return vec![Node::BulletList {
            items,
            style: style.clone(),
        }];
    }

    paragraphs(text, style)
}

/// One paragraph per non-blank line.
pub fn paragraphs(text: &str, style: &TextStyle) -> Vec<Node> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| Node::Paragraph {
            text: l.to_string(),
            style: style.clone(),
        })
        .collect()
}

/// `"start – end"`, or whichever half is present.
pub fn date_range(start: &str, end: &str) -> Option<String> {
    match (start.trim(), end.trim()) {
        ("", "") => None,
        (s, "") => Some(s.to_string()),
        ("", e) => Some(e.to_string()),
        (s, e) => Some(format!("{s} – {e}")),
    }
}

/// Bare hosts get an `https://` scheme so links stay clickable.
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

pub fn link(label: &str, raw: &str) -> Option<Link> {
    if is_blank(raw) {
        return None;
    }
    Some(Link {
        label: label.to_string(),
        href: normalize_url(raw),
    })
}

/// `"degree in field"`, or just the degree.
pub fn degree_line(degree: &str, field: &str) -> Option<String> {
    match (degree.trim(), field.trim()) {
        ("", "") => None,
        (d, "") => Some(d.to_string()),
        (d, f) => Some(format!("{d} in {f}").trim().to_string()),
    }
}

pub fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

pub fn display_name(info: &PersonalInfo, placeholder: Option<&str>) -> String {
    match (info.full_name.trim(), placeholder) {
        ("", Some(p)) => p.to_string(),
        (name, _) => name.to_string(),
    }
}

/// Contact items a template shows, in the order it lists them. Blank fields are skipped.
pub fn contact_items(info: &PersonalInfo, fields: &[ContactField]) -> Vec<ContactItem> {
    fields
        .iter()
        .filter_map(|field| match field {
            ContactField::Location => plain(&info.location),
            ContactField::Phone => plain(&info.phone),
            ContactField::Email => (!is_blank(&info.email)).then(|| ContactItem {
                text: info.email.trim().to_string(),
                href: Some(format!("mailto:{}", info.email.trim())),
            }),
            ContactField::LinkedinRaw => plain(&info.linkedin),
            ContactField::LinkedinLink => labelled("LinkedIn", &info.linkedin),
            ContactField::PortfolioLink => labelled("Portfolio", &info.website),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Location,
    Phone,
    Email,
    /// The LinkedIn value as typed.
    LinkedinRaw,
    /// A "LinkedIn" label linking to the profile.
    LinkedinLink,
    PortfolioLink,
}

fn plain(value: &str) -> Option<ContactItem> {
    optional(value).map(|text| ContactItem { text, href: None })
}

fn labelled(label: &str, value: &str) -> Option<ContactItem> {
    link(label, value).map(|l| ContactItem {
        text: l.label,
        href: Some(l.href),
    })
}
