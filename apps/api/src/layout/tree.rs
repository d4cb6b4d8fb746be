//! Visual tree: the projector's output.
//!
//! A tree is a list of positioned regions on an A4 page. Regions that share an `x_mm`
//! stack vertically in one lane (header above main above grid); regions at different
//! offsets are independent lanes (Modern's sidebar next to its main column). Nodes carry
//! their own resolved text styles so consumers never look back at the template.

use serde::Serialize;

use crate::models::resume::TemplateKind;
use crate::models::section::SectionKey;

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Body text colour (Tailwind gray-800).
pub const INK: &str = "#1f2937";
/// Secondary text (gray-600).
pub const MUTED: &str = "#4b5563";
/// Tertiary text: dates, meta lines (gray-500).
pub const FAINT: &str = "#6b7280";
pub const WHITE: &str = "#ffffff";
pub const RULE_GRAY: &str = "#d1d5db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Header,
    Main,
    Grid,
    Sidebar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
    pub italic: bool,
    pub uppercase: bool,
    pub color: String,
}

impl TextStyle {
    pub fn new(size_pt: f32, color: &str) -> Self {
        Self {
            size_pt,
            bold: false,
            italic: false,
            uppercase: false,
            color: color.to_string(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactItem {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub text: String,
    pub style: TextStyle,
    /// Underline rule beneath the heading.
    pub rule: Option<String>,
}

/// One experience / education / project block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub title: String,
    pub title_style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub subtitle_style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    /// Secondary line such as the technologies of a project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Rendered on a tinted card (Timeline projects).
    pub card: bool,
    pub body: Vec<Node>,
}

impl Entry {
    pub fn new(title: &str, title_style: TextStyle) -> Self {
        Self {
            title: title.trim().to_string(),
            subtitle_style: title_style.clone(),
            title_style,
            subtitle: None,
            dates: None,
            link: None,
            meta: None,
            card: false,
            body: Vec::new(),
        }
    }

    pub fn subtitle(mut self, text: Option<String>, style: TextStyle) -> Self {
        self.subtitle = text;
        self.subtitle_style = style;
        self
    }

    pub fn dates(mut self, dates: Option<String>) -> Self {
        self.dates = dates;
        self
    }

    pub fn link(mut self, link: Option<Link>) -> Self {
        self.link = link;
        self
    }

    pub fn meta(mut self, meta: Option<String>) -> Self {
        self.meta = meta;
        self
    }

    pub fn card(mut self) -> Self {
        self.card = true;
        self
    }

    pub fn body(mut self, body: Vec<Node>) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Name {
        text: String,
        style: TextStyle,
        centered: bool,
    },
    Avatar {
        initial: String,
    },
    Contact {
        items: Vec<ContactItem>,
        style: TextStyle,
        /// Inline with separators when set, one item per line otherwise.
        separator: Option<String>,
    },
    Rule {
        color: String,
        weight_pt: f32,
    },
    Section {
        key: SectionKey,
        heading: Heading,
        children: Vec<Node>,
    },
    Entry(Entry),
    /// Entries joined by a vertical connector, each linked to the previous one.
    Track {
        color: String,
        entries: Vec<Entry>,
    },
    Paragraph {
        text: String,
        style: TextStyle,
    },
    BulletList {
        items: Vec<String>,
        style: TextStyle,
    },
    Chips {
        items: Vec<String>,
        style: TextStyle,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub kind: RegionKind,
    pub x_mm: f32,
    pub width_mm: f32,
    pub padding_mm: f32,
    /// Column count for the region's sections (the Timeline grid uses two).
    pub columns: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    pub nodes: Vec<Node>,
}

impl Region {
    pub fn new(kind: RegionKind, x_mm: f32, width_mm: f32, padding_mm: f32) -> Self {
        Self {
            kind,
            x_mm,
            width_mm,
            padding_mm,
            columns: 1,
            background: None,
            nodes: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: u8) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_background(mut self, color: &str) -> Self {
        self.background = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub template: TemplateKind,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub accent: String,
    pub regions: Vec<Region>,
}

impl VisualTree {
    pub fn is_empty(&self) -> bool {
        self.regions
            .iter()
            .all(|r| r.nodes.is_empty() && r.background.is_none())
    }
}

/// Lookups used by projection tests.
#[cfg(test)]
impl Region {
    pub fn section_keys(&self) -> Vec<SectionKey> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Section { key, .. } => Some(*key),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl VisualTree {
    pub fn region(&self, kind: RegionKind) -> Option<&Region> {
        self.regions.iter().find(|r| r.kind == kind)
    }

    /// Every rendered section, in region then in-region order.
    pub fn section_keys(&self) -> Vec<SectionKey> {
        self.regions.iter().flat_map(|r| r.section_keys()).collect()
    }

    pub fn sections_in(&self, kind: RegionKind) -> Vec<SectionKey> {
        self.region(kind).map(Region::section_keys).unwrap_or_default()
    }

    pub fn find_section(&self, key: SectionKey) -> Option<(RegionKind, &Node)> {
        self.regions.iter().find_map(|r| {
            r.nodes.iter().find_map(|n| match n {
                Node::Section { key: k, .. } if *k == key => Some((r.kind, n)),
                _ => None,
            })
        })
    }
}
