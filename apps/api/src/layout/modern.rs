//! Two-column template: an accent-coloured sidebar carrying identity, contacts, skills
//! and education, with the remaining sections flowing in the main column.

use crate::layout::blocks::{
    contact_items, date_range, description_nodes, display_name, is_blank, link, optional,
    paragraphs, ContactField,
};
use crate::layout::placement::{Placement, PlacementTable};
use crate::layout::projector::{RenderContext, Template};
use crate::layout::tree::{
    Entry, Heading, Node, Region, RegionKind, TextStyle, A4_WIDTH_MM, MUTED, WHITE,
};
use crate::models::section::SectionKey;

pub const SIDEBAR_WIDTH_MM: f32 = 65.0;
const SIDEBAR_PADDING_MM: f32 = 8.0;
const MAIN_PADDING_MM: f32 = 10.0;
const MAIN_RULE: &str = "#e5e7eb";
const SIDEBAR_RULE: &str = "#ffffff4d";

static PLACEMENTS: PlacementTable = PlacementTable::new([
    (SectionKey::Summary, Placement::Flow { region: RegionKind::Main }),
    (SectionKey::Experience, Placement::Flow { region: RegionKind::Main }),
    (
        SectionKey::Education,
        Placement::Pinned { region: RegionKind::Sidebar, slot: 1 },
    ),
    (
        SectionKey::Skills,
        Placement::Pinned { region: RegionKind::Sidebar, slot: 0 },
    ),
    (SectionKey::Projects, Placement::Flow { region: RegionKind::Main }),
]);

const CONTACT_FIELDS: [ContactField; 5] = [
    ContactField::Email,
    ContactField::Phone,
    ContactField::Location,
    ContactField::LinkedinLink,
    ContactField::PortfolioLink,
];

pub struct Modern;

impl Modern {
    fn main_heading(ctx: &RenderContext<'_>, text: &str) -> Heading {
        Heading {
            text: text.to_string(),
            style: TextStyle::new(13.5, &ctx.accent).bold().uppercase(),
            rule: Some(MAIN_RULE.to_string()),
        }
    }

    fn sidebar_heading(text: &str) -> Heading {
        Heading {
            text: text.to_string(),
            style: TextStyle::new(9.0, WHITE).bold().uppercase(),
            rule: Some(SIDEBAR_RULE.to_string()),
        }
    }
}

impl Template for Modern {
    fn placements(&self) -> &'static PlacementTable {
        &PLACEMENTS
    }

    fn frame(&self, ctx: &RenderContext<'_>) -> Vec<Region> {
        vec![
            Region::new(RegionKind::Sidebar, 0.0, SIDEBAR_WIDTH_MM, SIDEBAR_PADDING_MM)
                .with_background(&ctx.accent),
            Region::new(
                RegionKind::Main,
                SIDEBAR_WIDTH_MM,
                A4_WIDTH_MM - SIDEBAR_WIDTH_MM,
                MAIN_PADDING_MM,
            ),
        ]
    }

    fn header_region(&self) -> RegionKind {
        RegionKind::Sidebar
    }

    fn header(&self, ctx: &RenderContext<'_>, _absorbed: &[SectionKey]) -> Vec<Node> {
        let info = &ctx.doc.personal_info;
        let name = display_name(info, None);
        let initial = name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default();
        let mut nodes = vec![
            Node::Avatar { initial },
            Node::Name {
                text: name,
                style: TextStyle::new(15.0, WHITE).bold().uppercase(),
                centered: true,
            },
        ];
        let items = contact_items(info, &CONTACT_FIELDS);
        if !items.is_empty() {
            nodes.push(Node::Contact {
                items,
                style: TextStyle::new(10.5, WHITE),
                separator: None,
            });
        }
        nodes
    }

    fn section(&self, ctx: &RenderContext<'_>, key: SectionKey) -> Option<Node> {
        let doc = ctx.doc;
        let body = TextStyle::new(10.0, MUTED);
        let (heading, children) = match key {
            SectionKey::Summary => {
                if is_blank(&doc.summary) {
                    return None;
                }
                (Self::main_heading(ctx, "Profile"), paragraphs(&doc.summary, &body))
            }
            SectionKey::Experience => {
                if doc.experience.is_empty() {
                    return None;
                }
                let entries = doc
                    .experience
                    .iter()
                    .map(|exp| {
                        Node::Entry(
                            Entry::new(&exp.role, TextStyle::new(11.0, &ctx.accent).bold())
                                .subtitle(optional(&exp.company), TextStyle::new(10.0, &ctx.accent).bold())
                                .dates(date_range(&exp.start_date, exp.display_end()))
                                .body(description_nodes(&exp.description, &body)),
                        )
                    })
                    .collect();
                (Self::main_heading(ctx, "Experience"), entries)
            }
            SectionKey::Projects => {
                if doc.projects.is_empty() {
                    return None;
                }
                let entries = doc
                    .projects
                    .iter()
                    .map(|proj| {
                        Node::Entry(
                            Entry::new(&proj.name, TextStyle::new(11.0, &ctx.accent).bold())
                                .link(link("Link", &proj.link))
                                .body(description_nodes(&proj.description, &body)),
                        )
                    })
                    .collect();
                (Self::main_heading(ctx, "Projects"), entries)
            }
            SectionKey::Skills => {
                let items = doc.skills_list();
                if items.is_empty() {
                    return None;
                }
                (
                    Self::sidebar_heading("Skills"),
                    vec![Node::Chips {
                        items,
                        style: TextStyle::new(9.0, WHITE),
                    }],
                )
            }
            SectionKey::Education => {
                if doc.education.is_empty() {
                    return None;
                }
                let entries = doc
                    .education
                    .iter()
                    .map(|edu| {
                        Node::Entry(
                            Entry::new(&edu.degree, TextStyle::new(10.5, WHITE).bold())
                                .subtitle(optional(&edu.school), TextStyle::new(9.0, WHITE))
                                .dates(date_range("", &edu.end_date)),
                        )
                    })
                    .collect();
                (Self::sidebar_heading("Education"), entries)
            }
        };
        Some(Node::Section {
            key,
            heading,
            children,
        })
    }
}
