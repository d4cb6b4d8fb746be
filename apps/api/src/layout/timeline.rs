//! Timeline template: large name with a stacked contact block and the summary folded
//! into the header, experience on a connected track, education and skills in a
//! two-column grid below the full-width sections.

use crate::layout::blocks::{
    contact_items, date_range, degree_line, description_nodes, display_name, link, optional,
    paragraphs, ContactField, NAME_PLACEHOLDER,
};
use crate::layout::placement::{Placement, PlacementTable};
use crate::layout::projector::{RenderContext, Template};
use crate::layout::tree::{
    Entry, Heading, Node, Region, RegionKind, TextStyle, A4_WIDTH_MM, FAINT, INK, MUTED,
};
use crate::models::section::SectionKey;

const PAGE_PADDING_MM: f32 = 15.0;
const GRID_RULE: &str = "#e5e7eb";
const TRACK_COLOR: &str = "#e5e7eb";

static PLACEMENTS: PlacementTable = PlacementTable::new([
    (SectionKey::Summary, Placement::Header),
    (SectionKey::Experience, Placement::Flow { region: RegionKind::Main }),
    (SectionKey::Education, Placement::Flow { region: RegionKind::Grid }),
    (SectionKey::Skills, Placement::Flow { region: RegionKind::Grid }),
    (SectionKey::Projects, Placement::Flow { region: RegionKind::Main }),
]);

const CONTACT_FIELDS: [ContactField; 4] = [
    ContactField::Email,
    ContactField::Phone,
    ContactField::Location,
    ContactField::LinkedinRaw,
];

pub struct Timeline;

impl Timeline {
    fn full_width_heading(ctx: &RenderContext<'_>, text: &str) -> Heading {
        Heading {
            text: text.to_string(),
            style: TextStyle::new(13.5, &ctx.accent).bold().uppercase(),
            rule: None,
        }
    }

    fn grid_heading(ctx: &RenderContext<'_>, text: &str) -> Heading {
        Heading {
            text: text.to_string(),
            style: TextStyle::new(10.5, &ctx.accent).bold().uppercase(),
            rule: Some(GRID_RULE.to_string()),
        }
    }
}

impl Template for Timeline {
    fn placements(&self) -> &'static PlacementTable {
        &PLACEMENTS
    }

    fn frame(&self, _ctx: &RenderContext<'_>) -> Vec<Region> {
        vec![
            Region::new(RegionKind::Header, 0.0, A4_WIDTH_MM, PAGE_PADDING_MM),
            Region::new(RegionKind::Main, 0.0, A4_WIDTH_MM, PAGE_PADDING_MM),
            Region::new(RegionKind::Grid, 0.0, A4_WIDTH_MM, PAGE_PADDING_MM).with_columns(2),
        ]
    }

    fn header_region(&self) -> RegionKind {
        RegionKind::Header
    }

    fn header(&self, ctx: &RenderContext<'_>, absorbed: &[SectionKey]) -> Vec<Node> {
        let doc = ctx.doc;
        let mut nodes = vec![Node::Name {
            text: display_name(&doc.personal_info, Some(NAME_PLACEHOLDER)),
            style: TextStyle::new(27.0, &ctx.accent).bold(),
            centered: false,
        }];
        let items = contact_items(&doc.personal_info, &CONTACT_FIELDS);
        if !items.is_empty() {
            nodes.push(Node::Contact {
                items,
                style: TextStyle::new(10.5, MUTED),
                separator: None,
            });
        }
        if absorbed.contains(&SectionKey::Summary) {
            nodes.extend(paragraphs(&doc.summary, &TextStyle::new(10.5, MUTED).italic()));
        }
        nodes
    }

    fn section(&self, ctx: &RenderContext<'_>, key: SectionKey) -> Option<Node> {
        let doc = ctx.doc;
        let body = TextStyle::new(10.5, INK);
        let (heading, children) = match key {
            // Folded into the header.
            SectionKey::Summary => return None,
            SectionKey::Experience => {
                if doc.experience.is_empty() {
                    return None;
                }
                let entries = doc
                    .experience
                    .iter()
                    .map(|exp| {
                        Entry::new(&exp.role, TextStyle::new(12.0, &ctx.accent).bold())
                            .subtitle(optional(&exp.company), TextStyle::new(11.0, &ctx.accent))
                            .dates(date_range(&exp.start_date, exp.display_end()))
                            .body(description_nodes(&exp.description, &body))
                    })
                    .collect();
                (
                    Self::full_width_heading(ctx, "Experience"),
                    vec![Node::Track {
                        color: TRACK_COLOR.to_string(),
                        entries,
                    }],
                )
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
                                .link(link("View", &proj.link))
                                .meta(optional(&proj.technologies))
                                .card()
                                .body(description_nodes(&proj.description, &TextStyle::new(10.0, INK))),
                        )
                    })
                    .collect();
                (Self::full_width_heading(ctx, "Projects"), entries)
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
                            Entry::new(&edu.school, TextStyle::new(10.5, INK).bold())
                                .subtitle(degree_line(&edu.degree, &edu.field), TextStyle::new(10.0, MUTED))
                                .dates(date_range(&edu.start_date, &edu.end_date)),
                        )
                    })
                    .collect();
                (Self::grid_heading(ctx, "Education"), entries)
            }
            SectionKey::Skills => {
                let items = doc.skills_list();
                if items.is_empty() {
                    return None;
                }
                (
                    Self::grid_heading(ctx, "Skills"),
                    vec![Node::Chips {
                        items,
                        style: TextStyle::new(9.0, FAINT),
                    }],
                )
            }
        };
        Some(Node::Section {
            key,
            heading,
            children,
        })
    }
}
