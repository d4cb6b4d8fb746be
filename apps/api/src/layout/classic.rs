//! Single-column template: centred name, inline contact line, every section flowing in
//! the user's order.

use crate::layout::blocks::{
    contact_items, date_range, degree_line, description_nodes, display_name, is_blank, link,
    optional, paragraphs, ContactField, NAME_PLACEHOLDER,
};
use crate::layout::placement::{Placement, PlacementTable};
use crate::layout::projector::{RenderContext, Template};
use crate::layout::tree::{
    Entry, Heading, Node, Region, RegionKind, TextStyle, A4_WIDTH_MM, INK, MUTED, RULE_GRAY,
};
use crate::models::section::SectionKey;

const PAGE_PADDING_MM: f32 = 15.0;

static PLACEMENTS: PlacementTable = PlacementTable::new([
    (SectionKey::Summary, Placement::Flow { region: RegionKind::Main }),
    (SectionKey::Experience, Placement::Flow { region: RegionKind::Main }),
    (SectionKey::Education, Placement::Flow { region: RegionKind::Main }),
    (SectionKey::Skills, Placement::Flow { region: RegionKind::Main }),
    (SectionKey::Projects, Placement::Flow { region: RegionKind::Main }),
]);

const CONTACT_FIELDS: [ContactField; 5] = [
    ContactField::Location,
    ContactField::Phone,
    ContactField::Email,
    ContactField::LinkedinLink,
    ContactField::PortfolioLink,
];

pub struct Classic;

impl Classic {
    fn heading(ctx: &RenderContext<'_>, text: &str) -> Heading {
        Heading {
            text: text.to_string(),
            style: TextStyle::new(10.5, &ctx.accent).bold().uppercase(),
            rule: Some(RULE_GRAY.to_string()),
        }
    }

    fn title_style(ctx: &RenderContext<'_>) -> TextStyle {
        TextStyle::new(11.0, &ctx.accent).bold()
    }
}

impl Template for Classic {
    fn placements(&self) -> &'static PlacementTable {
        &PLACEMENTS
    }

    fn frame(&self, _ctx: &RenderContext<'_>) -> Vec<Region> {
        vec![
            Region::new(RegionKind::Header, 0.0, A4_WIDTH_MM, PAGE_PADDING_MM),
            Region::new(RegionKind::Main, 0.0, A4_WIDTH_MM, PAGE_PADDING_MM),
        ]
    }

    fn header_region(&self) -> RegionKind {
        RegionKind::Header
    }

    fn header(&self, ctx: &RenderContext<'_>, _absorbed: &[SectionKey]) -> Vec<Node> {
        let info = &ctx.doc.personal_info;
        let mut nodes = vec![Node::Name {
            text: display_name(info, Some(NAME_PLACEHOLDER)),
            style: TextStyle::new(22.5, &ctx.accent).bold().uppercase(),
            centered: true,
        }];
        let items = contact_items(info, &CONTACT_FIELDS);
        if !items.is_empty() {
            nodes.push(Node::Contact {
                items,
                style: TextStyle::new(9.0, MUTED),
                separator: Some("•".to_string()),
            });
        }
        nodes.push(Node::Rule {
            color: ctx.accent.clone(),
            weight_pt: 1.5,
        });
        nodes
    }

    fn section(&self, ctx: &RenderContext<'_>, key: SectionKey) -> Option<Node> {
        let doc = ctx.doc;
        let body = TextStyle::new(10.5, INK);
        let (heading, children) = match key {
            SectionKey::Summary => {
                if is_blank(&doc.summary) {
                    return None;
                }
                ("Professional Summary", paragraphs(&doc.summary, &body))
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
                            Entry::new(&exp.role, Self::title_style(ctx))
                                .subtitle(optional(&exp.company), TextStyle::new(11.0, MUTED).bold())
                                .dates(date_range(&exp.start_date, exp.display_end()))
                                .body(description_nodes(&exp.description, &body)),
                        )
                    })
                    .collect();
                ("Professional Experience", entries)
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
                            Entry::new(&edu.school, Self::title_style(ctx))
                                .subtitle(degree_line(&edu.degree, &edu.field), TextStyle::new(10.5, INK))
                                .dates(date_range(&edu.start_date, &edu.end_date)),
                        )
                    })
                    .collect();
                ("Education", entries)
            }
            SectionKey::Skills => {
                if is_blank(&doc.skills) {
                    return None;
                }
                ("Technical Skills", paragraphs(&doc.skills, &body))
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
                            Entry::new(&proj.name, Self::title_style(ctx))
                                .link(link("Link", &proj.link))
                                .meta(optional(&proj.technologies).map(|t| format!("Technologies: {t}")))
                                .body(description_nodes(&proj.description, &body)),
                        )
                    })
                    .collect();
                ("Key Projects", entries)
            }
        };
        Some(Node::Section {
            key,
            heading: Self::heading(ctx, heading),
            children,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::projector::project;
    use crate::layout::tree::{Entry, Node, RegionKind};
    use crate::models::resume::{Experience, Project, ResumeData, TemplateKind};
    use crate::models::section::{SectionKey, SectionOrder};

    fn make_doc() -> ResumeData {
        let mut doc = ResumeData::default();
        doc.personal_info.full_name = "Ada Lovelace".to_string();
        doc.personal_info.email = "ada@example.com".to_string();
        doc.summary = "Mathematician.".to_string();
        doc.skills = "Analysis, Notes".to_string();
        doc.experience = vec![Experience {
            role: "Analyst".to_string(),
            company: "Engine Works".to_string(),
            start_date: "1842".to_string(),
            end_date: "1843".to_string(),
            current: true,
            description: "• Wrote notes\n• Published algorithm".to_string(),
            ..Experience::new("e1")
        }];
        doc
    }

    fn entry_in(node: &Node) -> &Entry {
        match node {
            Node::Section { children, .. } => match &children[0] {
                Node::Entry(entry) => entry,
                other => panic!("expected entry, got {other:?}"),
            },
            other => panic!("expected section, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_experience_omits_section() {
        let mut doc = make_doc();
        doc.experience.clear();
        let tree = project(&doc, TemplateKind::Classic);
        assert!(tree.find_section(SectionKey::Experience).is_none());
        assert_eq!(
            tree.section_keys(),
            vec![SectionKey::Summary, SectionKey::Skills]
        );
    }

    #[test]
    fn test_sections_follow_user_order() {
        let mut doc = make_doc();
        let mut order = SectionOrder::canonical();
        order.move_down(SectionKey::Summary);
        doc.section_order = Some(order);
        let tree = project(&doc, TemplateKind::Classic);
        assert_eq!(
            tree.sections_in(RegionKind::Main),
            vec![SectionKey::Experience, SectionKey::Summary, SectionKey::Skills]
        );
    }

    #[test]
    fn test_current_position_shows_present() {
        let tree = project(&make_doc(), TemplateKind::Classic);
        let (_, section) = tree
            .find_section(SectionKey::Experience)
            .expect("experience rendered");
        assert_eq!(entry_in(section).dates.as_deref(), Some("1842 – Present"));
    }

    #[test]
    fn test_bullet_description_renders_list() {
        let tree = project(&make_doc(), TemplateKind::Classic);
        let (_, section) = tree.find_section(SectionKey::Experience).unwrap();
        match &entry_in(section).body[..] {
            [Node::BulletList { items, .. }] => {
                assert_eq!(items, &vec!["Wrote notes".to_string(), "Published algorithm".to_string()]);
            }
            other => panic!("expected one bullet list, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_name_uses_placeholder() {
        let mut doc = make_doc();
        doc.personal_info.full_name.clear();
        let tree = project(&doc, TemplateKind::Classic);
        let header = tree.region(RegionKind::Header).unwrap();
        assert!(matches!(&header.nodes[0], Node::Name { text, .. } if text == "Your Name"));
    }

    #[test]
    fn test_project_meta_and_link() {
        let mut doc = make_doc();
        doc.projects = vec![Project {
            name: "Engine".to_string(),
            link: "example.com/engine".to_string(),
            technologies: "Brass".to_string(),
            ..Project::new("p1")
        }];
        let tree = project(&doc, TemplateKind::Classic);
        let (_, section) = tree.find_section(SectionKey::Projects).unwrap();
        let entry = entry_in(section);
        assert_eq!(entry.meta.as_deref(), Some("Technologies: Brass"));
        let link = entry.link.as_ref().unwrap();
        assert_eq!(link.label, "Link");
        assert_eq!(link.href, "https://example.com/engine");
    }
}
