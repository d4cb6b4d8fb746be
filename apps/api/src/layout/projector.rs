//! Template dispatch and region assembly.
//!
//! Each template is a `Template` strategy: a placement table, a page frame, a header and
//! a per-section renderer. `project` wires them together the same way for all three, so
//! the only per-template decisions live in the strategy modules.

use crate::layout::blocks::accent_color;
use crate::layout::classic::Classic;
use crate::layout::modern::Modern;
use crate::layout::placement::PlacementTable;
use crate::layout::timeline::Timeline;
use crate::layout::tree::{Node, Region, RegionKind, VisualTree, A4_HEIGHT_MM, A4_WIDTH_MM};
use crate::models::resume::{ResumeData, TemplateKind};
use crate::models::section::SectionKey;

/// Inputs shared by every render call of one projection.
pub struct RenderContext<'a> {
    pub doc: &'a ResumeData,
    pub accent: String,
}

pub trait Template {
    fn placements(&self) -> &'static PlacementTable;

    /// Empty regions in layout order.
    fn frame(&self, ctx: &RenderContext<'_>) -> Vec<Region>;

    /// Region that receives the header nodes.
    fn header_region(&self) -> RegionKind;

    /// Name, contact details and any sections the placement table folds into the header.
    fn header(&self, ctx: &RenderContext<'_>, absorbed: &[SectionKey]) -> Vec<Node>;

    /// A full section node, or `None` when the section has no content.
    fn section(&self, ctx: &RenderContext<'_>, key: SectionKey) -> Option<Node>;
}

fn strategy(template: TemplateKind) -> &'static dyn Template {
    match template {
        TemplateKind::Classic => &Classic,
        TemplateKind::Timeline => &Timeline,
        TemplateKind::Modern => &Modern,
    }
}

/// Projects `doc` through `template`. Total for any well-formed document.
pub fn project(doc: &ResumeData, template: TemplateKind) -> VisualTree {
    let strategy = strategy(template);
    let ctx = RenderContext {
        doc,
        accent: accent_color(doc),
    };
    let table = strategy.placements();
    let order = doc.section_order();
    let absorbed = table.header_sections();

    let regions = strategy
        .frame(&ctx)
        .into_iter()
        .filter_map(|mut region| {
            if region.kind == strategy.header_region() {
                region.nodes.extend(strategy.header(&ctx, &absorbed));
            }
            region.nodes.extend(
                table
                    .sections_for(region.kind, &order)
                    .into_iter()
                    .filter_map(|key| strategy.section(&ctx, key)),
            );
            // A filled region is part of the page frame even with no content.
            (!region.nodes.is_empty() || region.background.is_some()).then_some(region)
        })
        .collect();

    VisualTree {
        template,
        page_width_mm: A4_WIDTH_MM,
        page_height_mm: A4_HEIGHT_MM,
        accent: ctx.accent,
        regions,
    }
}
