//! Per-template section placement.
//!
//! The user's `SectionOrder` says which reorderable section comes first, but each template
//! owns some structural regions. A `PlacementTable` states, for every section, whether it
//! follows the user's order inside a region, sits at a fixed slot of a region, or is
//! folded into the header. Adding a template means writing one table.

use serde::Serialize;

use crate::layout::tree::RegionKind;
use crate::models::section::{SectionKey, SectionOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Placement {
    /// Rendered in `region`, ordered by the user's section order.
    Flow { region: RegionKind },
    /// Rendered in `region` at `slot`, ignoring the user's section order.
    Pinned { region: RegionKind, slot: u8 },
    /// Never a standalone section; the template's header consumes it.
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementTable([(SectionKey, Placement); 5]);

impl PlacementTable {
    /// Entries must cover each section once; unlisted sections are never rendered.
    pub const fn new(entries: [(SectionKey, Placement); 5]) -> Self {
        PlacementTable(entries)
    }

    pub fn placement(&self, key: SectionKey) -> Option<Placement> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, p)| *p)
    }

    /// Sections consumed by the header.
    pub fn header_sections(&self) -> Vec<SectionKey> {
        self.0
            .iter()
            .filter(|(_, p)| *p == Placement::Header)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Sections to render in `region`: pinned ones by slot, then flowing ones in user order.
    pub fn sections_for(&self, region: RegionKind, order: &SectionOrder) -> Vec<SectionKey> {
        let mut pinned: Vec<(u8, SectionKey)> = self
            .0
            .iter()
            .filter_map(|(k, p)| match p {
                Placement::Pinned { region: r, slot } if *r == region => Some((*slot, *k)),
                _ => None,
            })
            .collect();
        pinned.sort_by_key(|(slot, _)| *slot);

        let flowing = order
            .iter()
            .filter(|k| self.placement(*k) == Some(Placement::Flow { region }));

        pinned.into_iter().map(|(_, k)| k).chain(flowing).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: PlacementTable = PlacementTable::new([
        (SectionKey::Summary, Placement::Header),
        (SectionKey::Experience, Placement::Flow { region: RegionKind::Main }),
        (SectionKey::Education, Placement::Pinned { region: RegionKind::Sidebar, slot: 1 }),
        (SectionKey::Skills, Placement::Pinned { region: RegionKind::Sidebar, slot: 0 }),
        (SectionKey::Projects, Placement::Flow { region: RegionKind::Main }),
    ]);

    fn reversed() -> SectionOrder {
        let mut keys = SectionKey::ALL.to_vec();
        keys.reverse();
        SectionOrder::try_from(keys).unwrap()
    }

    #[test]
    fn test_flow_sections_follow_user_order() {
        assert_eq!(
            MIXED.sections_for(RegionKind::Main, &SectionOrder::canonical()),
            vec![SectionKey::Experience, SectionKey::Projects]
        );
        assert_eq!(
            MIXED.sections_for(RegionKind::Main, &reversed()),
            vec![SectionKey::Projects, SectionKey::Experience]
        );
    }

    #[test]
    fn test_pinned_sections_ignore_user_order() {
        for order in [SectionOrder::canonical(), reversed()] {
            assert_eq!(
                MIXED.sections_for(RegionKind::Sidebar, &order),
                vec![SectionKey::Skills, SectionKey::Education]
            );
        }
    }

    #[test]
    fn test_header_sections_never_appear_in_regions() {
        assert_eq!(MIXED.header_sections(), vec![SectionKey::Summary]);
        for region in [RegionKind::Header, RegionKind::Main, RegionKind::Grid, RegionKind::Sidebar] {
            assert!(!MIXED
                .sections_for(region, &SectionOrder::canonical())
                .contains(&SectionKey::Summary));
        }
    }
}
