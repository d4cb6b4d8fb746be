//! Section Order Controller.
//!
//! Each move is a transposition of two adjacent entries, never a re-sort, so every
//! operation changes at most two positions and `move_up`/`move_down` undo each other
//! away from the boundaries. Moves that cannot happen (first/last element, absent key)
//! are no-ops, not errors; the return value says whether anything changed.

use crate::models::section::{SectionKey, SectionOrder};

/// Direction of an adjacent move, shared by section and list-entry reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl SectionOrder {
    /// Swaps `key` with its predecessor. Returns `false` when `key` is first or absent.
    pub fn move_up(&mut self, key: SectionKey) -> bool {
        match self.position(key) {
            Some(i) if i > 0 => {
                self.swap(i - 1, i);
                true
            }
            _ => false,
        }
    }

    /// Swaps `key` with its successor. Returns `false` when `key` is last or absent.
    pub fn move_down(&mut self, key: SectionKey) -> bool {
        match self.position(key) {
            Some(i) if i + 1 < self.len() => {
                self.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    pub fn shift(&mut self, key: SectionKey, direction: MoveDirection) -> bool {
        match direction {
            MoveDirection::Up => self.move_up(key),
            MoveDirection::Down => self.move_down(key),
        }
    }

    pub fn reset(&mut self) {
        *self = SectionOrder::canonical();
    }

    pub fn can_move_up(&self, key: SectionKey) -> bool {
        matches!(self.position(key), Some(i) if i > 0)
    }

    pub fn can_move_down(&self, key: SectionKey) -> bool {
        matches!(self.position(key), Some(i) if i + 1 < self.len())
    }

    /// True when the order equals the canonical default (the editor hides "Reset Order").
    pub fn is_default(&self) -> bool {
        *self == SectionOrder::canonical()
    }
}
