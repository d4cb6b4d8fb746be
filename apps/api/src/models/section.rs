//! Section identifiers and the user-controlled section order.
//!
//! `SectionOrder` can only hold a permutation of the five `SectionKey`s: it wraps a
//! fixed-size array and every constructor validates. Deserialization goes through the
//! same check, so a snapshot with a duplicated or missing section never gets in.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five reorderable content blocks of a résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

impl SectionKey {
    /// Canonical order, also the default `SectionOrder`.
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Projects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
        }
    }

    /// Lenient lookup used at the HTTP boundary. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<SectionKey> {
        let raw = raw.trim();
        SectionKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionOrderError {
    #[error("section order must list exactly 5 sections, got {0}")]
    WrongLength(usize),

    #[error("section '{0}' appears more than once in the section order")]
    Duplicate(SectionKey),
}

/// An ordered permutation of all five sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SectionKey>", into = "Vec<SectionKey>")]
pub struct SectionOrder([SectionKey; 5]);

impl SectionOrder {
    /// `[summary, experience, education, skills, projects]`
    pub const fn canonical() -> Self {
        SectionOrder(SectionKey::ALL)
    }

    pub fn as_slice(&self) -> &[SectionKey] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = SectionKey> + '_ {
        self.0.iter().copied()
    }

    /// Index of `key`, or `None` if absent.
    pub fn position(&self, key: SectionKey) -> Option<usize> {
        self.0.iter().position(|k| *k == key)
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl Default for SectionOrder {
    fn default() -> Self {
        SectionOrder::canonical()
    }
}

impl TryFrom<Vec<SectionKey>> for SectionOrder {
    type Error = SectionOrderError;

    fn try_from(keys: Vec<SectionKey>) -> Result<Self, Self::Error> {
        let keys: [SectionKey; 5] = keys
            .try_into()
            .map_err(|rejected: Vec<SectionKey>| SectionOrderError::WrongLength(rejected.len()))?;

        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(SectionOrderError::Duplicate(*key));
            }
        }
        // Five distinct values drawn from a five-value enum: a permutation.
        Ok(SectionOrder(keys))
    }
}

impl From<SectionOrder> for Vec<SectionKey> {
    fn from(order: SectionOrder) -> Self {
        order.0.to_vec()
    }
}
