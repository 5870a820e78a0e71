//! Input and output data model for one pipeline run.
//!
//! `RawRecord`s arrive grouped per source, survive one pass through the
//! pipeline, and are discarded. `Entity` is the deduplicated, fully
//! classified form handed to the rendering side; everything here derives
//! serde so batches and finished tables round-trip through the CLI's JSON
//! artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structured category metadata attached to a raw record.
///
/// The classifier consumes these signals in priority order; the merger
/// gap-fills each field independently when the same entity arrives from
/// several sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHint {
    /// Human-readable technology-category tag, used verbatim when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology_category: Option<String>,
    /// Machine slug (e.g. `compute`), mapped through a fixed lookup table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_category_slug: Option<String>,
    /// Raw badge payload; may itself be an embedded JSON value carrying a
    /// list of category labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl CategoryHint {
    pub fn is_empty(&self) -> bool {
        self.technology_category.is_none()
            && self.tech_category_slug.is_none()
            && self.badge.is_none()
    }
}

/// One raw catalog item as produced by a source adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Stable source-side identifier (e.g. a directory slug). Secondary
    /// merge key when names differ only in casing or are absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub hint: CategoryHint,
}

/// An ordered group of raw records from a single source.
///
/// Batch order (and record order within a batch) is part of the pipeline's
/// determinism contract: it decides which source wins conflicting fields
/// and, transitively, symbol quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBatch {
    pub source_id: String,
    pub records: Vec<RawRecord>,
}

impl SourceBatch {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            records: Vec::new(),
        }
    }
}

/// The canonical, deduplicated representation of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Vendor qualifier stripped from the display name (default `AWS`).
    pub prefix: String,
    /// Canonical display name, parenthetical qualifier removed. Unique
    /// (case-insensitive) within one run's output.
    pub name: String,
    pub description: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// 1–3 character display symbol, unique for the run. Empty only in the
    /// documented symbol-exhaustion case, which is always diagnosed.
    pub symbol: String,
    pub category: String,
    /// 1-based grid coordinates assigned by the layout engine.
    pub row: u32,
    pub column: u32,
    /// Which sources contributed to this entity.
    pub sources: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "CategoryHint::is_empty")]
    pub hint: CategoryHint,
}

impl Entity {
    /// Create an entity from its first sighting. Symbol, category and
    /// position are filled in by later pipeline stages.
    pub fn first_seen(prefix: String, name: String, record: &RawRecord, source_id: &str) -> Self {
        let mut sources = BTreeSet::new();
        sources.insert(source_id.to_string());
        Self {
            prefix,
            name,
            description: record.description.clone().unwrap_or_default(),
            link: record.link.clone().unwrap_or_default(),
            code: record.code.clone(),
            symbol: String::new(),
            category: String::new(),
            row: 0,
            column: 0,
            sources,
            hint: record.hint.clone(),
        }
    }
}

/// One category of the finished table, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// `name` with `&`, `,` and spaces removed (CSS-safe).
    pub css_class: String,
    /// Hex color drawn from the fixed palette, stable within one run.
    pub color: String,
    pub services: Vec<Entity>,
}

/// The finished table: ordered categories plus the render height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicTable {
    pub title: String,
    pub description: String,
    pub categories: Vec<Category>,
    /// Highest grid row in use, floored at the block template's own height.
    pub grid_rows: u32,
}

impl PeriodicTable {
    /// Total number of positioned entities across all categories.
    pub fn entity_count(&self) -> usize {
        self.categories.iter().map(|c| c.services.len()).sum()
    }
}
