//! The pipeline: merge -> sort -> classify -> allocate -> shorten -> lay out.
//!
//! Pure plumbing over the other modules. All registries are local to one
//! invocation, so concurrent runs never interfere and replaying the same
//! batches reproduces the same table bit for bit.

use crate::category::{self, CategoryBook};
use crate::layout;
use crate::merge;
use crate::record::{Category, Entity, PeriodicTable, SourceBatch};
use crate::report::{Diagnostic, RunReport};
use crate::symbol::SymbolRegistry;

pub const DEFAULT_TITLE: &str = "Periodic Table of Amazon Web Services";

/// Curated short display forms for names too long to render in a tile.
/// Applied after merging and symbol allocation, which both key on the full
/// canonical name.
pub const PREFERRED_NAMES: &[(&str, &str)] = &[
    (
        "Elastic Container Service for Kubernetes",
        "ECS for Kubernetes",
    ),
    ("Serverless Application Repository", "Serverless App Repo"),
];

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub title: String,
    pub description: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Run the full pipeline over source batches, in the caller's order.
pub fn run(batches: &[SourceBatch], options: &PipelineOptions) -> RunReport {
    let mut diagnostics = Vec::new();

    // Merge all sources into one deduplicated entity list.
    let mut entities: Vec<Entity> = Vec::new();
    for batch in batches {
        merge::merge_batch(&mut entities, batch, &mut diagnostics);
    }
    merge::sort_entities(&mut entities);

    // Classify from the merged hints.
    for entity in &mut entities {
        entity.category = category::classify(&entity.name, &entity.hint, &mut diagnostics);
    }

    // Symbols are allocated in sorted entity order; the canonical name is
    // the allocation key, the curated short form only affects display.
    let mut registry = SymbolRegistry::new();
    for entity in &mut entities {
        entity.symbol = registry.allocate(&entity.name, &mut diagnostics);
        entity.name = preferred_name(&entity.name).to_string();
    }

    // Group into categories in first-seen order.
    let mut book = CategoryBook::new();
    let mut categories: Vec<Category> = Vec::new();
    for entity in entities {
        let idx = match categories.iter().position(|c| c.name == entity.category) {
            Some(idx) => idx,
            None => {
                categories.push(Category {
                    name: entity.category.clone(),
                    css_class: category::css_class(&entity.category),
                    color: book.color_for(&entity.category).to_string(),
                    services: Vec::new(),
                });
                categories.len() - 1
            }
        };
        categories[idx].services.push(entity);
    }

    let grid_rows = layout::assign_positions(&mut categories);

    RunReport {
        table: PeriodicTable {
            title: options.title.clone(),
            description: options.description.clone(),
            categories,
            grid_rows,
        },
        diagnostics,
    }
}

fn preferred_name(name: &str) -> &str {
    PREFERRED_NAMES
        .iter()
        .find(|(long, _)| *long == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

/// Count warning-level diagnostics of each kind, for summary lines.
pub fn diagnostic_counts(diagnostics: &[Diagnostic]) -> (usize, usize, usize, usize) {
    let mut skipped = 0;
    let mut exhausted = 0;
    let mut collisions = 0;
    let mut badges = 0;
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::SkippedRecord { .. } => skipped += 1,
            Diagnostic::SymbolExhausted { .. } => exhausted += 1,
            Diagnostic::ReservedCollision { .. } => collisions += 1,
            Diagnostic::MalformedBadge { .. } => badges += 1,
        }
    }
    (skipped, exhausted, collisions, badges)
}
