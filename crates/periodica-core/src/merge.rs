//! Cross-source deduplication and provenance tracking.
//!
//! Batches are merged sequentially in caller order. Matching is by
//! case-insensitive clean name first, then by the stable `code` when both
//! sides carry one. First-seen fields win; later sources only fill gaps
//! and extend the `sources` set.

use crate::name;
use crate::record::{Entity, SourceBatch};
use crate::report::Diagnostic;

/// Merge one batch of raw records into the accumulated entity list.
///
/// Records with no resolvable display name are dropped and diagnosed, not
/// treated as failures.
pub fn merge_batch(
    entities: &mut Vec<Entity>,
    batch: &SourceBatch,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for record in &batch.records {
        let parsed = name::parse(&record.display_name);
        if parsed.name.is_empty() {
            diagnostics.push(Diagnostic::SkippedRecord {
                source_id: batch.source_id.clone(),
                display_name: record.display_name.clone(),
            });
            continue;
        }

        let found = entities
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(&parsed.name))
            .or_else(|| match record.code.as_deref() {
                Some(code) => entities
                    .iter()
                    .position(|e| e.code.as_deref() == Some(code)),
                None => None,
            });

        match found {
            Some(idx) => {
                let entity = &mut entities[idx];
                if entity.description.is_empty() {
                    if let Some(description) = &record.description {
                        entity.description = description.clone();
                    }
                }
                if entity.link.is_empty() {
                    if let Some(link) = &record.link {
                        entity.link = link.clone();
                    }
                }
                if entity.code.is_none() {
                    entity.code = record.code.clone();
                }
                if entity.hint.technology_category.is_none() {
                    entity.hint.technology_category = record.hint.technology_category.clone();
                }
                if entity.hint.tech_category_slug.is_none() {
                    entity.hint.tech_category_slug = record.hint.tech_category_slug.clone();
                }
                if entity.hint.badge.is_none() {
                    entity.hint.badge = record.hint.badge.clone();
                }
                entity.sources.insert(batch.source_id.clone());
            }
            None => {
                entities.push(Entity::first_seen(
                    parsed.prefix,
                    parsed.name,
                    record,
                    &batch.source_id,
                ));
            }
        }
    }
}

/// Deterministic output ordering: case-insensitive clean name.
pub fn sort_entities(entities: &mut [Entity]) {
    entities.sort_by(|a, b| {
        a.name
            .to_ascii_lowercase()
            .cmp(&b.name.to_ascii_lowercase())
    });
}
