//! Property tests for the run-level uniqueness guarantees.

use periodica_core::pipeline::{self, PipelineOptions};
use periodica_core::record::{RawRecord, SourceBatch};
use periodica_core::report::Diagnostic;
use proptest::prelude::*;
use std::collections::HashSet;

/// Display names with the shape the catalog actually produces: an optional
/// vendor token plus one or more capitalized words.
fn display_name_strategy() -> impl Strategy<Value = String> {
    let word = "[A-Z][a-z]{1,8}";
    let words = proptest::collection::vec(word, 1..4);
    let vendor = prop_oneof![Just(""), Just("AWS "), Just("Amazon ")];
    (vendor, words).prop_map(|(vendor, words)| format!("{vendor}{}", words.join(" ")))
}

fn batch_strategy() -> impl Strategy<Value = SourceBatch> {
    proptest::collection::vec(display_name_strategy(), 1..60).prop_map(|names| SourceBatch {
        source_id: "prop".to_string(),
        records: names
            .into_iter()
            .map(|display_name| RawRecord {
                display_name,
                ..RawRecord::default()
            })
            .collect(),
    })
}

proptest! {
    #[test]
    fn symbols_are_unique_or_diagnosed(batch in batch_strategy()) {
        let report = pipeline::run(&[batch], &PipelineOptions::default());

        let mut symbols = HashSet::new();
        let mut empty = 0usize;
        for category in &report.table.categories {
            for service in &category.services {
                if service.symbol.is_empty() {
                    empty += 1;
                } else {
                    prop_assert!(
                        symbols.insert(service.symbol.clone()),
                        "duplicate symbol {}",
                        service.symbol
                    );
                }
            }
        }

        let exhausted = report
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::SymbolExhausted { .. }))
            .count();
        prop_assert_eq!(empty, exhausted);
    }

    #[test]
    fn positions_are_unique_and_grid_rows_cover_them(batch in batch_strategy()) {
        let report = pipeline::run(&[batch], &PipelineOptions::default());

        let mut positions = HashSet::new();
        for category in &report.table.categories {
            for service in &category.services {
                prop_assert!(service.row >= 1);
                prop_assert!(service.column >= 1 && service.column <= 19);
                prop_assert!(service.row <= report.table.grid_rows);
                prop_assert!(
                    positions.insert((service.row, service.column)),
                    "duplicate position {:?}",
                    (service.row, service.column)
                );
            }
        }
    }

    #[test]
    fn merging_a_batch_with_itself_adds_nothing(batch in batch_strategy()) {
        let once = pipeline::run(&[batch.clone()], &PipelineOptions::default());
        let twice = pipeline::run(&[batch.clone(), batch], &PipelineOptions::default());
        prop_assert_eq!(once.table, twice.table);
    }
}
