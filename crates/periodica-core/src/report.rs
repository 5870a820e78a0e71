//! Run-level diagnostics.
//!
//! The core never logs and never aborts a run for a single bad record;
//! per-record degradations are recorded as data and surfaced by whoever
//! drives the pipeline.

use crate::record::PeriodicTable;
use thiserror::Error;

/// A warning-level condition observed while processing one run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A raw record had no resolvable display name and was dropped.
    #[error("skipped record from `{source_id}`: no resolvable name in {display_name:?}")]
    SkippedRecord {
        source_id: String,
        display_name: String,
    },

    /// No collision-free symbol could be generated; the entity was emitted
    /// with an empty symbol.
    #[error("could not generate a symbol for `{name}` (candidate pool exhausted)")]
    SymbolExhausted { name: String },

    /// Two distinct names mapped to the same reserved symbol. The first
    /// allocation keeps it; this claimant fell through to generated
    /// allocation.
    #[error("reserved symbol `{symbol}` for `{name}` already held by `{held_by}`; generated a fallback")]
    ReservedCollision {
        name: String,
        symbol: String,
        held_by: String,
    },

    /// A badge payload could not be decoded; classification fell through to
    /// the next signal.
    #[error("unparseable badge payload for `{name}`: {detail}")]
    MalformedBadge { name: String, detail: String },
}

/// Output of one pipeline run: the finished table plus everything worth
/// warning about.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub table: PeriodicTable,
    pub diagnostics: Vec<Diagnostic>,
}
