//! Periodica core: catalog normalization and periodic-grid layout.
//!
//! Given raw named records from one or more heterogeneous sources, this
//! crate:
//! - splits each display name into vendor prefix + canonical name,
//! - deduplicates entities across sources while keeping provenance,
//! - classifies each entity into a category with a stable palette color,
//! - assigns every entity a unique element-style symbol,
//! - computes a (row, column) grid position following the fixed
//!   periodic-table block shape, with graceful overflow.
//!
//! The whole crate is pure and synchronous: no I/O, no network, no global
//! state. Fetching, markup parsing and rendering live in the adapter and
//! CLI crates; the boundary is `Vec<SourceBatch>` in, `RunReport` out.

pub mod category;
pub mod layout;
pub mod merge;
pub mod name;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod symbol;

pub use record::{Category, CategoryHint, Entity, PeriodicTable, RawRecord, SourceBatch};
pub use report::{Diagnostic, RunReport};
