//! Text Diff: a library for comparing paired text columns of a table.
//!
//! This crate provides functionality for:
//! - Aligning two character sequences into matching and differing spans
//! - Scoring each pair with a normalized similarity ratio
//! - Wrapping changed spans with markup for visual highlighting
//! - Rendering a batch of comparisons as a self-contained HTML table
//!
//! # Quick Start
//!
//! ```
//! use text_diff::{CompareConfig, NoProgress, RenderConfig, RowKey, TextComparer, TextTable};
//!
//! let mut table = TextTable::new(vec!["before".into(), "after".into()])?;
//! table.push_row(RowKey(0), vec![Some("kitten".into()), Some("sitting".into())])?;
//!
//! let mut comparer = TextComparer::new(&table, "before", "after", CompareConfig::default())?;
//! comparer.run(&NoProgress)?;
//!
//! let outcome = comparer.outcome().expect("ran once");
//! let html = text_diff::render_html(outcome, None, &RenderConfig::default())?;
//! # assert!(html.contains("<table>"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod align;
mod capabilities;
mod config;
mod engine;
pub(crate) mod error_codes;
mod highlight;
mod output;
mod progress;
mod sink;
mod table;

pub use align::{align, AlignOp, AlignTag, Alignment};
pub use capabilities::{engine_features, EngineFeatures};
pub use config::{CompareConfig, CompareConfigBuilder, ConfigError, ExecutionStrategy};
pub use engine::{
    CompareError, CompareOutcome, CompareSummary, ComparisonRecord, RowFailure, TextComparer,
};
pub use highlight::{highlight, HighlightStyles, SpanStyle};
pub use output::html::{render_html, PresentError, RenderConfig, SortOrder, CSS_STYLES};
pub use output::json::{serialize_outcome, serialize_records};
pub use progress::{NoProgress, ProgressCallback};
pub use sink::{CallbackSink, RecordSink, VecSink};
pub use table::{RowKey, RowProjection, TableError, TableRow, TextTable};
