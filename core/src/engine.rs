//! Batch comparison engine.
//!
//! [`TextComparer`] snapshots one text-column pair from a [`TextTable`] at
//! construction, then compares every row exactly once: alignment, similarity
//! ratio, and highlight markup for pairs at or above the configured
//! threshold. A batch is a one-shot operation: the input snapshot is
//! consumed by the run so upstream storage can be released, and a second run
//! on the same instance is an error rather than a silent recompute.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::align::align;
use crate::config::{CompareConfig, ConfigError, ExecutionStrategy};
use crate::error_codes;
use crate::highlight::highlight;
use crate::progress::ProgressCallback;
use crate::sink::{RecordSink, VecSink};
use crate::table::{RowKey, TextTable};

const PHASE_COMPARE: &str = "compare";

/// Errors produced by the comparison APIs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompareError {
    #[error("[TXDIFF_CMP_001] this comparer has already been run. Suggestion: read the stored result via `outcome()` or construct a new comparer.")]
    AlreadyRun,

    #[error("[TXDIFF_CMP_002] column '{requested}' not found. Available columns: {}. Suggestion: check the column name and casing.", available.join(", "))]
    ColumnNotFound {
        requested: String,
        available: Vec<String>,
    },

    #[error("[TXDIFF_CMP_003] sink error: {message}. Suggestion: check the output destination and retry.")]
    SinkError { message: String },

    #[error("[TXDIFF_CMP_004] invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl CompareError {
    pub fn code(&self) -> &'static str {
        match self {
            CompareError::AlreadyRun => error_codes::CMP_ALREADY_RUN,
            CompareError::ColumnNotFound { .. } => error_codes::CMP_COLUMN_NOT_FOUND,
            CompareError::SinkError { .. } => error_codes::CMP_SINK_ERROR,
            CompareError::InvalidConfig(_) => error_codes::CMP_INVALID_CONFIG,
        }
    }
}

/// One compared row: the row's key, its exact similarity ratio and the two
/// (possibly highlighted) texts. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub key: RowKey,
    pub ratio: f64,
    pub text_a: String,
    pub text_b: String,
}

/// A row that could not be compared. Failures are row-scoped: they never
/// abort the batch and never affect other rows.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFailure {
    #[error("row {key}: missing value in column '{column}'")]
    MissingValue { key: RowKey, column: String },

    #[error("row {key}: combined length {chars} exceeds max_align_chars ({limit})")]
    PairTooLong {
        key: RowKey,
        chars: usize,
        limit: u32,
    },
}

impl RowFailure {
    pub fn key(&self) -> RowKey {
        match self {
            RowFailure::MissingValue { key, .. } => *key,
            RowFailure::PairTooLong { key, .. } => *key,
        }
    }
}

/// Summary metadata about a streamed comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareSummary {
    /// Whether every row produced a record.
    pub complete: bool,
    /// Per-row failures (when `complete == false`).
    pub failures: Vec<RowFailure>,
    /// Number of records emitted to the sink.
    pub record_count: usize,
}

/// The durable artifact of a comparison run.
///
/// Records appear in input-row order; failed rows are omitted from
/// `records` and listed in `failures`, and `complete` is `false` whenever
/// `failures` is non-empty. Presenters must surface the failures rather than
/// drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareOutcome {
    pub column_a: String,
    pub column_b: String,
    pub records: Vec<ComparisonRecord>,
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RowFailure>,
}

#[derive(Debug)]
enum RunState {
    Pending(Vec<PendingPair>),
    /// Ran through `run_streaming`; the records live in the caller's sink.
    Streamed,
    Finished(CompareOutcome),
}

#[derive(Debug)]
struct PendingPair {
    key: RowKey,
    text_a: Option<String>,
    text_b: Option<String>,
}

struct ColumnPair {
    a: String,
    b: String,
}

/// Compares an original/modified text column pair across a table, row by row.
#[derive(Debug)]
pub struct TextComparer {
    column_a: String,
    column_b: String,
    config: CompareConfig,
    state: RunState,
}

impl TextComparer {
    /// Resolves both columns and snapshots their values, so the source table
    /// can be dropped before the run.
    pub fn new(
        table: &TextTable,
        column_a: &str,
        column_b: &str,
        config: CompareConfig,
    ) -> Result<TextComparer, CompareError> {
        config.validate()?;

        let idx_a = resolve_column(table, column_a)?;
        let idx_b = resolve_column(table, column_b)?;

        let pairs = table
            .iter()
            .map(|row| PendingPair {
                key: row.key(),
                text_a: row.value(idx_a).map(str::to_owned),
                text_b: row.value(idx_b).map(str::to_owned),
            })
            .collect();

        Ok(TextComparer {
            column_a: column_a.to_owned(),
            column_b: column_b.to_owned(),
            config,
            state: RunState::Pending(pairs),
        })
    }

    /// Runs the batch once, storing the outcome on the comparer.
    ///
    /// The exclusive borrow is the run-once gate against concurrent
    /// re-invocation; a second sequential call returns
    /// [`CompareError::AlreadyRun`] and leaves the stored outcome intact.
    pub fn run(&mut self, progress: &dyn ProgressCallback) -> Result<(), CompareError> {
        if !matches!(self.state, RunState::Pending(_)) {
            return Err(CompareError::AlreadyRun);
        }

        let mut sink = VecSink::new();
        let summary = self.run_streaming(&mut sink, progress)?;

        self.state = RunState::Finished(CompareOutcome {
            column_a: self.column_a.clone(),
            column_b: self.column_b.clone(),
            records: sink.into_records(),
            complete: summary.complete,
            failures: summary.failures,
        });
        Ok(())
    }

    /// Runs the batch once, emitting records to `sink` in input-row order.
    pub fn run_streaming<S: RecordSink>(
        &mut self,
        sink: &mut S,
        progress: &dyn ProgressCallback,
    ) -> Result<CompareSummary, CompareError> {
        let pairs = match std::mem::replace(&mut self.state, RunState::Streamed) {
            RunState::Pending(pairs) => pairs,
            prior => {
                self.state = prior;
                return Err(CompareError::AlreadyRun);
            }
        };

        sink.begin(&self.column_a, &self.column_b)?;

        let columns = ColumnPair {
            a: self.column_a.clone(),
            b: self.column_b.clone(),
        };
        let results = compare_pairs(pairs, &columns, &self.config, progress);

        let mut failures = Vec::new();
        let mut record_count = 0usize;
        for result in results {
            match result {
                Ok(record) => {
                    record_count += 1;
                    sink.emit(record)?;
                }
                Err(failure) => failures.push(failure),
            }
        }
        sink.finish()?;

        Ok(CompareSummary {
            complete: failures.is_empty(),
            failures,
            record_count,
        })
    }

    /// The stored outcome, present after a successful [`TextComparer::run`].
    pub fn outcome(&self) -> Option<&CompareOutcome> {
        match &self.state {
            RunState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_outcome(self) -> Option<CompareOutcome> {
        match self.state {
            RunState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }
}

fn resolve_column(table: &TextTable, name: &str) -> Result<usize, CompareError> {
    table
        .column_index(name)
        .ok_or_else(|| CompareError::ColumnNotFound {
            requested: name.to_owned(),
            available: table.columns().to_vec(),
        })
}

fn compare_pairs(
    pairs: Vec<PendingPair>,
    columns: &ColumnPair,
    config: &CompareConfig,
    progress: &dyn ProgressCallback,
) -> Vec<Result<ComparisonRecord, RowFailure>> {
    match config.execution {
        ExecutionStrategy::Sequential => compare_sequential(pairs, columns, config, progress),
        #[cfg(feature = "parallel")]
        ExecutionStrategy::Parallel => compare_parallel(pairs, columns, config, progress),
        // Rejected by CompareConfig::validate when the feature is absent.
        #[cfg(not(feature = "parallel"))]
        ExecutionStrategy::Parallel => compare_sequential(pairs, columns, config, progress),
    }
}

fn compare_sequential(
    pairs: Vec<PendingPair>,
    columns: &ColumnPair,
    config: &CompareConfig,
    progress: &dyn ProgressCallback,
) -> Vec<Result<ComparisonRecord, RowFailure>> {
    let total = pairs.len().max(1);
    pairs
        .into_iter()
        .enumerate()
        .map(|(idx, pair)| {
            let result = compare_pair(pair, columns, config);
            progress.on_progress(PHASE_COMPARE, (idx + 1) as f32 / total as f32);
            result
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn compare_parallel(
    pairs: Vec<PendingPair>,
    columns: &ColumnPair,
    config: &CompareConfig,
    progress: &dyn ProgressCallback,
) -> Vec<Result<ComparisonRecord, RowFailure>> {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let total = pairs.len().max(1);
    let done = AtomicUsize::new(0);

    let mut indexed: Vec<(usize, Result<ComparisonRecord, RowFailure>)> = pairs
        .into_par_iter()
        .enumerate()
        .map(|(idx, pair)| {
            let result = compare_pair(pair, columns, config);
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            progress.on_progress(PHASE_COMPARE, completed as f32 / total as f32);
            (idx, result)
        })
        .collect();

    // Completion order is not submission order; re-associate with the input
    // position before emission.
    indexed.sort_unstable_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, result)| result).collect()
}

/// Compares one pair. Pure function of its inputs: no shared mutable state,
/// so execution order across rows cannot change any result.
fn compare_pair(
    pair: PendingPair,
    columns: &ColumnPair,
    config: &CompareConfig,
) -> Result<ComparisonRecord, RowFailure> {
    let PendingPair { key, text_a, text_b } = pair;

    let Some(text_a) = text_a else {
        return Err(RowFailure::MissingValue {
            key,
            column: columns.a.clone(),
        });
    };
    let Some(text_b) = text_b else {
        return Err(RowFailure::MissingValue {
            key,
            column: columns.b.clone(),
        });
    };

    // Identical pairs take the O(n) fast path inside `align`, so the
    // quadratic-work guard only applies to pairs that actually differ.
    if text_a != text_b {
        let chars = text_a.chars().count() + text_b.chars().count();
        if chars > config.max_align_chars as usize {
            return Err(RowFailure::PairTooLong {
                key,
                chars,
                limit: config.max_align_chars,
            });
        }
    }

    let alignment = align(&text_a, &text_b);
    let ratio = alignment.ratio();

    // `>=`: a pair exactly at the threshold is highlighted. The comparison
    // uses the exact ratio; rounding happens only at display time.
    let (text_a, text_b) = if ratio >= config.min_ratio_for_highlight {
        highlight(&text_a, &text_b, &alignment.ops, &config.styles)
    } else {
        (text_a, text_b)
    };

    Ok(ComparisonRecord {
        key,
        ratio,
        text_a,
        text_b,
    })
}
