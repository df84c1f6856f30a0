//! HTML rendering of a comparison outcome.
//!
//! Produces a self-contained fragment: an inline style block defining the
//! three highlight classes, then a `<table>` with one row per comparison
//! record. The class names (`add`, `chg`, `sub`) and the
//! `thead`/`tbody`/`tr`/`th`/`td` structure are a stable external contract;
//! consumers embed the fragment verbatim in larger pages.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;

use crate::engine::{CompareOutcome, ComparisonRecord};
use crate::error_codes;
use crate::table::{RowKey, RowProjection};

/// Inline CSS for the three highlight classes.
pub const CSS_STYLES: &str = "\n.add {background-color:#aaffaa}\n.chg {background-color:#ffff77}\n.sub {background-color:#ffaaaa}\n";

const RATIO_COLUMN: &str = "ratio";
const ROW_INDEX_COLUMN: &str = "row";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Rendering parameters for one presentation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Rows rendered at most, taken from the front of the (possibly sorted)
    /// sequence. `None` means unlimited.
    pub max_rows: Option<u32>,
    /// Sort by ratio; `None` keeps insertion (or projection) order.
    pub sort: Option<SortOrder>,
    /// Prepend a column showing each record's row key.
    pub show_row_index: bool,
    /// Decimal digits used to display the ratio column.
    pub ratio_digits: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            max_rows: Some(1000),
            sort: None,
            show_row_index: false,
            ratio_digits: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PresentError {
    #[error("[TXDIFF_HTML_001] projection references row key {key}, which is not in the comparison result. Suggestion: project only keys that were compared.")]
    UnknownRowKey { key: RowKey },

    #[error("[TXDIFF_HTML_002] projection column '{column}' collides with a reserved output column. Suggestion: rename the projection column.")]
    ReservedColumn { column: String },
}

impl PresentError {
    pub fn code(&self) -> &'static str {
        match self {
            PresentError::UnknownRowKey { .. } => error_codes::HTML_UNKNOWN_ROW_KEY,
            PresentError::ReservedColumn { .. } => error_codes::HTML_RESERVED_COLUMN,
        }
    }
}

struct RenderRow<'a> {
    record: &'a ComparisonRecord,
    extras: Vec<Option<String>>,
}

/// Renders an outcome as an HTML fragment.
///
/// A projection, when given, both filters the rows (only projected keys are
/// rendered, in projection order) and contributes extra columns joined by
/// row key. A projected key missing from the outcome fails the whole call
/// rather than producing a partial render. `config.sort` overrides
/// projection order; ties keep their pre-sort relative order.
pub fn render_html(
    outcome: &CompareOutcome,
    projection: Option<&dyn RowProjection>,
    config: &RenderConfig,
) -> Result<String, PresentError> {
    let extra_columns: &[String] = projection.map(|p| p.columns()).unwrap_or(&[]);
    for name in extra_columns {
        let reserved = name == RATIO_COLUMN
            || name == ROW_INDEX_COLUMN
            || *name == outcome.column_a
            || *name == outcome.column_b;
        if reserved {
            return Err(PresentError::ReservedColumn {
                column: name.clone(),
            });
        }
    }

    let mut rows: Vec<RenderRow<'_>> = match projection {
        Some(projection) => {
            let by_key: FxHashMap<RowKey, &ComparisonRecord> = outcome
                .records
                .iter()
                .map(|record| (record.key, record))
                .collect();
            let mut rows = Vec::new();
            for key in projection.keys() {
                let record = *by_key
                    .get(&key)
                    .ok_or(PresentError::UnknownRowKey { key })?;
                let extras = (0..extra_columns.len())
                    .map(|column| projection.value(key, column).map(str::to_owned))
                    .collect();
                rows.push(RenderRow { record, extras });
            }
            rows
        }
        None => outcome
            .records
            .iter()
            .map(|record| RenderRow {
                record,
                extras: Vec::new(),
            })
            .collect(),
    };

    // Stable sort on the exact ratio, so equal-ratio rows keep their
    // pre-sort relative order.
    match config.sort {
        Some(SortOrder::Ascending) => {
            rows.sort_by(|x, y| x.record.ratio.total_cmp(&y.record.ratio));
        }
        Some(SortOrder::Descending) => {
            rows.sort_by(|x, y| y.record.ratio.total_cmp(&x.record.ratio));
        }
        None => {}
    }

    if let Some(max_rows) = config.max_rows {
        rows.truncate(max_rows as usize);
    }

    Ok(assemble_document(outcome, extra_columns, &rows, config))
}

fn assemble_document(
    outcome: &CompareOutcome,
    extra_columns: &[String],
    rows: &[RenderRow<'_>],
    config: &RenderConfig,
) -> String {
    let mut html = String::new();

    for failure in &outcome.failures {
        let _ = writeln!(html, "<p>Warning: {failure}</p>");
    }

    html.push_str("<style type='text/css'>");
    html.push_str(CSS_STYLES);
    html.push_str("</style>\n");

    html.push_str("<table>\n<thead>");
    if config.show_row_index {
        push_header_cell(&mut html, ROW_INDEX_COLUMN);
    }
    for name in extra_columns {
        push_header_cell(&mut html, name);
    }
    push_header_cell(&mut html, RATIO_COLUMN);
    push_header_cell(&mut html, &outcome.column_a);
    push_header_cell(&mut html, &outcome.column_b);
    html.push_str("</thead>\n<tbody>");

    for row in rows {
        html.push_str("<tr>");
        if config.show_row_index {
            push_cell(&mut html, &row.record.key.to_string());
        }
        for extra in &row.extras {
            push_cell(&mut html, extra.as_deref().unwrap_or(""));
        }
        push_cell(
            &mut html,
            &format!("{:.*}", config.ratio_digits as usize, row.record.ratio),
        );
        push_cell(&mut html, &row.record.text_a);
        push_cell(&mut html, &row.record.text_b);
        html.push_str("</tr>");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn push_header_cell(html: &mut String, name: &str) {
    let _ = write!(html, "<th> {name} </th>");
}

fn push_cell(html: &mut String, value: &str) {
    let _ = write!(html, "<td> {value} </td>");
}
