//! Markup injection for changed spans.
//!
//! Wraps the non-equal regions of an aligned text pair with per-tag
//! open/close markup. Insertion points come from the alignment ops, so the
//! ops must be the contiguous list produced by [`crate::align`] for the same
//! two texts.

use serde::{Deserialize, Serialize};

use crate::align::{AlignOp, AlignTag};

/// One open/close delimiter pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanStyle {
    pub open: String,
    pub close: String,
}

impl SpanStyle {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> SpanStyle {
        SpanStyle {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Delimiters for each non-equal tag.
///
/// The default wraps spans in `<span>` elements carrying the `chg`/`sub`/`add`
/// CSS classes that the HTML presenter's style block defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyles {
    pub replace: SpanStyle,
    pub delete: SpanStyle,
    pub insert: SpanStyle,
}

impl Default for HighlightStyles {
    fn default() -> Self {
        HighlightStyles {
            replace: SpanStyle::new("<span class='chg'>", "</span>"),
            delete: SpanStyle::new("<span class='sub'>", "</span>"),
            insert: SpanStyle::new("<span class='add'>", "</span>"),
        }
    }
}

impl HighlightStyles {
    fn for_tag(&self, tag: AlignTag) -> Option<&SpanStyle> {
        match tag {
            AlignTag::Equal => None,
            AlignTag::Replace => Some(&self.replace),
            AlignTag::Delete => Some(&self.delete),
            AlignTag::Insert => Some(&self.insert),
        }
    }
}

/// Wraps every non-equal span of `a` and `b` with the delimiters registered
/// for its tag.
///
/// Edits are applied from the highest offset to the lowest: ops are walked in
/// reverse, and within one op the closing delimiter is inserted before the
/// opening one. Inserting at a position shifts everything after it, so
/// materializing the later insertion point first keeps every not-yet-applied
/// offset valid. Zero-width spans (e.g. the A side of a pure insert) come out
/// as an adjacent open/close pair, never as unbalanced markup.
pub fn highlight(
    a: &str,
    b: &str,
    ops: &[AlignOp],
    styles: &HighlightStyles,
) -> (String, String) {
    let bounds_a = char_boundaries(a);
    let bounds_b = char_boundaries(b);

    let mut out_a = a.to_owned();
    let mut out_b = b.to_owned();

    for op in ops.iter().rev() {
        let Some(style) = styles.for_tag(op.tag) else {
            continue;
        };
        debug_assert!(
            op.a_end < bounds_a.len() && op.b_end < bounds_b.len(),
            "op offsets must lie within the aligned texts"
        );
        wrap_span(&mut out_a, &bounds_a, op.a_start, op.a_end, style);
        wrap_span(&mut out_b, &bounds_b, op.b_start, op.b_end, style);
    }

    (out_a, out_b)
}

/// Byte offset of every char boundary, including the end of the string, so
/// char-indexed ops can splice into UTF-8 without landing mid-codepoint.
fn char_boundaries(s: &str) -> Vec<usize> {
    let mut bounds: Vec<usize> = s.char_indices().map(|(idx, _)| idx).collect();
    bounds.push(s.len());
    bounds
}

fn wrap_span(text: &mut String, bounds: &[usize], start: usize, end: usize, style: &SpanStyle) {
    text.insert_str(bounds[end], &style.close);
    text.insert_str(bounds[start], &style.open);
}
