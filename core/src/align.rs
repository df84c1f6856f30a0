//! Character-level sequence alignment.
//!
//! [`align`] decomposes a pair of texts into an ordered list of tagged spans
//! ([`AlignOp`]) and a matched-character total from which the similarity
//! ratio is derived. The decomposition repeatedly takes the longest
//! contiguous block of identical characters, then resolves the unmatched
//! regions on either side of it the same way.
//!
//! Runtime is worst-case `O(len_a * len_b)` per pair, which is acceptable
//! for record-level text fields; callers comparing longer payloads should
//! bound input size (see `CompareConfig::max_align_chars`).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// A tagged span pairing a region of sequence A with a region of sequence B.
///
/// Offsets are 0-based character indices, end-exclusive. Ops produced by
/// [`align`] are contiguous: each op starts where the previous one ended on
/// both sides, the first starts at `(0, 0)` and the last ends at
/// `(len_a, len_b)`. `Equal` spans have identical length and content on both
/// sides; `Delete` spans are empty on the B side, `Insert` spans empty on
/// the A side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignOp {
    pub tag: AlignTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

impl AlignOp {
    fn equal_block(a_start: usize, b_start: usize, len: usize) -> AlignOp {
        AlignOp {
            tag: AlignTag::Equal,
            a_start,
            a_end: a_start + len,
            b_start,
            b_end: b_start + len,
        }
    }
}

/// The result of aligning two character sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub ops: Vec<AlignOp>,
    matched: usize,
    total: usize,
}

impl Alignment {
    /// Exact similarity ratio `2 * M / T`, where `M` is the summed length of
    /// `Equal` spans and `T` the combined length of both inputs.
    ///
    /// Returns exactly `1.0` for identical inputs (the empty/empty pair is
    /// `1.0` by definition, not by division) and `0.0` when no characters
    /// match. Threshold comparisons must use this exact value; rounding is a
    /// display concern, see [`Alignment::rounded_ratio`].
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        2.0 * self.matched as f64 / self.total as f64
    }

    /// Ratio rounded half-away-from-zero to `digits` decimal places, for
    /// display stability.
    pub fn rounded_ratio(&self, digits: u32) -> f64 {
        let scale = 10f64.powi(digits as i32);
        (self.ratio() * scale).round() / scale
    }

    /// Summed length of `Equal` spans.
    pub fn matched_chars(&self) -> usize {
        self.matched
    }
}

/// Aligns two texts character by character.
///
/// Identical inputs short-circuit to a single full-length `Equal` op (no op
/// at all for the empty/empty pair) without running the block search.
/// Otherwise the longest contiguous matching block is found; among blocks of
/// equal length the one starting earliest in A wins, then earliest in B, so
/// results are deterministic for any input. Every character is eligible to
/// match regardless of how often it occurs; no popularity discounting is
/// applied, so outputs do not depend on input statistics.
pub fn align(a: &str, b: &str) -> Alignment {
    if a == b {
        let len = a.chars().count();
        let ops = if len == 0 {
            Vec::new()
        } else {
            vec![AlignOp::equal_block(0, 0, len)]
        };
        return Alignment {
            ops,
            matched: len,
            total: len * 2,
        };
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let blocks = matching_blocks(&a, &b);
    let (ops, matched) = ops_from_blocks(a.len(), b.len(), &blocks);

    debug_assert!(
        covers_both_sequences(&ops, a.len(), b.len()),
        "ops must cover both sequences contiguously and exactly once"
    );

    Alignment {
        ops,
        matched,
        total: a.len() + b.len(),
    }
}

/// All maximal matching blocks as `(a_start, b_start, len)`, in ascending
/// position order, with adjacent blocks merged.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<(usize, usize, usize)> {
    let mut postings: FxHashMap<char, Vec<usize>> = FxHashMap::default();
    for (j, &ch) in b.iter().enumerate() {
        postings.entry(ch).or_default().push(j);
    }

    // Work-list of unresolved (a_lo, a_hi, b_lo, b_hi) sub-ranges instead of
    // recursion, so pathological inputs cannot exhaust the call stack.
    let mut pending: Vec<(usize, usize, usize, usize)> = vec![(0, a.len(), 0, b.len())];
    let mut blocks: Vec<(usize, usize, usize)> = Vec::new();

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &postings, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        blocks.push((i, j, size));
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    blocks.sort_unstable();
    merge_adjacent(blocks)
}

/// Longest contiguous matching block within `a[a_lo..a_hi]` x `b[b_lo..b_hi]`.
///
/// `j2len[j]` holds the length of the longest match ending at `a[i-1]`/`b[j]`
/// from the previous row of the scan; a strictly-greater update rule makes
/// the earliest qualifying block win ties.
fn longest_match(
    a: &[char],
    postings: &FxHashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let mut best_i = a_lo;
    let mut best_j = b_lo;
    let mut best_size = 0usize;

    let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
    for i in a_lo..a_hi {
        let mut next_j2len: FxHashMap<usize, usize> = FxHashMap::default();
        if let Some(positions) = postings.get(&a[i]) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }
                let prev = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0)
                } else {
                    0
                };
                let size = prev + 1;
                next_j2len.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}

fn merge_adjacent(blocks: Vec<(usize, usize, usize)>) -> Vec<(usize, usize, usize)> {
    let mut merged: Vec<(usize, usize, usize)> = Vec::with_capacity(blocks.len());
    for (i, j, size) in blocks {
        match merged.last_mut() {
            Some((mi, mj, msize)) if *mi + *msize == i && *mj + *msize == j => {
                *msize += size;
            }
            _ => merged.push((i, j, size)),
        }
    }
    merged
}

/// Turns matching blocks into the full contiguous op list, classifying the
/// gaps between blocks as replace/delete/insert.
fn ops_from_blocks(
    len_a: usize,
    len_b: usize,
    blocks: &[(usize, usize, usize)],
) -> (Vec<AlignOp>, usize) {
    let mut ops = Vec::with_capacity(blocks.len() * 2 + 1);
    let mut matched = 0usize;
    let mut a_pos = 0usize;
    let mut b_pos = 0usize;

    for &(i, j, size) in blocks {
        if let Some(tag) = gap_tag(a_pos, i, b_pos, j) {
            ops.push(AlignOp {
                tag,
                a_start: a_pos,
                a_end: i,
                b_start: b_pos,
                b_end: j,
            });
        }
        ops.push(AlignOp::equal_block(i, j, size));
        matched += size;
        a_pos = i + size;
        b_pos = j + size;
    }

    if let Some(tag) = gap_tag(a_pos, len_a, b_pos, len_b) {
        ops.push(AlignOp {
            tag,
            a_start: a_pos,
            a_end: len_a,
            b_start: b_pos,
            b_end: len_b,
        });
    }

    (ops, matched)
}

fn gap_tag(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Option<AlignTag> {
    match (a_start < a_end, b_start < b_end) {
        (true, true) => Some(AlignTag::Replace),
        (true, false) => Some(AlignTag::Delete),
        (false, true) => Some(AlignTag::Insert),
        (false, false) => None,
    }
}

fn covers_both_sequences(ops: &[AlignOp], len_a: usize, len_b: usize) -> bool {
    let mut a_pos = 0usize;
    let mut b_pos = 0usize;
    for op in ops {
        if op.a_start != a_pos || op.b_start != b_pos || op.a_end < op.a_start || op.b_end < op.b_start
        {
            return false;
        }
        a_pos = op.a_end;
        b_pos = op.b_end;
    }
    a_pos == len_a && b_pos == len_b
}
