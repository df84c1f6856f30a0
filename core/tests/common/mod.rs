//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use text_diff::{
    CompareConfig, CompareOutcome, HighlightStyles, NoProgress, RowKey, TextComparer, TextTable,
};

/// Builds a two-column table ("before", "after") from `(key, before, after)`
/// triples.
pub fn pair_table(rows: &[(u64, Option<&str>, Option<&str>)]) -> TextTable {
    let mut table =
        TextTable::new(vec!["before".into(), "after".into()]).expect("unique column names");
    for (key, before, after) in rows {
        table
            .push_row(
                RowKey(*key),
                vec![before.map(str::to_owned), after.map(str::to_owned)],
            )
            .expect("valid row");
    }
    table
}

pub fn run_with_config(
    rows: &[(u64, Option<&str>, Option<&str>)],
    config: CompareConfig,
) -> CompareOutcome {
    let table = pair_table(rows);
    let mut comparer =
        TextComparer::new(&table, "before", "after", config).expect("columns resolve");
    comparer.run(&NoProgress).expect("first run succeeds");
    comparer.into_outcome().expect("outcome stored after run")
}

pub fn run_default(rows: &[(u64, Option<&str>, Option<&str>)]) -> CompareOutcome {
    run_with_config(rows, CompareConfig::default())
}

/// Removes every delimiter of `styles` from `text`, undoing highlighting.
pub fn strip_markup(text: &str, styles: &HighlightStyles) -> String {
    let mut out = text.to_owned();
    for delim in [
        &styles.replace.open,
        &styles.replace.close,
        &styles.delete.open,
        &styles.delete.close,
        &styles.insert.open,
        &styles.insert.close,
    ] {
        if !delim.is_empty() {
            out = out.replace(delim.as_str(), "");
        }
    }
    out
}

/// Every string over `alphabet` with length up to `max_len`, including the
/// empty string. Small by construction; used for exhaustive sweeps.
pub fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &frontier {
            for &ch in alphabet {
                let mut s = prefix.clone();
                s.push(ch);
                next.push(s);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}
