mod common;

use common::{pair_table, run_default, run_with_config};
use std::sync::atomic::{AtomicUsize, Ordering};
use text_diff::{
    CallbackSink, CompareConfig, CompareError, NoProgress, ProgressCallback, RowFailure, RowKey,
    TextComparer,
};

#[test]
fn records_preserve_input_order_and_keys() {
    let outcome = run_default(&[
        (10, Some("alpha"), Some("beta")),
        (3, Some("same"), Some("same")),
        (7, Some("kitten"), Some("sitting")),
    ]);
    let keys: Vec<RowKey> = outcome.records.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![RowKey(10), RowKey(3), RowKey(7)]);
    assert!(outcome.complete);
    assert!(outcome.failures.is_empty());
}

#[test]
fn identical_rows_score_one_and_stay_unmarked() {
    let outcome = run_default(&[(0, Some("same"), Some("same"))]);
    let record = &outcome.records[0];
    assert_eq!(record.ratio, 1.0);
    assert_eq!(record.text_a, "same");
    assert_eq!(record.text_b, "same");
}

#[test]
fn threshold_skips_markup_for_dissimilar_pairs() {
    let config = CompareConfig::builder()
        .min_ratio_for_highlight(0.9)
        .build()
        .expect("valid config");
    // "a"/"abc" scores exactly 0.5: below threshold, raw text passes through.
    // The 19-char pair differs in one character and scores ~0.95: wrapped.
    let outcome = run_with_config(
        &[
            (0, Some("a"), Some("abc")),
            (1, Some("abcdefghijklmnopqrs"), Some("abcdefghijklmnopqrx")),
        ],
        config,
    );

    let low = &outcome.records[0];
    assert_eq!(low.ratio, 0.5);
    assert_eq!(low.text_a, "a");
    assert_eq!(low.text_b, "abc");

    let high = &outcome.records[1];
    assert!(high.ratio > 0.9);
    assert!(high.text_a.contains("<span class='chg'>"));
    assert!(high.text_b.contains("<span class='chg'>"));
}

#[test]
fn pair_exactly_at_threshold_is_highlighted() {
    let config = CompareConfig::builder()
        .min_ratio_for_highlight(0.9)
        .build()
        .expect("valid config");
    // 9 of 10 characters match on each side: ratio is exactly 0.9.
    let outcome = run_with_config(&[(0, Some("abcdefghij"), Some("abcdefghix"))], config);
    let record = &outcome.records[0];
    assert_eq!(record.ratio, 0.9);
    assert!(record.text_a.contains("<span class='chg'>"));
}

#[test]
fn missing_values_fail_their_row_only() {
    let outcome = run_default(&[
        (0, Some("keep"), Some("kept")),
        (1, Some("orphan"), None),
        (2, None, Some("orphan")),
    ]);

    assert!(!outcome.complete);
    let keys: Vec<RowKey> = outcome.records.iter().map(|r| r.key).collect();
    assert_eq!(keys, vec![RowKey(0)]);

    assert_eq!(
        outcome.failures,
        vec![
            RowFailure::MissingValue {
                key: RowKey(1),
                column: "after".into(),
            },
            RowFailure::MissingValue {
                key: RowKey(2),
                column: "before".into(),
            },
        ]
    );
}

#[test]
fn oversized_pairs_fail_instead_of_aligning() {
    let config = CompareConfig::builder()
        .max_align_chars(10)
        .build()
        .expect("valid config");
    let outcome = run_with_config(
        &[
            (0, Some("abcdefgh"), Some("abcdefgX")), // 16 chars combined, differs
            (1, Some("short"), Some("shore")),
        ],
        config,
    );
    assert!(!outcome.complete);
    assert_eq!(
        outcome.failures,
        vec![RowFailure::PairTooLong {
            key: RowKey(0),
            chars: 16,
            limit: 10,
        }]
    );
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].key, RowKey(1));
}

#[test]
fn identical_oversized_pairs_take_the_fast_path() {
    let config = CompareConfig::builder()
        .max_align_chars(4)
        .build()
        .expect("valid config");
    let long = "a long identical value well past the limit";
    let outcome = run_with_config(&[(0, Some(long), Some(long))], config);
    assert!(outcome.complete);
    assert_eq!(outcome.records[0].ratio, 1.0);
}

#[test]
fn second_run_is_rejected_and_keeps_the_first_outcome() {
    let table = pair_table(&[(0, Some("kitten"), Some("sitting"))]);
    let mut comparer =
        TextComparer::new(&table, "before", "after", CompareConfig::default()).unwrap();
    comparer.run(&NoProgress).expect("first run");

    let err = comparer.run(&NoProgress).expect_err("second run must fail");
    assert!(matches!(err, CompareError::AlreadyRun));
    assert_eq!(err.code(), "TXDIFF_CMP_001");

    let outcome = comparer.outcome().expect("first outcome still readable");
    assert_eq!(outcome.records.len(), 1);
}

#[test]
fn unknown_column_is_reported_with_alternatives() {
    let table = pair_table(&[(0, Some("x"), Some("y"))]);
    let err = TextComparer::new(&table, "befro", "after", CompareConfig::default())
        .expect_err("typo must fail");
    match &err {
        CompareError::ColumnNotFound {
            requested,
            available,
        } => {
            assert_eq!(requested, "befro");
            assert_eq!(available, &["before".to_string(), "after".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), "TXDIFF_CMP_002");
    assert!(err.to_string().contains("before, after"));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let table = pair_table(&[(0, Some("x"), Some("y"))]);
    let mut config = CompareConfig::default();
    config.min_ratio_for_highlight = 2.0;
    let err = TextComparer::new(&table, "before", "after", config)
        .expect_err("threshold out of range");
    assert!(matches!(err, CompareError::InvalidConfig(_)));
}

#[test]
fn streaming_emits_records_in_input_order() {
    let table = pair_table(&[
        (5, Some("one"), Some("won")),
        (6, Some("two"), Some("two")),
        (7, Some("three"), None),
    ]);
    let mut comparer =
        TextComparer::new(&table, "before", "after", CompareConfig::default()).unwrap();

    let mut seen: Vec<RowKey> = Vec::new();
    let mut sink = CallbackSink::new(|record| seen.push(record.key));
    let summary = comparer
        .run_streaming(&mut sink, &NoProgress)
        .expect("streaming run");
    drop(sink);

    assert_eq!(seen, vec![RowKey(5), RowKey(6)]);
    assert_eq!(summary.record_count, 2);
    assert!(!summary.complete);
    assert_eq!(summary.failures.len(), 1);

    // A streamed comparer is spent like a batch one.
    let err = comparer.run(&NoProgress).expect_err("already streamed");
    assert!(matches!(err, CompareError::AlreadyRun));
    assert!(comparer.outcome().is_none());
}

#[test]
fn permuting_rows_permutes_results_identically() {
    let rows = [
        (0u64, Some("good morning"), Some("good evening")),
        (1u64, Some("hello world"), Some("help the world")),
        (2u64, Some("same"), Some("same")),
    ];
    let mut reversed = rows;
    reversed.reverse();

    let forward = run_default(&rows);
    let backward = run_default(&reversed);

    for record in &forward.records {
        let twin = backward
            .records
            .iter()
            .find(|r| r.key == record.key)
            .expect("every key appears in both runs");
        assert_eq!(twin, record);
    }
}

#[test]
fn progress_reaches_completion() {
    struct Counting {
        calls: AtomicUsize,
        final_percent: AtomicUsize,
    }
    impl ProgressCallback for Counting {
        fn on_progress(&self, phase: &str, percent: f32) {
            assert_eq!(phase, "compare");
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.final_percent
                .store((percent * 100.0) as usize, Ordering::Relaxed);
        }
    }

    let table = pair_table(&[
        (0, Some("a"), Some("b")),
        (1, Some("c"), Some("d")),
        (2, Some("e"), Some("f")),
    ]);
    let mut comparer =
        TextComparer::new(&table, "before", "after", CompareConfig::default()).unwrap();
    let progress = Counting {
        calls: AtomicUsize::new(0),
        final_percent: AtomicUsize::new(0),
    };
    comparer.run(&progress).expect("run");

    assert_eq!(progress.calls.load(Ordering::Relaxed), 3);
    assert_eq!(progress.final_percent.load(Ordering::Relaxed), 100);
}

#[test]
fn outcome_serializes_to_json() {
    let outcome = run_default(&[(0, Some("kitten"), Some("sitting"))]);
    let json = text_diff::serialize_outcome(&outcome).expect("serialize");
    assert!(json.contains("\"column_a\":\"before\""));
    assert!(json.contains("\"records\""));
    // No failures: the field is omitted entirely.
    assert!(!json.contains("\"failures\""));
}
