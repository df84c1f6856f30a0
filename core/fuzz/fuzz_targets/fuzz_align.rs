#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use text_diff::{align, AlignTag};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    a: String,
    b: String,
}

fuzz_target!(|input: FuzzInput| {
    let a: String = input.a.chars().take(64).collect();
    let b: String = input.b.chars().take(64).collect();

    let alignment = align(&a, &b);
    let chars_a: Vec<char> = a.chars().collect();
    let chars_b: Vec<char> = b.chars().collect();

    let mut a_pos = 0usize;
    let mut b_pos = 0usize;
    for op in &alignment.ops {
        assert_eq!(op.a_start, a_pos, "ops must be contiguous on A");
        assert_eq!(op.b_start, b_pos, "ops must be contiguous on B");
        assert!(op.a_end >= op.a_start && op.b_end >= op.b_start);
        match op.tag {
            AlignTag::Equal => {
                assert_eq!(op.a_end - op.a_start, op.b_end - op.b_start);
                assert_eq!(
                    chars_a[op.a_start..op.a_end],
                    chars_b[op.b_start..op.b_end]
                );
            }
            AlignTag::Replace => {
                assert!(op.a_end > op.a_start && op.b_end > op.b_start)
            }
            AlignTag::Delete => assert!(op.a_end > op.a_start && op.b_end == op.b_start),
            AlignTag::Insert => assert!(op.a_end == op.a_start && op.b_end > op.b_start),
        }
        a_pos = op.a_end;
        b_pos = op.b_end;
    }
    assert_eq!(a_pos, chars_a.len(), "ops must cover all of A");
    assert_eq!(b_pos, chars_b.len(), "ops must cover all of B");

    let ratio = alignment.ratio();
    assert!((0.0..=1.0).contains(&ratio));
    assert_eq!(ratio == 1.0, a == b);

    // Same inputs, same answer.
    assert_eq!(align(&a, &b), alignment);
});
