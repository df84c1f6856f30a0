#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use text_diff::{align, highlight, HighlightStyles};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    a: String,
    b: String,
}

fn strip(text: &str, styles: &HighlightStyles) -> String {
    let mut out = text.to_owned();
    for delim in [
        &styles.replace.open,
        &styles.replace.close,
        &styles.delete.open,
        &styles.delete.close,
        &styles.insert.open,
        &styles.insert.close,
    ] {
        out = out.replace(delim.as_str(), "");
    }
    out
}

fuzz_target!(|input: FuzzInput| {
    let a: String = input.a.chars().take(64).collect();
    let b: String = input.b.chars().take(64).collect();
    // Inputs containing the delimiters themselves would make the strip
    // round-trip ambiguous, not the insertion wrong.
    if a.contains("<span") || a.contains("</span>") || b.contains("<span") || b.contains("</span>")
    {
        return;
    }

    let styles = HighlightStyles::default();
    let alignment = align(&a, &b);
    let (out_a, out_b) = highlight(&a, &b, &alignment.ops, &styles);

    assert_eq!(strip(&out_a, &styles), a, "markup must strip back to A");
    assert_eq!(strip(&out_b, &styles), b, "markup must strip back to B");

    for out in [&out_a, &out_b] {
        assert_eq!(
            out.matches("<span").count(),
            out.matches("</span>").count(),
            "tags must stay balanced"
        );
    }
});
