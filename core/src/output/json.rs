//! JSON serialization of comparison results.

use crate::engine::{CompareOutcome, ComparisonRecord};

pub fn serialize_records(records: &[ComparisonRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

pub fn serialize_outcome(outcome: &CompareOutcome) -> serde_json::Result<String> {
    serde_json::to_string(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ComparisonRecord;
    use crate::table::RowKey;

    #[test]
    fn records_serialize_with_key_and_ratio() {
        let records = vec![ComparisonRecord {
            key: RowKey(5),
            ratio: 1.0,
            text_a: "same".into(),
            text_b: "same".into(),
        }];
        let json = serialize_records(&records).expect("serialize");
        assert!(json.contains("\"key\":5"));
        assert!(json.contains("\"ratio\":1.0"));
    }
}
