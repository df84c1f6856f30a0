use crate::engine::{CompareError, ComparisonRecord};

/// Trait for streaming comparison records to a consumer.
pub trait RecordSink {
    /// Called once before any records are emitted, with the names of the two
    /// compared columns.
    ///
    /// Default is a no-op so sinks that don't need setup can ignore it.
    fn begin(&mut self, _column_a: &str, _column_b: &str) -> Result<(), CompareError> {
        Ok(())
    }

    fn emit(&mut self, record: ComparisonRecord) -> Result<(), CompareError>;

    fn finish(&mut self) -> Result<(), CompareError> {
        Ok(())
    }
}

/// A sink that collects records into a Vec.
pub struct VecSink {
    records: Vec<ComparisonRecord>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn into_records(self) -> Vec<ComparisonRecord> {
        self.records
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSink for VecSink {
    fn emit(&mut self, record: ComparisonRecord) -> Result<(), CompareError> {
        self.records.push(record);
        Ok(())
    }
}

/// A sink that forwards records to a callback.
pub struct CallbackSink<F: FnMut(ComparisonRecord)> {
    f: F,
}

impl<F: FnMut(ComparisonRecord)> CallbackSink<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: FnMut(ComparisonRecord)> RecordSink for CallbackSink<F> {
    fn emit(&mut self, record: ComparisonRecord) -> Result<(), CompareError> {
        (self.f)(record);
        Ok(())
    }
}
