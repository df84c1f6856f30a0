/// Progress reporting for long-running comparisons.
///
/// The engine may call the callback at throttled intervals with a best-effort
/// percentage in the range `[0.0, 1.0]`. Callers should treat progress as
/// advisory: under parallel execution rows complete out of order, so the
/// reported percentage tracks completed rows, not row positions.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, phase: &str, percent: f32);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _phase: &str, _percent: f32) {}
}
