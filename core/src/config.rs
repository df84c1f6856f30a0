//! Configuration for the comparison engine.
//!
//! `CompareConfig` centralizes the engine's thresholds and behavioral knobs
//! to avoid hardcoded constants scattered throughout the codebase.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highlight::HighlightStyles;

/// How the per-row comparisons are executed.
///
/// The choice is explicit configuration, never probed at runtime; results
/// are identical either way because per-row work shares no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    Sequential,
    /// Fan rows out across a rayon pool. Requires the `parallel` feature.
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Pairs scoring at or above this exact (unrounded) ratio get highlight
    /// markup; pairs below it pass through unmodified.
    pub min_ratio_for_highlight: f64,
    /// Combined character count above which a non-identical pair is failed
    /// instead of aligned, bounding the quadratic matcher.
    pub max_align_chars: u32,
    pub execution: ExecutionStrategy,
    pub styles: HighlightStyles,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            min_ratio_for_highlight: 0.0,
            max_align_chars: 10_000,
            execution: ExecutionStrategy::Sequential,
            styles: HighlightStyles::default(),
        }
    }
}

impl CompareConfig {
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder {
            inner: CompareConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_ratio_for_highlight.is_finite()
            || self.min_ratio_for_highlight < 0.0
            || self.min_ratio_for_highlight > 1.0
        {
            return Err(ConfigError::InvalidHighlightThreshold {
                value: self.min_ratio_for_highlight,
            });
        }

        ensure_non_zero_u32(self.max_align_chars, "max_align_chars")?;

        if self.execution == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(ConfigError::ParallelUnavailable);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_ratio_for_highlight must be in [0.0, 1.0] and finite (got {value})")]
    InvalidHighlightThreshold { value: f64 },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveLimit { field: &'static str, value: u64 },
    #[error("execution strategy 'parallel' requires building with the `parallel` feature")]
    ParallelUnavailable,
}

fn ensure_non_zero_u32(value: u32, field: &'static str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositiveLimit {
            field,
            value: value as u64,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CompareConfigBuilder {
    inner: CompareConfig,
}

impl Default for CompareConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareConfigBuilder {
    pub fn new() -> Self {
        CompareConfig::builder()
    }

    pub fn min_ratio_for_highlight(mut self, value: f64) -> Self {
        self.inner.min_ratio_for_highlight = value;
        self
    }

    pub fn max_align_chars(mut self, value: u32) -> Self {
        self.inner.max_align_chars = value;
        self
    }

    pub fn execution(mut self, value: ExecutionStrategy) -> Self {
        self.inner.execution = value;
        self
    }

    pub fn styles(mut self, value: HighlightStyles) -> Self {
        self.inner.styles = value;
        self
    }

    pub fn build(self) -> Result<CompareConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
