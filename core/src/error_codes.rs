//! Stable error codes surfaced in error messages and exposed to tooling.
//!
//! Codes are part of the public contract: they never change meaning and are
//! safe to match on in calling systems.

pub const CMP_ALREADY_RUN: &str = "TXDIFF_CMP_001";
pub const CMP_COLUMN_NOT_FOUND: &str = "TXDIFF_CMP_002";
pub const CMP_SINK_ERROR: &str = "TXDIFF_CMP_003";
pub const CMP_INVALID_CONFIG: &str = "TXDIFF_CMP_004";

pub const TABLE_DUPLICATE_COLUMN: &str = "TXDIFF_TABLE_001";
pub const TABLE_COLUMN_COUNT_MISMATCH: &str = "TXDIFF_TABLE_002";
pub const TABLE_DUPLICATE_KEY: &str = "TXDIFF_TABLE_003";

pub const HTML_UNKNOWN_ROW_KEY: &str = "TXDIFF_HTML_001";
pub const HTML_RESERVED_COLUMN: &str = "TXDIFF_HTML_002";
