/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 15;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Upper bound on rows accepted by a single bulk create request
pub const MAX_BATCH_ROWS: usize = 1000;

// =============================================================================
// SESSION
// =============================================================================

/// Name of the session cookie carrying the signed token
pub const SESSION_COOKIE: &str = "token";

// =============================================================================
// PERIODS
// =============================================================================

pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 9999;

// =============================================================================
// NUMERIC SCALES
// =============================================================================

/// Decimal places of money columns (`NUMERIC(_, 2)`)
pub const MONEY_SCALE: u32 = 2;

/// Decimal places of meter readout and unit cost columns (`NUMERIC(_, 3)`)
pub const METER_SCALE: u32 = 3;
