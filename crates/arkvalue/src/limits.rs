//! Centralized rendering limits and configuration constants.
//!
//! All magic numbers that control how numbers are printed are collected here
//! for easy tuning, together with [`RenderOptions`] which carries them at
//! runtime.

// ===== Numbers =====

/// Upper bound on the significant digits used when printing a number.
/// Matches `f64::DIGITS` (the C `DBL_DIG`, i.e. `digits10`).
pub const MAX_SIGNIFICANT_DIGITS: usize = f64::DIGITS as usize;

/// A fractional residue below this is treated as "no more digits".
pub const FRACTION_EPSILON: f64 = 1e-7;

/// Integral numbers whose magnitude is below this are printed through `itoa`.
pub const ITOA_FAST_PATH_LIMIT: f64 = 1e15;

// ===== Labels =====

/// Prefix used when printing a bytecode page address.
pub const PAGE_ADDR_LABEL: &str = "Function @ ";

/// Placeholder printed for native procedures (no identity is leaked).
pub const NATIVE_PROC_LABEL: &str = "CProcedure";

/// Prefix used when printing a closure.
pub const CLOSURE_LABEL: &str = "Closure @ ";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Cap on the significant digits of a printed number
    pub max_significant_digits: usize,
    /// Residue under which the fractional digit count stops growing
    pub fraction_epsilon: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_significant_digits: MAX_SIGNIFICANT_DIGITS,
            fraction_epsilon: FRACTION_EPSILON,
        }
    }
}
