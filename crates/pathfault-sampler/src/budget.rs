//! Error-budget calculation
//!
//! Converts a target corruption fraction into a per-category integer
//! count, respecting a per-category minimum.

use crate::error::SamplerError;

/// Every category gets at least this many errors unless overridden
pub const DEFAULT_MIN_PER_CATEGORY: usize = 1;

/// Compute how many errors of *each* category should be injected
///
/// The target total is `round(fraction * pathway_len)`, floored at
/// `num_categories * min_per_category` (so a small fraction never rounds a
/// category down to zero), then divided evenly across categories with
/// floor division.
///
/// This function does not check the result against `pathway_len`; the plan
/// builder owns that check and raises `OverBudget` when unique step
/// assignment is impossible.
///
/// # Errors
///
/// `InvalidParameter` when `fraction` is outside `(0, 1]` or either count
/// is zero. Caller error; not retried.
pub fn errors_per_category(
    fraction: f64,
    pathway_len: usize,
    num_categories: usize,
    min_per_category: usize,
) -> Result<usize, SamplerError> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(SamplerError::InvalidParameter(format!(
            "fraction must be in the interval (0, 1], got {fraction}"
        )));
    }
    if pathway_len == 0 {
        return Err(SamplerError::InvalidParameter(
            "pathway_len must be a positive integer".to_string(),
        ));
    }
    if num_categories == 0 {
        return Err(SamplerError::InvalidParameter(
            "num_categories must be a positive integer".to_string(),
        ));
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let requested_total = (fraction * pathway_len as f64).round() as usize;
    let minimum_total = num_categories * min_per_category;
    let total = requested_total.max(minimum_total);

    Ok((total / num_categories).max(min_per_category))
}
