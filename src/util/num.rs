/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `f64` to `usize` if the value is finite, non-negative,
/// within range, and not fractional.
///
/// ## Errors
/// Returns `Err(error)` for non-finite, negative, fractional or too large
/// values.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `error`: The error to return if the conversion is not exact.
///
/// ## Example
/// ```
/// use formulang::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(20.0, "bad window"), Ok(20));
/// assert!(f64_to_usize_checked(2.5, "bad window").is_err());
/// assert!(f64_to_usize_checked(-1.0, "bad window").is_err());
/// assert!(f64_to_usize_checked(f64::NAN, "bad window").is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[allow(clippy::cast_sign_loss)]
pub fn f64_to_usize_checked<E>(value: f64, error: E) -> Result<usize, E> {
    if !value.is_finite() || value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(error);
    }
    if value.fract() != 0.0 {
        return Err(error);
    }
    usize::try_from(value as u64).map_err(|_| error)
}

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use formulang::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(5, "too big"), Ok(5.0));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked<E>(value: usize, error: E) -> Result<f64, E> {
    match u64::try_from(value) {
        Ok(v) if v <= MAX_SAFE_U64_INT => Ok(v as f64),
        _ => Err(error),
    }
}
