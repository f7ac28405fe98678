/// Numeric conversion helpers.
///
/// Checked conversions between `f64` and `usize`, used wherever a formula
/// number becomes a window length or a count becomes a divisor.
///
/// All functions return a `Result`, which is `Ok` if the conversion is lossless
/// and valid, or the caller's error otherwise.
pub mod num;
