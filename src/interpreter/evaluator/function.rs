/// Registry of prelude functions.
///
/// Declares the function table and installs it into an environment.
pub mod core;
/// Elementwise math: `ABS`, `MAX`, `MIN`.
pub mod math;
/// Rolling-window functions.
///
/// `REF`, `SUM`, `MA`, `HHV`, `LLV` and `COUNT` look back a fixed number of
/// bars from each position of a series.
pub mod window;
/// Conditional selection and crossover detection: `IF`, `CROSS`.
pub mod condition;
