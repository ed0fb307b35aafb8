//! Page geometry: margins and the writable regions ("columns") derived from them.

mod margins;
pub use margins::*;

mod regions;
pub use regions::*;

/// Tolerance, in user units, for region boundary checks. Absorbs floating-point
/// drift from cursor arithmetic.
pub const EPS: f64 = 0.0001;
