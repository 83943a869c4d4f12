//! Floating point traits and default tolerances.
//!
//! Policy
//! - Defaults are fixed constants per type; double precision is held to a
//!   much tighter standard than single precision.
//! - Mixed-precision comparisons widen both operands to the common type
//!   (`CommonFloat::Output`), resolved at compile time.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// A floating point type that `SoftEqual` can operate on.
pub trait SoftFloat:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Into<f64>
    + Send
    + Sync
    + 'static
{
    /// Default tolerance of the absolute difference.
    const DEFAULT_ABS_TOL: Self;
    /// Default tolerance of the relative difference.
    const DEFAULT_REL_TOL: Self;
    /// Machine epsilon.
    const EPSILON: Self;
    const INFINITY: Self;
    const ZERO: Self;
    const ONE: Self;

    fn abs(self) -> Self;
    fn is_infinite(self) -> bool;
    fn is_sign_negative(self) -> bool;
}

macro_rules! impl_soft_float {
    ($t:ident, abs = $abs:expr, rel = $rel:expr) => {
        impl SoftFloat for $t {
            const DEFAULT_ABS_TOL: Self = $abs;
            const DEFAULT_REL_TOL: Self = $rel;
            const EPSILON: Self = $t::EPSILON;
            const INFINITY: Self = $t::INFINITY;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn abs(self) -> Self {
                $t::abs(self)
            }
            #[inline]
            fn is_infinite(self) -> bool {
                $t::is_infinite(self)
            }
            #[inline]
            fn is_sign_negative(self) -> bool {
                $t::is_sign_negative(self)
            }
        }
    };
}

impl_soft_float!(f64, abs = 1.0e-14, rel = 1.0e-12);
impl_soft_float!(f32, abs = 1.0e-8, rel = 1.0e-6);

/// Common floating point type of `Self` and `Rhs`.
///
/// Both operands convert losslessly into `Output`.
pub trait CommonFloat<Rhs = Self>: Sized {
    type Output: SoftFloat + From<Self> + From<Rhs>;
}

impl CommonFloat<f32> for f32 {
    type Output = f32;
}
impl CommonFloat<f64> for f32 {
    type Output = f64;
}
impl CommonFloat<f32> for f64 {
    type Output = f64;
}
impl CommonFloat<f64> for f64 {
    type Output = f64;
}

/// Shorthand for the common type of `T1` and `T2`.
pub type Common<T1, T2> = <T1 as CommonFloat<T2>>::Output;
