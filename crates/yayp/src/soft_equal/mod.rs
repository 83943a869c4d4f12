//! Soft (approximate) equality of floating point values.
//!
//! Two values are approximately equal if
//! - their difference is below `rel_tol` relative to the expected value; or
//! - one of them is within `abs_tol` of zero and the other within `rel_tol` of
//!   zero; or
//! - both are infinite with the same sign.
//!
//! NaN is never approximately equal to anything. Operands of different
//! precision are compared in their common type (see `float::CommonFloat`).

use crate::dbc::{ContractKind, DbcError, SourceLocation};
use crate::float::{Common, CommonFloat, SoftFloat};

/// Approximate-equality predicate with fixed relative and absolute tolerances.
///
/// `T` is the type both operands are widened to before comparing. Use
/// [`SoftEqualFor`] to name the comparator for a pair of operand types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoftEqual<T: SoftFloat> {
    abs_tol: T,
    rel_tol: T,
}

/// Comparator for operands of type `T1` and `T2`.
pub type SoftEqualFor<T1, T2> = SoftEqual<Common<T1, T2>>;

impl<T: SoftFloat> Default for SoftEqual<T> {
    fn default() -> Self {
        Self::new(T::DEFAULT_REL_TOL, T::DEFAULT_ABS_TOL)
    }
}

impl<T: SoftFloat> SoftEqual<T> {
    /// Explicit tolerances.
    ///
    /// Pre: `abs_tol > 0` and `0 < rel_tol < 1` (checked with `require!`).
    pub fn new(rel_tol: T, abs_tol: T) -> Self {
        crate::require!(abs_tol > T::ZERO);
        crate::require!(rel_tol > T::ZERO && rel_tol < T::ONE);
        Self { abs_tol, rel_tol }
    }

    /// Relative tolerance only; the absolute tolerance keeps the type's
    /// default abs/rel ratio.
    pub fn with_rel_tol(rel_tol: T) -> Self {
        Self::new(rel_tol, T::DEFAULT_ABS_TOL / T::DEFAULT_REL_TOL * rel_tol)
    }

    /// Same checks as [`SoftEqual::new`], returned as a value and performed
    /// regardless of the DBC level.
    #[track_caller]
    pub fn try_new(rel_tol: T, abs_tol: T) -> Result<Self, DbcError> {
        if !(abs_tol > T::ZERO) {
            return Err(DbcError::contract(
                ContractKind::Precondition,
                "abs_tol > 0",
                SourceLocation::caller(),
            ));
        }
        if !(rel_tol > T::ZERO && rel_tol < T::ONE) {
            return Err(DbcError::contract(
                ContractKind::Precondition,
                "rel_tol > 0 && rel_tol < 1",
                SourceLocation::caller(),
            ));
        }
        Ok(Self { abs_tol, rel_tol })
    }

    /// Tolerance of the absolute difference.
    #[inline]
    pub fn abs_tol(&self) -> T {
        self.abs_tol
    }

    /// Tolerance of the relative difference.
    #[inline]
    pub fn rel_tol(&self) -> T {
        self.rel_tol
    }

    /// Whether `expected` and `actual` are approximately equal.
    pub fn approx_eq<A: Into<T>, B: Into<T>>(&self, expected: A, actual: B) -> bool {
        let expected: T = expected.into();
        let actual: T = actual.into();
        let eps_rel = self.rel_tol;
        let abs_e = expected.abs();

        if (actual - expected).abs() < eps_rel * abs_e {
            return true;
        }

        // Near zero: one side within abs_tol, the other within rel_tol.
        let eps_abs = self.abs_tol;
        let abs_a = actual.abs();
        if abs_e < eps_abs && abs_a < eps_rel {
            return true;
        }
        if abs_a < eps_abs && abs_e < eps_rel {
            return true;
        }

        expected.is_infinite()
            && actual.is_infinite()
            && expected.is_sign_negative() == actual.is_sign_negative()
    }

    /// Element-wise comparison; false on length mismatch.
    pub fn approx_eq_slices<A, B>(&self, expected: &[A], actual: &[B]) -> bool
    where
        A: Copy + Into<T>,
        B: Copy + Into<T>,
    {
        expected.len() == actual.len()
            && expected
                .iter()
                .zip(actual)
                .all(|(&e, &a)| self.approx_eq(e, a))
    }

    /// Indices where the two slices differ, ascending.
    ///
    /// Pre: equal lengths.
    pub fn mismatches<A, B>(&self, expected: &[A], actual: &[B]) -> Vec<usize>
    where
        A: Copy + Into<T>,
        B: Copy + Into<T>,
    {
        crate::require!(expected.len() == actual.len());
        expected
            .iter()
            .zip(actual)
            .enumerate()
            .filter_map(|(i, (&e, &a))| (!self.approx_eq(e, a)).then_some(i))
            .collect()
    }
}

/// Soft equality with the default tolerances of the common type.
pub fn soft_equal<T1, T2>(expected: T1, actual: T2) -> bool
where
    T1: CommonFloat<T2>,
{
    SoftEqualFor::<T1, T2>::default().approx_eq(expected, actual)
}

/// Soft equality with a relative tolerance (absolute tolerance scaled).
pub fn soft_equal_rel<T1, T2>(expected: T1, actual: T2, rel_tol: Common<T1, T2>) -> bool
where
    T1: CommonFloat<T2>,
{
    SoftEqual::with_rel_tol(rel_tol).approx_eq(expected, actual)
}

/// Soft equality with explicit relative and absolute tolerances.
pub fn soft_equal_tol<T1, T2>(
    expected: T1,
    actual: T2,
    rel_tol: Common<T1, T2>,
    abs_tol: Common<T1, T2>,
) -> bool
where
    T1: CommonFloat<T2>,
{
    SoftEqual::new(rel_tol, abs_tol).approx_eq(expected, actual)
}

/// Two slices are soft-equal when they have the same length and every pair
/// of elements is soft-equal (default tolerances).
pub fn soft_container_equal<T1, T2>(expected: &[T1], actual: &[T2]) -> bool
where
    T1: CommonFloat<T2> + Copy,
    T2: Copy,
{
    SoftEqualFor::<T1, T2>::default().approx_eq_slices(expected, actual)
}

/// [`soft_container_equal`] with a relative tolerance.
pub fn soft_container_equal_rel<T1, T2>(
    expected: &[T1],
    actual: &[T2],
    rel_tol: Common<T1, T2>,
) -> bool
where
    T1: CommonFloat<T2> + Copy,
    T2: Copy,
{
    SoftEqual::with_rel_tol(rel_tol).approx_eq_slices(expected, actual)
}

/// [`soft_container_equal`] with explicit tolerances.
pub fn soft_container_equal_tol<T1, T2>(
    expected: &[T1],
    actual: &[T2],
    rel_tol: Common<T1, T2>,
    abs_tol: Common<T1, T2>,
) -> bool
where
    T1: CommonFloat<T2> + Copy,
    T2: Copy,
{
    SoftEqual::new(rel_tol, abs_tol).approx_eq_slices(expected, actual)
}
