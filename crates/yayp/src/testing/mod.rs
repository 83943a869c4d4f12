//! Assertion adapters for `#[test]` code.
//!
//! Each `is_*` function takes the source text of both operands (for the
//! failure message) and the operands themselves, and returns
//! `Ok(())` or an `AssertionFailure` describing the difference. The
//! `assert_*` macros wrap them with `stringify!` labels and panic on failure.
//!
//! ```
//! use yayp::prelude::*;
//!
//! let computed = vec![1.0_f64, 2.0, 3.0 + 1.0e-14];
//! assert_cont_soft_eq!([1.0_f64, 2.0, 3.0], computed);
//! assert_soft_eq!(4.0_f64, 4.001_f64, 1.0e-2);
//! ```

use thiserror::Error;

use crate::float::{Common, CommonFloat, SoftFloat};
use crate::report::{format_general, write_unequal_values, Cell, DiffColumns, PRECISION};
use crate::soft_equal::{SoftEqual, SoftEqualFor};

/// Why an assertion adapter rejected its operands. Displays the full message.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of an assertion adapter.
pub type AssertionResult = Result<(), AssertionFailure>;

fn render<T: SoftFloat>(value: T) -> String {
    format_general(value.into(), PRECISION)
}

/// Soft equality of two scalars at the default relative tolerance of their
/// common type.
pub fn is_soft_equal<T1, T2>(
    expected_expr: &str,
    actual_expr: &str,
    expected: T1,
    actual: T2,
) -> AssertionResult
where
    T1: CommonFloat<T2>,
{
    let rel_tol = SoftEqualFor::<T1, T2>::default().rel_tol();
    is_soft_equal_tol(expected_expr, actual_expr, expected, actual, rel_tol)
}

/// Soft equality of two scalars at `rel_tol`.
///
/// The absolute tolerance is machine epsilon, so in practice only the
/// relative test decides.
pub fn is_soft_equal_tol<T1, T2>(
    expected_expr: &str,
    actual_expr: &str,
    expected: T1,
    actual: T2,
    rel_tol: Common<T1, T2>,
) -> AssertionResult
where
    T1: CommonFloat<T2>,
{
    let se = SoftEqual::new(rel_tol, <Common<T1, T2>>::EPSILON);
    let e: Common<T1, T2> = expected.into();
    let a: Common<T1, T2> = actual.into();
    if se.approx_eq(e, a) {
        return Ok(());
    }

    let rel_diff = if a != <Common<T1, T2>>::ZERO {
        render((e - a).abs() / a.abs())
    } else {
        "inf".to_string()
    };
    Err(AssertionFailure::new(format!(
        "Expected soft equality between these values:\n  {expected_expr}\n    which is {}\n  {actual_expr}\n    which is {}\n    (rel diff = {rel_diff})\n  with relative tolerance {}",
        render(e),
        render(a),
        render(se.rel_tol()),
    )))
}

fn unequal_size(kind: &str, expected_expr: &str, actual_expr: &str, n: usize, m: usize) -> AssertionFailure {
    AssertionFailure::new(format!(
        "Expected {kind} between two containers of unequal size\n  {expected_expr}\n    which is size {n}\n  {actual_expr}\n    which is size {m}"
    ))
}

/// Element-wise soft equality of two slices at the default relative tolerance
/// of their common type.
pub fn is_soft_container_equal<T1, T2>(
    expected_expr: &str,
    actual_expr: &str,
    expected: &[T1],
    actual: &[T2],
) -> AssertionResult
where
    T1: CommonFloat<T2> + DiffColumns<T2> + Copy,
    T2: Cell + Copy,
{
    let rel_tol = SoftEqualFor::<T1, T2>::default().rel_tol();
    is_soft_container_equal_tol(expected_expr, actual_expr, expected, actual, rel_tol)
}

/// Element-wise soft equality of two slices at `rel_tol`.
///
/// On mismatch the message carries the diff table of
/// [`write_unequal_values`].
pub fn is_soft_container_equal_tol<T1, T2>(
    expected_expr: &str,
    actual_expr: &str,
    expected: &[T1],
    actual: &[T2],
    rel_tol: Common<T1, T2>,
) -> AssertionResult
where
    T1: CommonFloat<T2> + DiffColumns<T2> + Copy,
    T2: Cell + Copy,
{
    if expected.len() != actual.len() {
        return Err(unequal_size(
            "soft equality",
            expected_expr,
            actual_expr,
            expected.len(),
            actual.len(),
        ));
    }

    let se = SoftEqualFor::<T1, T2>::with_rel_tol(rel_tol);
    let bad = se.mismatches(expected, actual);
    if bad.is_empty() {
        return Ok(());
    }

    let table = write_unequal_values(&bad, expected_expr, actual_expr, expected, actual);
    Err(AssertionFailure::new(format!(
        "Expected soft equality between two containers which differ in {} element(s)\n{table}\n  tested with relative tolerance {}",
        bad.len(),
        render(se.rel_tol()),
    )))
}

/// Exact (`PartialEq`) element-wise equality of two slices.
pub fn is_container_equal<T1, T2>(
    expected_expr: &str,
    actual_expr: &str,
    expected: &[T1],
    actual: &[T2],
) -> AssertionResult
where
    T1: PartialEq<T2> + DiffColumns<T2>,
    T2: Cell,
{
    if expected.len() != actual.len() {
        return Err(unequal_size(
            "equality",
            expected_expr,
            actual_expr,
            expected.len(),
            actual.len(),
        ));
    }

    let bad: Vec<usize> = expected
        .iter()
        .zip(actual)
        .enumerate()
        .filter_map(|(i, (e, a))| (e != a).then_some(i))
        .collect();
    if bad.is_empty() {
        return Ok(());
    }

    let table = write_unequal_values(&bad, expected_expr, actual_expr, expected, actual);
    Err(AssertionFailure::new(format!(
        "Expected equality between two containers which differ in {} elements\n{table}",
        bad.len()
    )))
}

/// Assert soft equality of two floating point values.
///
/// `assert_soft_eq!(expected, actual)` uses the default relative tolerance;
/// `assert_soft_eq!(expected, actual, rel_tol)` an explicit one.
#[macro_export]
macro_rules! assert_soft_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        if let ::std::result::Result::Err(failure) = $crate::testing::is_soft_equal(
            stringify!($expected),
            stringify!($actual),
            $expected,
            $actual,
        ) {
            panic!("{}", failure);
        }
    };
    ($expected:expr, $actual:expr, $rel_tol:expr $(,)?) => {
        if let ::std::result::Result::Err(failure) = $crate::testing::is_soft_equal_tol(
            stringify!($expected),
            stringify!($actual),
            $expected,
            $actual,
            $rel_tol,
        ) {
            panic!("{}", failure);
        }
    };
}

/// Assert element-wise soft equality of two sequences (anything indexable by
/// `[..]`: arrays, `Vec`s, slices).
#[macro_export]
macro_rules! assert_cont_soft_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        if let ::std::result::Result::Err(failure) = $crate::testing::is_soft_container_equal(
            stringify!($expected),
            stringify!($actual),
            &$expected[..],
            &$actual[..],
        ) {
            panic!("{}", failure);
        }
    };
    ($expected:expr, $actual:expr, $rel_tol:expr $(,)?) => {
        if let ::std::result::Result::Err(failure) = $crate::testing::is_soft_container_equal_tol(
            stringify!($expected),
            stringify!($actual),
            &$expected[..],
            &$actual[..],
            $rel_tol,
        ) {
            panic!("{}", failure);
        }
    };
}

/// Assert exact element-wise equality of two sequences.
#[macro_export]
macro_rules! assert_cont_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        if let ::std::result::Result::Err(failure) = $crate::testing::is_container_equal(
            stringify!($expected),
            stringify!($actual),
            &$expected[..],
            &$actual[..],
        ) {
            panic!("{}", failure);
        }
    };
}
