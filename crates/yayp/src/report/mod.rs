//! Tabular diagnostics for mismatching slices.
//!
//! Given the ascending indices where two equal-length slices differ,
//! `write_unequal_values` renders a right-aligned table:
//!
//! ```text
//!  Index vd  ld          Rel. Diff.
//!      0  0 0.1                   1
//!      3  3 3.2 0.06250000000000006
//! ```
//!
//! Floating point element pairs get a relative-difference column; every other
//! element type is printed with its `Display` form only. Which columns appear
//! is decided statically by [`DiffColumns`].
//!
//! Large mismatches (`MAX_REPORTED` indices or more) produce an empty table.

mod format;

pub use format::format_general;

use crate::float::{Common, CommonFloat, SoftFloat};

/// Significant digits used for every rendered value.
pub const PRECISION: usize = 16;

/// Mismatch count at which the table is suppressed.
pub const MAX_REPORTED: usize = 30;

const INDEX_HEADER: &str = "Index";
const REL_DIFF_HEADER: &str = "Rel. Diff.";

/// A value that can be rendered into a table cell.
pub trait Cell {
    fn cell(&self, precision: usize) -> String;
}

impl Cell for f64 {
    fn cell(&self, precision: usize) -> String {
        format_general(*self, precision)
    }
}

impl Cell for f32 {
    fn cell(&self, precision: usize) -> String {
        format_general(f64::from(*self), precision)
    }
}

macro_rules! impl_display_cell {
    ($($t:ty),* $(,)?) => {
        $(
            impl Cell for $t {
                fn cell(&self, _precision: usize) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_display_cell!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String, str
);

impl<T: Cell + ?Sized> Cell for &T {
    fn cell(&self, precision: usize) -> String {
        (**self).cell(precision)
    }
}

/// Column policy for a pair of element types (`Self` expected, `Rhs` actual).
pub trait DiffColumns<Rhs: Cell = Self>: Cell + Sized {
    /// Rendered relative differences at `indices`, or `None` when the pair has
    /// no relative-difference column.
    fn rel_diff_cells(
        indices: &[usize],
        expected: &[Self],
        actual: &[Rhs],
        precision: usize,
    ) -> Option<Vec<String>>;
}

macro_rules! impl_float_columns {
    ($($a:ty => $b:ty),* $(,)?) => {
        $(
            impl DiffColumns<$b> for $a {
                fn rel_diff_cells(
                    indices: &[usize],
                    expected: &[$a],
                    actual: &[$b],
                    precision: usize,
                ) -> Option<Vec<String>> {
                    let diffs = calc_rel_diffs(indices, expected, actual);
                    Some(diffs.iter().map(|d| d.cell(precision)).collect())
                }
            }
        )*
    };
}

impl_float_columns!(f32 => f32, f32 => f64, f64 => f32, f64 => f64);

macro_rules! impl_exact_columns {
    ($($t:ty),* $(,)?) => {
        $(
            impl DiffColumns<$t> for $t {
                fn rel_diff_cells(
                    _indices: &[usize],
                    _expected: &[$t],
                    _actual: &[$t],
                    _precision: usize,
                ) -> Option<Vec<String>> {
                    None
                }
            }
        )*
    };
}

impl_exact_columns!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String
);

impl<'a, 'b> DiffColumns<&'b str> for &'a str {
    fn rel_diff_cells(_: &[usize], _: &[&'a str], _: &[&'b str], _: usize) -> Option<Vec<String>> {
        None
    }
}

impl<'b> DiffColumns<&'b str> for String {
    fn rel_diff_cells(_: &[usize], _: &[String], _: &[&'b str], _: usize) -> Option<Vec<String>> {
        None
    }
}

impl<'a> DiffColumns<String> for &'a str {
    fn rel_diff_cells(_: &[usize], _: &[&'a str], _: &[String], _: usize) -> Option<Vec<String>> {
        None
    }
}

/// Strictly increasing: sorted with no repeated index.
fn is_ascending(indices: &[usize]) -> bool {
    indices.windows(2).all(|w| w[0] < w[1])
}

/// Relative differences `|e - a| / |a|` at `indices` (`+inf` where `a == 0`),
/// in the common floating point type.
///
/// Pre: `indices` strictly ascending. Indices past the end of either slice are skipped.
pub fn calc_rel_diffs<T1, T2>(indices: &[usize], expected: &[T1], actual: &[T2]) -> Vec<Common<T1, T2>>
where
    T1: CommonFloat<T2> + Copy,
    T2: Copy,
{
    crate::require!(is_ascending(indices));
    let len = expected.len().min(actual.len());
    indices
        .iter()
        .take_while(|&&i| i < len)
        .map(|&i| {
            let e: Common<T1, T2> = expected[i].into();
            let a: Common<T1, T2> = actual[i].into();
            if a != <Common<T1, T2>>::ZERO {
                (e - a).abs() / a.abs()
            } else {
                <Common<T1, T2>>::INFINITY
            }
        })
        .collect()
}

/// Width of a column: the longest rendering among `header` and the values at
/// `indices`, plus one separating space.
pub fn find_max_field_width<T: Cell>(
    header: &str,
    indices: &[usize],
    values: &[T],
    precision: usize,
) -> usize {
    indices
        .iter()
        .filter_map(|&i| values.get(i))
        .map(|v| v.cell(precision).chars().count())
        .fold(header.chars().count(), usize::max)
        + 1
}

/// Table of the values at `bad_indices`, labelled with the two source
/// expressions. Empty when there are `MAX_REPORTED` or more bad indices.
///
/// Pre: `bad_indices` strictly ascending. The caller has already checked that the
/// slices have equal length; rows past the shorter slice are dropped.
pub fn write_unequal_values<T1, T2>(
    bad_indices: &[usize],
    expected_label: &str,
    actual_label: &str,
    expected: &[T1],
    actual: &[T2],
) -> String
where
    T1: DiffColumns<T2>,
    T2: Cell,
{
    if bad_indices.len() >= MAX_REPORTED {
        tracing::debug!(
            mismatches = bad_indices.len(),
            limit = MAX_REPORTED,
            "diff table suppressed"
        );
        return String::new();
    }
    crate::require!(is_ascending(bad_indices));

    let len = expected.len().min(actual.len());
    let rows: Vec<usize> = bad_indices.iter().copied().take_while(|&i| i < len).collect();
    let positions: Vec<usize> = (0..rows.len()).collect();

    let index_width = find_max_field_width(INDEX_HEADER, &positions, &rows, PRECISION);
    let expected_width = find_max_field_width(expected_label, &rows, expected, PRECISION);
    let actual_width = find_max_field_width(actual_label, &rows, actual, PRECISION);

    let rel_diffs = T1::rel_diff_cells(&rows, expected, actual, PRECISION);
    let rel_width = rel_diffs.as_ref().map(|cells| {
        crate::check!(cells.len() == rows.len());
        find_max_field_width(REL_DIFF_HEADER, &positions, cells, PRECISION)
    });

    let mut out = format!(
        "{:>iw$}{:>ew$}{:>aw$}",
        INDEX_HEADER,
        expected_label,
        actual_label,
        iw = index_width,
        ew = expected_width,
        aw = actual_width,
    );
    if let Some(rw) = rel_width {
        out.push_str(&format!("{REL_DIFF_HEADER:>rw$}"));
    }

    for (k, &i) in rows.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!(
            "{:>iw$}{:>ew$}{:>aw$}",
            i,
            expected[i].cell(PRECISION),
            actual[i].cell(PRECISION),
            iw = index_width,
            ew = expected_width,
            aw = actual_width,
        ));
        if let (Some(cells), Some(rw)) = (&rel_diffs, rel_width) {
            out.push_str(&format!("{:>rw$}", cells[k]));
        }
    }
    out
}
