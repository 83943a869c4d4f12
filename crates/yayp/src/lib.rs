//! Test support: soft floating point equality, diff tables, and contracts.
//!
//! Layout
//! - `dbc`: design-by-contract macros and the `DbcError` they raise.
//! - `float`: floating point traits and per-type default tolerances.
//! - `soft_equal`: the `SoftEqual` predicate, scalar and slice helpers.
//! - `report`: relative differences, column widths, and the mismatch table.
//! - `testing`: assertion adapters and `assert_*` macros for `#[test]` code.
//! - `strings`, `files`: small text and path helpers.
//!
//! Everything here is synchronous and allocation-light; comparators are plain
//! values and can be shared across threads.

pub mod dbc;
pub mod files;
pub mod float;
pub mod report;
pub mod soft_equal;
pub mod strings;
pub mod testing;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use dbc::{DbcError, ErrorKind, SourceLocation};
pub use float::{CommonFloat, SoftFloat};
pub use soft_equal::{
    soft_container_equal, soft_container_equal_rel, soft_container_equal_tol, soft_equal,
    soft_equal_rel, soft_equal_tol, SoftEqual, SoftEqualFor,
};

/// Common exports for test modules.
pub mod prelude {
    pub use crate::soft_equal::{
        soft_container_equal, soft_container_equal_rel, soft_equal, soft_equal_rel, SoftEqual,
    };
    pub use crate::testing::{
        is_container_equal, is_soft_container_equal, is_soft_container_equal_tol, is_soft_equal,
        is_soft_equal_tol, AssertionFailure, AssertionResult,
    };
    pub use crate::{assert_cont_eq, assert_cont_soft_eq, assert_soft_eq};
}
