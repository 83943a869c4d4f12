//! Design-by-contract checks.
//!
//! Purpose
//! - `require!` (preconditions), `ensure!` (postconditions) and `check!`
//!   (intermediate results) assert a condition and, when it fails, raise a
//!   `DbcError` naming the condition, its category and the call site.
//! - `not_implemented!` and `not_reachable!` mark code paths that must not run.
//!
//! Raising means: log through `tracing`, then panic with the error text. A
//! contract failure is a programmer error and ends the current test. Callers
//! that need the failure as a value use `assert_condition` or the `try_*`
//! constructors elsewhere in the crate.
//!
//! Which categories are active is fixed at compile time, see `level`.

mod level;

use std::fmt;
use std::panic::Location;

use thiserror::Error;

pub use level::{CHECK_ON, DBC_LEVEL, ENSURE_ON, REQUIRE_ON};

/// Discriminator over every failure `DbcError` can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Exception,
    Precondition,
    Postcondition,
    Intermediate,
    NotImplemented,
    NotReachable,
}

/// Category of a contract assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Precondition,
    Postcondition,
    Intermediate,
}

impl ContractKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractKind::Precondition => "precondition",
            ContractKind::Postcondition => "postcondition",
            ContractKind::Intermediate => "intermediate",
        }
    }

    /// Whether checks of this category are compiled in.
    #[inline]
    pub const fn enabled(self) -> bool {
        match self {
            ContractKind::Precondition => REQUIRE_ON,
            ContractKind::Postcondition => ENSURE_ON,
            ContractKind::Intermediate => CHECK_ON,
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContractKind> for ErrorKind {
    fn from(kind: ContractKind) -> Self {
        match kind {
            ContractKind::Precondition => ErrorKind::Precondition,
            ContractKind::Postcondition => ErrorKind::Postcondition,
            ContractKind::Intermediate => ErrorKind::Intermediate,
        }
    }
}

/// File and line of a failed check.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Location of the (tracked) caller.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self::new(loc.file(), loc.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Error raised by failed contracts and unreachable/unimplemented markers.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DbcError {
    /// Generic library error without a location.
    #[error("{message}")]
    Exception { message: String },

    /// Generic library error pinned to a source location.
    #[error("Caught YAYP exception: {message}\n ^^^ at {location}")]
    LocatedException {
        message: String,
        location: SourceLocation,
    },

    /// A `require!`, `ensure!` or `check!` condition evaluated to false.
    #[error("Failed DBC {kind} test: {condition}\n ^^^ at {location}")]
    Contract {
        kind: ContractKind,
        condition: String,
        location: SourceLocation,
    },

    #[error("Unfortunately, {what} is not currently implemented.{}", location_suffix(.location))]
    NotImplemented {
        what: String,
        location: SourceLocation,
    },

    #[error("Encountered 'unreachable' code point at {location}")]
    NotReachable { location: SourceLocation },
}

fn location_suffix(location: &SourceLocation) -> String {
    if REQUIRE_ON {
        format!("\n ^^^ at {location}")
    } else {
        String::new()
    }
}

impl DbcError {
    pub fn exception(message: impl Into<String>) -> Self {
        DbcError::Exception {
            message: message.into(),
        }
    }

    pub fn exception_at(message: impl Into<String>, location: SourceLocation) -> Self {
        DbcError::LocatedException {
            message: message.into(),
            location,
        }
    }

    pub fn contract(
        kind: ContractKind,
        condition: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        DbcError::Contract {
            kind,
            condition: condition.into(),
            location,
        }
    }

    pub fn not_implemented(what: impl Into<String>, location: SourceLocation) -> Self {
        DbcError::NotImplemented {
            what: what.into(),
            location,
        }
    }

    pub fn not_reachable(location: SourceLocation) -> Self {
        DbcError::NotReachable { location }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DbcError::Exception { .. } | DbcError::LocatedException { .. } => ErrorKind::Exception,
            DbcError::Contract { kind, .. } => (*kind).into(),
            DbcError::NotImplemented { .. } => ErrorKind::NotImplemented,
            DbcError::NotReachable { .. } => ErrorKind::NotReachable,
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            DbcError::Exception { .. } => None,
            DbcError::LocatedException { location, .. }
            | DbcError::Contract { location, .. }
            | DbcError::NotImplemented { location, .. }
            | DbcError::NotReachable { location } => Some(location),
        }
    }
}

/// Value-returning contract check.
///
/// `Ok(())` when `holds` is true or the category is compiled out; otherwise the
/// `DbcError` that `require!`/`ensure!`/`check!` would raise.
pub fn assert_condition(
    holds: bool,
    condition: &str,
    kind: ContractKind,
    location: SourceLocation,
) -> Result<(), DbcError> {
    if kind.enabled() && !holds {
        return Err(DbcError::contract(kind, condition, location));
    }
    Ok(())
}

/// Log `err` and abort the current test with its message.
///
/// Single exit point for every DBC failure; a convenient breakpoint.
#[cold]
#[inline(never)]
pub fn raise(err: DbcError) -> ! {
    match err.location() {
        Some(loc) => tracing::error!(kind = ?err.kind(), location = %loc, "{err}"),
        None => tracing::error!(kind = ?err.kind(), "{err}"),
    }
    panic!("{err}")
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dbc_assert {
    ($kind:expr, $cond:expr) => {
        if $kind.enabled() && !($cond) {
            $crate::dbc::raise($crate::dbc::DbcError::contract(
                $kind,
                stringify!($cond),
                $crate::dbc::SourceLocation::new(file!(), line!()),
            ));
        }
    };
}

/// Precondition check; compiled out when `DBC_LEVEL == 0`.
#[macro_export]
macro_rules! require {
    ($cond:expr $(,)?) => {
        $crate::__dbc_assert!($crate::dbc::ContractKind::Precondition, $cond)
    };
}

/// Postcondition check; compiled out when `DBC_LEVEL <= 1`.
#[macro_export]
macro_rules! ensure {
    ($cond:expr $(,)?) => {
        $crate::__dbc_assert!($crate::dbc::ContractKind::Postcondition, $cond)
    };
}

/// Intermediate check; compiled out when `DBC_LEVEL <= 2`.
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        $crate::__dbc_assert!($crate::dbc::ContractKind::Intermediate, $cond)
    };
}

/// Placeholder for a code path that has not been written yet.
#[macro_export]
macro_rules! not_implemented {
    ($what:expr $(,)?) => {
        $crate::dbc::raise($crate::dbc::DbcError::not_implemented(
            $what,
            $crate::dbc::SourceLocation::new(file!(), line!()),
        ))
    };
}

/// Marks a logically unreachable code point.
#[macro_export]
macro_rules! not_reachable {
    () => {{
        if $crate::dbc::REQUIRE_ON {
            $crate::dbc::raise($crate::dbc::DbcError::not_reachable(
                $crate::dbc::SourceLocation::new(file!(), line!()),
            ))
        } else {
            unreachable!()
        }
    }};
}
