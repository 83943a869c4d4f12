//! DBC verbosity (compile time).
//!
//! Policy
//! - The level is read once, when the crate is compiled, from the `YAYP_DBC`
//!   environment variable. Unset or unparsable values mean "everything on".
//! - 0: all contract checks off.
//! - 1: preconditions (`require!`).
//! - 2: + postconditions (`ensure!`).
//! - 3: + intermediate checks (`check!`).
//!
//! The flags are `const`, so a disabled check folds away at compile time while
//! its condition is still type-checked.

const DEFAULT_LEVEL: u8 = 3;

/// Active DBC verbosity level.
pub const DBC_LEVEL: u8 = parse_level(option_env!("YAYP_DBC"));

/// Preconditions are checked.
pub const REQUIRE_ON: bool = DBC_LEVEL > 0;
/// Postconditions are checked.
pub const ENSURE_ON: bool = DBC_LEVEL > 1;
/// Intermediate checks are performed.
pub const CHECK_ON: bool = DBC_LEVEL > 2;

const fn parse_level(raw: Option<&str>) -> u8 {
    match raw {
        Some(s) => {
            let b = s.as_bytes();
            if b.len() == 1 && b[0].is_ascii_digit() {
                b[0] - b'0'
            } else {
                DEFAULT_LEVEL
            }
        }
        None => DEFAULT_LEVEL,
    }
}
