//! Small string helpers used by test code and the CLI.
//!
//! Policy
//! - Every function returns owned `String`s; inputs are borrowed.
//! - Whitespace means `char::is_whitespace`. Case mapping is Unicode aware.
//! - Limits (`max_splits`, `max_replace`) are `Option<usize>`; `None` means
//!   unlimited.

/// Lowercase copy of `s`.
pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

/// Uppercase copy of `s`.
pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

/// `s` without leading whitespace.
pub fn lstrip(s: &str) -> String {
    s.trim_start().to_string()
}

/// `s` without trailing whitespace.
pub fn rstrip(s: &str) -> String {
    s.trim_end().to_string()
}

/// `s` without leading and trailing whitespace.
pub fn strip(s: &str) -> String {
    s.trim().to_string()
}

/// `s` without leading characters from `char_set`.
pub fn lstrip_chars(s: &str, char_set: &str) -> String {
    s.trim_start_matches(|c| char_set.contains(c)).to_string()
}

/// `s` without trailing characters from `char_set`.
pub fn rstrip_chars(s: &str, char_set: &str) -> String {
    s.trim_end_matches(|c| char_set.contains(c)).to_string()
}

/// `s` without leading and trailing characters from `char_set`.
pub fn strip_chars(s: &str, char_set: &str) -> String {
    s.trim_matches(|c| char_set.contains(c)).to_string()
}

/// Split on runs of whitespace, dropping empty pieces.
///
/// After `max_splits` splits the rest of the string, trimmed, becomes the last
/// piece: `split_whitespace("a b  c d ", Some(2)) == ["a", "b", "c d"]`.
pub fn split_whitespace(s: &str, max_splits: Option<usize>) -> Vec<String> {
    let max_splits = max_splits.unwrap_or(usize::MAX);
    let mut pieces = Vec::new();
    let mut rest = s;
    let mut splits = 0;
    while !rest.is_empty() && splits < max_splits {
        let token = rest.trim_start();
        let end = token.find(char::is_whitespace).unwrap_or(token.len());
        if end > 0 {
            pieces.push(token[..end].to_string());
        }
        rest = &token[end..];
        splits += 1;
    }

    let tail = rest.trim();
    if !tail.is_empty() {
        pieces.push(tail.to_string());
    }
    pieces
}

/// Split on the literal separator `sep`, keeping empty pieces.
///
/// At most `max_splits` splits are made; the remainder is the last piece.
/// An empty input yields a single empty piece.
///
/// Pre: `sep` is not empty.
pub fn split(s: &str, sep: &str, max_splits: Option<usize>) -> Vec<String> {
    crate::require!(!sep.is_empty());
    match max_splits {
        Some(n) => s.splitn(n.saturating_add(1), sep).map(str::to_string).collect(),
        None => s.split(sep).map(str::to_string).collect(),
    }
}

/// Concatenate `items` with `separator` between consecutive items.
pub fn join<S: AsRef<str>>(items: &[S], separator: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Replace non-overlapping occurrences of `find`, left to right, at most
/// `max_replace` times.
///
/// Pre: `find` is not empty.
pub fn find_and_replace(s: &str, find: &str, replace: &str, max_replace: Option<usize>) -> String {
    crate::require!(!find.is_empty());
    match max_replace {
        Some(n) => s.replacen(find, replace, n),
        None => s.replace(find, replace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_mapping() {
        assert_eq!(to_lower("ALL UPPERCASE"), "all uppercase");
        assert_eq!(to_lower("Mixed CasE"), "mixed case");
        assert_eq!(to_lower("all lowercase"), "all lowercase");
        assert_eq!(to_lower(""), "");

        assert_eq!(to_upper("ALL UPPERCASE"), "ALL UPPERCASE");
        assert_eq!(to_upper("Mixed CasE"), "MIXED CASE");
        assert_eq!(to_upper("all lowercase"), "ALL LOWERCASE");
        assert_eq!(to_upper(""), "");
    }

    #[test]
    fn strip_whitespace() {
        assert_eq!(lstrip("    Test 1"), "Test 1");
        assert_eq!(lstrip("Test 2"), "Test 2");
        assert_eq!(lstrip("     "), "");
        assert_eq!(lstrip(""), "");

        assert_eq!(rstrip("Test 1     "), "Test 1");
        assert_eq!(rstrip("Test 2"), "Test 2");
        assert_eq!(rstrip("     "), "");
        assert_eq!(rstrip(""), "");

        assert_eq!(strip("    Test 1     "), "Test 1");
        assert_eq!(strip("\tTest 2\n"), "Test 2");
        assert_eq!(strip("     "), "");
        assert_eq!(strip(""), "");
    }

    #[test]
    fn strip_char_sets() {
        assert_eq!(lstrip_chars("aabbccTest 1", "abc"), "Test 1");
        assert_eq!(lstrip_chars("Test 2", "abc"), "Test 2");
        assert_eq!(lstrip_chars("aaccbbaa", "abc"), "");
        assert_eq!(lstrip_chars("", "abc"), "");

        assert_eq!(rstrip_chars("Test 1aabbcc", "abc"), "Test 1");
        assert_eq!(rstrip_chars("Test 2", "abc"), "Test 2");
        assert_eq!(rstrip_chars("aaccbbaa", "abc"), "");
        assert_eq!(rstrip_chars("", "abc"), "");

        assert_eq!(strip_chars("aaccbbTest 1bbccaa", "abc"), "Test 1");
        assert_eq!(strip_chars("Test 2", "abc"), "Test 2");
        assert_eq!(strip_chars("aabbccbb", "abc"), "");
        assert_eq!(strip_chars("", "abc"), "");
    }

    #[test]
    fn split_on_whitespace() {
        let text = "  This is the first test  ";
        assert_eq!(
            split_whitespace(text, None),
            ["This", "is", "the", "first", "test"]
        );
        assert_eq!(
            split_whitespace(text, Some(3)),
            ["This", "is", "the", "first test"]
        );
        assert_eq!(split_whitespace(text, Some(0)), ["This is the first test"]);
        assert_eq!(split_whitespace("  No_Split!  ", None), ["No_Split!"]);
        assert!(split_whitespace("", None).is_empty());
        assert!(split_whitespace(" \t\n ", Some(1)).is_empty());
    }

    #[test]
    fn split_on_separator() {
        assert_eq!(
            split("  This is the first test  ", "is", None),
            ["  Th", " ", " the first test  "]
        );
        assert_eq!(
            split("This*!is*!another*!split*!test", "*!", Some(3)),
            ["This", "is", "another", "split*!test"]
        );
        assert_eq!(split("  No_Split!  ", "hi", None), ["  No_Split!  "]);
        assert_eq!(split("a,,b,", ",", None), ["a", "", "b", ""]);
        assert_eq!(split("", ",", None), [""]);
        assert_eq!(split("a,b", ",", Some(0)), ["a,b"]);
    }

    #[test]
    fn split_rejects_empty_separator() {
        if !crate::dbc::REQUIRE_ON {
            return;
        }
        assert!(std::panic::catch_unwind(|| split("abc", "", None)).is_err());
    }

    #[test]
    fn join_items() {
        let words = ["This", "is", "a", "test"];
        assert_eq!(join(&words, ""), "Thisisatest");
        assert_eq!(join(&words, " "), "This is a test");
        assert_eq!(join(&words, ", "), "This, is, a, test");
        assert_eq!(join(&words[1..3], "**"), "is**a");

        let single = vec!["This".to_string()];
        assert_eq!(join(&single, ""), "This");
        assert_eq!(join(&single, " "), "This");
        assert_eq!(join(&[String::new()], ""), "");
        assert_eq!(join::<&str>(&[], "-"), "");
    }

    #[test]
    fn replace_substrings() {
        assert_eq!(
            find_and_replace("This is the first test string", "first", "second", None),
            "This is the second test string"
        );
        let text = "This**is**another**test*";
        assert_eq!(find_and_replace(text, "**", " ", None), "This is another test*");
        assert_eq!(find_and_replace(text, "**", " ", Some(2)), "This is another**test*");
        assert_eq!(find_and_replace(text, "##", " ", None), text);
    }

    #[test]
    fn replace_rejects_empty_pattern() {
        if !crate::dbc::REQUIRE_ON {
            return;
        }
        let err = std::panic::catch_unwind(|| find_and_replace("abc", "", "x", None)).unwrap_err();
        let message = err.downcast_ref::<String>().cloned().unwrap_or_default();
        assert!(message.starts_with("Failed DBC precondition test: !find.is_empty()"));
    }
}
