//! Operator selection-string parsing.

use std::collections::BTreeSet;

/// Parse a free-form selection string into a set of valid 1-based indices.
///
/// Tokens are separated by whitespace and commas. A token is either a bare
/// positive integer or an inclusive range `A-B`. Malformed tokens are
/// silently dropped, and the result is clamped to `[1, max]`.
///
/// `"1 3 5-7"` with max 10 parses to `{1, 3, 5, 6, 7}`; `"0,11"` with
/// max 10 parses to nothing.
#[must_use]
pub fn parse_selection(input: &str, max: usize) -> BTreeSet<usize> {
    let mut indices = BTreeSet::new();

    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        if let Some((start, end)) = token.split_once('-') {
            // Exactly one separator with digit halves, or the token is noise.
            if !is_integer(start) || !is_integer(end) {
                continue;
            }
            let (Ok(start), Ok(end)) = (start.parse::<usize>(), end.parse::<usize>()) else {
                continue;
            };
            // An inverted range contributes nothing, like an empty range().
            for i in start.max(1)..=end.min(max) {
                indices.insert(i);
            }
        } else if is_integer(token) {
            if let Ok(n) = token.parse::<usize>() {
                if (1..=max).contains(&n) {
                    indices.insert(n);
                }
            }
        }
    }

    indices
}

fn is_integer(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_indices_and_range() {
        assert_eq!(parse_selection("1 3 5-7", 10), set(&[1, 3, 5, 6, 7]));
    }

    #[test]
    fn test_out_of_bounds_dropped() {
        assert_eq!(parse_selection("0,11", 10), set(&[]));
    }

    #[test]
    fn test_non_numeric_dropped() {
        assert_eq!(parse_selection("abc", 5), set(&[]));
    }

    #[test]
    fn test_single_element_range() {
        assert_eq!(parse_selection("2-2", 5), set(&[2]));
    }

    #[test]
    fn test_comma_and_space_separators() {
        assert_eq!(parse_selection("1, 2,3  4", 10), set(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(parse_selection("2 2 1-3 3", 10), set(&[1, 2, 3]));
    }

    #[test]
    fn test_malformed_ranges_dropped() {
        assert_eq!(parse_selection("1-2-3", 10), set(&[]));
        assert_eq!(parse_selection("a-3", 10), set(&[]));
        assert_eq!(parse_selection("3-", 10), set(&[]));
        assert_eq!(parse_selection("-3", 10), set(&[]));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        assert_eq!(parse_selection("7-5", 10), set(&[]));
    }

    #[test]
    fn test_range_clamped_to_max() {
        assert_eq!(parse_selection("8-20", 10), set(&[8, 9, 10]));
    }

    #[test]
    fn test_mixed_good_and_bad_tokens() {
        assert_eq!(parse_selection("1 oops 3-x 4", 10), set(&[1, 4]));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_selection("", 10), set(&[]));
        assert_eq!(parse_selection("   ,", 10), set(&[]));
    }

    #[test]
    fn test_signed_tokens_dropped() {
        assert_eq!(parse_selection("+3", 10), set(&[]));
    }
}
