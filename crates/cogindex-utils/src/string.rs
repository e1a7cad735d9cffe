use std::{cmp::Ordering, iter::Peekable, str::Chars};

/// Compares two strings in case-insensitive natural order.
///
/// Runs of ASCII digits are compared by their numeric value instead of digit by
/// digit, so `"pkg2"` sorts before `"pkg10"`. Everything else is compared one
/// character at a time after lower-casing. When two numeric runs have the same
/// value, the one with fewer leading zeros sorts first.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use cogindex_utils::string::natural_cmp_ignore_case;
///
/// assert_eq!(natural_cmp_ignore_case("Pkg2", "pkg10"), Ordering::Less);
/// assert_eq!(natural_cmp_ignore_case("ABC", "abc"), Ordering::Equal);
/// ```
pub fn natural_cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                let ord = compare_digit_runs(&l_run, &r_run);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');

    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        .then_with(|| a.len().cmp(&b.len()))
}

/// Returns `true` if `needle` occurs in `haystack`, ignoring case.
///
/// An empty needle always matches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order_numeric_runs() {
        assert_eq!(natural_cmp_ignore_case("pkg2", "pkg10"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("pkg10", "pkg2"), Ordering::Greater);
        assert_eq!(natural_cmp_ignore_case("pkg10", "pkg10"), Ordering::Equal);
    }

    #[test]
    fn test_natural_order_ignores_case() {
        assert_eq!(natural_cmp_ignore_case("Pkg1", "pkg1"), Ordering::Equal);
        assert_eq!(natural_cmp_ignore_case("alpha", "Beta"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("Zeta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_natural_order_sorts_mixed_names() {
        let mut names = vec!["Pkg2", "pkg10", "Pkg1"];
        names.sort_by(|a, b| natural_cmp_ignore_case(a, b));
        assert_eq!(names, vec!["Pkg1", "Pkg2", "pkg10"]);
    }

    #[test]
    fn test_natural_order_prefix() {
        assert_eq!(natural_cmp_ignore_case("cog", "cogs"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("", "a"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("", ""), Ordering::Equal);
    }

    #[test]
    fn test_natural_order_leading_zeros() {
        assert_eq!(natural_cmp_ignore_case("v007", "v7"), Ordering::Greater);
        assert_eq!(natural_cmp_ignore_case("v007", "v8"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("v0", "v00"), Ordering::Less);
    }

    #[test]
    fn test_natural_order_digits_against_letters() {
        assert_eq!(natural_cmp_ignore_case("1cog", "acog"), Ordering::Less);
        assert_eq!(natural_cmp_ignore_case("cog9", "coga"), Ordering::Less);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Audio Player", "audio"));
        assert!(contains_ignore_case("audio", "AUDIO"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("audio", "video"));
    }
}
