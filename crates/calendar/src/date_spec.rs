//! Parsing of the `<month>--<day>` date-specifier token.

/// Recognizes a date-specifier token of the form `"3--15"` (month 3,
/// day 15) and returns the `(month, day)` pair.
///
/// Returns `None` when the string is not a date specifier: no `--`
/// delimiter, non-integer parts, or parts outside `u8` range. A `None`
/// here is an expected outcome, not an error — the loader uses it to
/// distinguish timeline rows from configuration rows. Calendar validity
/// (month 1..=12, day within the month) is deliberately *not* checked
/// here; it surfaces later through day-of-year conversion, where row
/// context is available.
pub fn parse_date_spec(s: &str) -> Option<(u8, u8)> {
    let (month, day) = s.split_once("--")?;
    let month = month.trim().parse::<u8>().ok()?;
    let day = day.trim().parse::<u8>().ok()?;
    Some((month, day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_token() {
        assert_eq!(parse_date_spec("3--15"), Some((3, 15)));
        assert_eq!(parse_date_spec("12--31"), Some((12, 31)));
        assert_eq!(parse_date_spec("1--1"), Some((1, 1)));
    }

    #[test]
    fn roundtrips_all_months() {
        for m in 1..=12u8 {
            for d in [1u8, 15, 28] {
                assert_eq!(parse_date_spec(&format!("{m}--{d}")), Some((m, d)));
            }
        }
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_date_spec("3 -- 15"), Some((3, 15)));
    }

    #[test]
    fn rejects_missing_delimiter() {
        assert_eq!(parse_date_spec("hello"), None);
        assert_eq!(parse_date_spec("3-15"), None);
        assert_eq!(parse_date_spec(""), None);
    }

    #[test]
    fn rejects_non_integer_parts() {
        assert_eq!(parse_date_spec("3--x"), None);
        assert_eq!(parse_date_spec("x--15"), None);
        assert_eq!(parse_date_spec("--15"), None);
        assert_eq!(parse_date_spec("3--"), None);
    }

    #[test]
    fn rejects_extra_delimiters() {
        assert_eq!(parse_date_spec("3--15--2"), None);
    }

    #[test]
    fn does_not_validate_calendar() {
        // Out-of-calendar pairs still parse; validity is the caller's concern.
        assert_eq!(parse_date_spec("13--40"), Some((13, 40)));
    }
}
