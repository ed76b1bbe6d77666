//! Numeric and boolean string predicates

/// Whether the string consists only of ASCII digits.
///
/// Signs, decimal points and whitespace are rejected, as is the empty string.
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a boolean the way command users type them.
///
/// Accepts `true`/`yes`/`on`/`1` and `false`/`no`/`off`/`0`, ignoring case.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("42"));
        assert!(is_numeric("0007"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("-1"));
        assert!(!is_numeric("+1"));
        assert!(!is_numeric("1.5"));
        assert!(!is_numeric("12a"));
        assert!(!is_numeric(" 1"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }
}
