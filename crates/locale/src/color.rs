//! Color-marker translation
//!
//! Locale files write colors with a configurable marker, `&a` by default.
//! Minecraft clients expect the section sign (`§`) instead.

/// The control character Minecraft uses to introduce a format code.
pub const COLOR_CHAR: char = '\u{00A7}';

/// Marker used by locale files unless configured otherwise.
pub const DEFAULT_COLOR_MARKER: &str = "&";

/// Hex colors, the extended format codes (`k`-`o`), reset and the hex-color prefix.
const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Whether `code` is a valid color or format code.
pub fn is_color_code(code: char) -> bool {
    COLOR_CODES.contains(code)
}

/// Replace `marker` + code with [`COLOR_CHAR`] + the lowercased code.
///
/// A marker followed by anything else is copied literally and scanning
/// resumes after the character that followed it.
pub fn translate_colors(marker: &str, text: &str) -> String {
    if marker.is_empty() {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(index) = rest.find(marker) {
        out.push_str(&rest[..index]);
        let after = &rest[index + marker.len()..];

        match after.chars().next() {
            Some(code) if is_color_code(code) => {
                out.push(COLOR_CHAR);
                out.push(code.to_ascii_lowercase());
                rest = &after[code.len_utf8()..];
            }
            Some(other) => {
                out.push_str(marker);
                out.push(other);
                rest = &after[other.len_utf8()..];
            }
            None => {
                out.push_str(marker);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Remove every [`COLOR_CHAR`] sequence, leaving plain text.
pub fn strip_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == COLOR_CHAR && chars.peek().copied().is_some_and(is_color_code) {
            chars.next();
            continue;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_valid_code() {
        assert_eq!(translate_colors("&", "&ahello"), "\u{00A7}ahello");
        assert_eq!(translate_colors("&", "&Lbold&r"), "\u{00A7}lbold\u{00A7}r");
    }

    #[test]
    fn test_translate_invalid_code_left_literal() {
        assert_eq!(translate_colors("&", "&zhello"), "&zhello");
        assert_eq!(translate_colors("&", "a && b"), "a && b");
        assert_eq!(translate_colors("&", "trailing&"), "trailing&");
    }

    #[test]
    fn test_invalid_pair_is_skipped_as_a_unit() {
        // The second '&' is consumed with the first, so "a" is not a code here.
        assert_eq!(translate_colors("&", "&&a"), "&&a");
        assert_eq!(translate_colors("&", "&&&a"), "&&\u{00A7}a");
    }

    #[test]
    fn test_custom_marker() {
        assert_eq!(translate_colors("%%", "%%cRed %%x"), "\u{00A7}cRed \u{00A7}x");
        assert_eq!(translate_colors("", "&ahello"), "&ahello");
        assert_eq!(translate_colors("$", "&a$é"), "&a$é");
    }

    #[test]
    fn test_identity_without_markers() {
        let text = "no colors at all";
        assert_eq!(translate_colors("&", text), text);
    }

    #[test]
    fn test_strip_colors() {
        let colored = translate_colors("&", "&aGreen &lbold&r plain");
        assert_eq!(strip_colors(&colored), "Green bold plain");
        assert_eq!(strip_colors("\u{00A7}"), "\u{00A7}");
    }
}
