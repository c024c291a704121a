//! String token matching.
//!
//! Grid file formats treat short strings as blank-terminated tokens: a value
//! is read up to the first embedded whitespace, and anything after it is
//! padding. "MAP", "MAP " and "MAP     " are the same token.

/// Returns the given string up to the first whitespace character.
///
/// Leading whitespace is not skipped, so a blank-initial string yields "".
pub fn until_space(s: &str) -> &str {
    match s.find(char::is_whitespace) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Whether two tokens match, ignoring padding and ASCII case.
pub fn match_token(a: &str, b: &str) -> bool {
    until_space(a).eq_ignore_ascii_case(until_space(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn until_space_stops_at_first_blank() {
        assert_eq!(until_space("hello world"), "hello");
        assert_eq!(until_space(" hello"), "");
        assert_eq!(until_space("METRES  "), "METRES");
        assert_eq!(until_space(""), "");
    }

    #[test]
    fn match_token_ignores_padding_and_case() {
        assert!(match_token("MAP", "MAP     "));
        assert!(match_token("metres", "METRES  "));
        assert!(!match_token("MAP", "MAPAXES"));
        assert!(!match_token("FEET", "METRES"));
    }
}
