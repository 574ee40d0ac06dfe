//! Line sanitizer.
//!
//! Produces a copy of a source line that is safe for brace counting and
//! pattern matching: quoted literal contents are emptied (delimiters kept)
//! and everything from the first unquoted `//` onwards is dropped.
//!
//! ```text
//! Serial.printf("{%d}", x); // note }   ->   Serial.printf("", x);
//! char open = '{';                      ->   char open = '';
//! ```
//!
//! Literals are handled before comments, so `"http://host"` stays intact.
//! A literal with no closing quote on the same line is left as written and
//! scanning resumes right after its opening quote. `/* ... */` comments are
//! not recognised; braces inside them count.

/// Sanitizes a single line. Never fails.
#[must_use]
pub fn sanitize_line(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut out = String::with_capacity(line.len());
    // Start of the pending run of ordinary text.
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => match closing_quote(bytes, i, quote) {
                Some(end) => {
                    out.push_str(&line[copied..=i]);
                    out.push(char::from(quote));
                    i = end + 1;
                    copied = i;
                }
                None => i += 1,
            },
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&line[copied..i]);
                return out;
            }
            _ => i += 1,
        }
    }

    out.push_str(&line[copied..]);
    out
}

/// Finds the index of the quote closing the literal opened at `open`.
///
/// Backslash escapes the following byte. Only ASCII bytes are compared, so
/// multi-byte UTF-8 sequences can never be mistaken for a delimiter.
fn closing_quote(bytes: &[u8], open: usize, quote: u8) -> Option<usize> {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Returns `(opening, closing)` brace counts of an already sanitized line.
#[must_use]
pub fn count_braces(sanitized: &str) -> (usize, usize) {
    sanitized.bytes().fold((0, 0), |(open, close), b| match b {
        b'{' => (open + 1, close),
        b'}' => (open, close + 1),
        _ => (open, close),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_code_is_unchanged() {
        assert_eq!(sanitize_line("  int x = 5; {"), "  int x = 5; {");
    }

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(sanitize_line("int x; // } closes nothing"), "int x; ");
    }

    #[test]
    fn whole_line_comment_becomes_indent() {
        assert_eq!(sanitize_line("  // } comment with brace"), "  ");
    }

    #[test]
    fn empties_string_literal() {
        assert_eq!(
            sanitize_line(r#"Serial.printf("{%d}", x);"#),
            r#"Serial.printf("", x);"#
        );
    }

    #[test]
    fn empties_char_literal() {
        assert_eq!(sanitize_line("char c = '{';"), "char c = '';");
    }

    #[test]
    fn comment_marker_inside_string_is_kept() {
        assert_eq!(
            sanitize_line(r#"const char* url = "http://host/{x}"; // }"#),
            r#"const char* url = ""; "#
        );
    }

    #[test]
    fn escaped_quote_stays_inside_literal() {
        assert_eq!(
            sanitize_line(r#"s = "say \"}\" now"; {"#),
            r#"s = ""; {"#
        );
    }

    #[test]
    fn double_quote_inside_char_literal() {
        assert_eq!(
            sanitize_line(r#"char q = '"'; int y; {"#),
            "char q = ''; int y; {"
        );
    }

    #[test]
    fn escaped_backslash_char_literal() {
        assert_eq!(sanitize_line(r"char b = '\\'; }"), "char b = ''; }");
    }

    #[test]
    fn unterminated_literal_is_tolerated() {
        assert_eq!(sanitize_line(r#"x = "abc {"#), r#"x = "abc {"#);
        assert_eq!(sanitize_line(r#"x = "abc { // y"#), r#"x = "abc { "#);
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(
            sanitize_line(r#"label = "größe"; // ümlaut"#),
            r#"label = ""; "#
        );
        assert_eq!(sanitize_line("int ß = 1; {"), "int ß = 1; {");
    }

    #[test]
    fn block_comments_are_not_stripped() {
        assert_eq!(sanitize_line("int x; /* } */"), "int x; /* } */");
        assert_eq!(count_braces(&sanitize_line("int x; /* } */")), (0, 1));
    }

    #[test]
    fn counts_braces() {
        assert_eq!(count_braces("class A { void f() {} };"), (2, 2));
        assert_eq!(count_braces("}"), (0, 1));
        assert_eq!(count_braces(""), (0, 0));
    }

    #[test]
    fn braces_in_comments_and_literals_do_not_count() {
        assert_eq!(count_braces(&sanitize_line("// } comment with brace")), (0, 0));
        assert_eq!(count_braces(&sanitize_line(r#"log("}}}"); {"#)), (1, 0));
    }
}
