//! HTML entity escaping.

/// Escape the five HTML-reserved characters.
///
/// Produces the same output as substituting `&` first and then `<`, `>`, `"`
/// and `'` in turn, but in a single pass. Escaping is not idempotent:
/// `&amp;` becomes `&amp;amp;`, so each layer of text must go through here
/// exactly once.
///
/// # Examples
///
/// ```
/// use recap_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// assert_eq!(escape_html("it's"), "it&#039;s");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_reserved() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_html("Plain text, nothing to do."), "Plain text, nothing to do.");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape_html("&");
        assert_eq!(once, "&amp;");
        assert_eq!(escape_html(&once), "&amp;amp;");
    }

    #[test]
    fn test_escape_unicode_passthrough() {
        assert_eq!(escape_html("Grüße → 日本"), "Grüße → 日本");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_html(""), "");
    }
}
