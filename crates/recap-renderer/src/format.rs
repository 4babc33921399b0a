//! Inline emphasis and bullet list formatting.
//!
//! Both functions expect text that has already been escaped: they only add
//! markup, they never escape.

use std::sync::LazyLock;

use regex::Regex;

/// `**X**` where X is non-empty and free of `*`. X may span lines.
static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("invalid bold regex"));

/// `*X*` with the same restrictions, applied after bold.
static ITALIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("invalid italic regex"));

const BULLET_MARKER: &str = "- ";

/// Convert `**bold**` and `*italic*` spans.
///
/// Bold runs first so the inner `*` of a bold span is never read as an italic
/// delimiter. Markers without a closing partner stay literal.
///
/// # Examples
///
/// ```
/// use recap_renderer::format_inline;
///
/// assert_eq!(format_inline("**Action Items**"), "<strong>Action Items</strong>");
/// assert_eq!(format_inline("a *note*"), "a <em>note</em>");
/// assert_eq!(format_inline("2 * 3"), "2 * 3");
/// ```
pub fn format_inline(text: &str) -> String {
    if !text.contains('*') {
        return text.to_owned();
    }
    let bold = BOLD_PATTERN.replace_all(text, "<strong>${1}</strong>");
    ITALIC_PATTERN
        .replace_all(&bold, "<em>${1}</em>")
        .into_owned()
}

/// Group consecutive `- ` lines into `<ul>` lists.
///
/// Each run of lines starting with `- ` becomes one `<ul>`, one `<li>` per
/// line with the marker removed and the rest trimmed. A blank or ordinary line
/// ends the run. The list replaces its lines together with the newline that
/// ends the last of them, since the list element already breaks the line.
///
/// # Examples
///
/// ```
/// use recap_renderer::format_bullets;
///
/// assert_eq!(
///     format_bullets("Tasks\n- one\n- two\n\nDone"),
///     "Tasks\n<ul><li>one</li><li>two</li></ul>\nDone"
/// );
/// ```
pub fn format_bullets(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 32);
    let mut items: Vec<&str> = Vec::new();
    let mut lines = text.split('\n').peekable();

    while let Some(line) = lines.next() {
        if let Some(item) = line.strip_prefix(BULLET_MARKER) {
            items.push(item.trim());
            continue;
        }

        flush_list(&mut items, &mut output);
        output.push_str(line);
        if lines.peek().is_some() {
            output.push('\n');
        }
    }
    flush_list(&mut items, &mut output);

    output
}

/// Emit collected items as a `<ul>` and clear them.
fn flush_list(items: &mut Vec<&str>, output: &mut String) {
    if items.is_empty() {
        return;
    }
    output.push_str("<ul>");
    for item in items.drain(..) {
        output.push_str("<li>");
        output.push_str(item);
        output.push_str("</li>");
    }
    output.push_str("</ul>");
}
