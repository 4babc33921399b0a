//! Rendering pipeline.

use std::borrow::Cow;
use std::sync::LazyLock;

use crate::escape::escape_html;
use crate::fence::CodeBlocks;
use crate::format::{format_bullets, format_inline};
use crate::greeting::GreetingVocabulary;

/// Renderer with default settings, shared by [`render`].
static DEFAULT_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::new);

/// Line break markup emitted for every newline.
const LINE_BREAK: &str = "<br/>";

/// Result of a render with some facts about what happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenderOutput {
    /// Rendered HTML fragment.
    pub html: String,
    /// Number of fenced code blocks found.
    pub code_blocks: usize,
    /// Whether a leading greeting line was removed.
    pub greeting_stripped: bool,
}

/// Markdown-subset renderer.
///
/// Immutable once built, so one instance can serve any number of threads.
///
/// # Example
///
/// ```
/// use recap_renderer::{GreetingVocabulary, Renderer};
///
/// let mut vocabulary = GreetingVocabulary::builtin();
/// vocabulary.insert("es", ["hola"]);
///
/// let renderer = Renderer::new().with_vocabulary(vocabulary).with_locale("es");
/// assert_eq!(renderer.render("¡Hola!\n*Resumen*"), "¡Hola!<br/><em>Resumen</em>");
/// assert_eq!(renderer.render("Hola!\n*Resumen*"), "<em>Resumen</em>");
///
/// let verbatim = Renderer::new().without_greeting_stripping();
/// assert_eq!(verbatim.render("Hi\nNotes"), "Hi<br/>Notes");
/// ```
#[derive(Clone, Debug)]
pub struct Renderer {
    vocabulary: GreetingVocabulary,
    locale: Option<String>,
    strip_greeting: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer that strips English greetings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vocabulary: GreetingVocabulary::builtin(),
            locale: None,
            strip_greeting: true,
        }
    }

    /// Use a custom greeting vocabulary.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: GreetingVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Select the greeting locale. Unknown locales use the vocabulary default.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Enable or disable greeting stripping.
    #[must_use]
    pub fn with_greeting_stripping(mut self, enabled: bool) -> Self {
        self.strip_greeting = enabled;
        self
    }

    /// Keep leading greetings in the output.
    #[must_use]
    pub fn without_greeting_stripping(self) -> Self {
        self.with_greeting_stripping(false)
    }

    /// Whether leading greetings are removed.
    #[must_use]
    pub fn strips_greeting(&self) -> bool {
        self.strip_greeting
    }

    /// The greeting vocabulary in use.
    #[must_use]
    pub fn vocabulary(&self) -> &GreetingVocabulary {
        &self.vocabulary
    }

    /// The effective greeting locale.
    #[must_use]
    pub fn locale(&self) -> &str {
        self.locale
            .as_deref()
            .unwrap_or_else(|| self.vocabulary.default_locale())
    }

    /// Remove a leading greeting line if stripping is enabled.
    #[must_use]
    pub fn strip_greeting<'a>(&self, text: &'a str) -> &'a str {
        if self.strip_greeting {
            self.vocabulary.strip(text, self.locale())
        } else {
            text
        }
    }

    /// Render text to an HTML fragment.
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        self.render_with_stats(text).html
    }

    /// Render text and report what the pipeline did.
    #[must_use]
    pub fn render_with_stats(&self, text: &str) -> RenderOutput {
        let normalized = normalize_line_endings(text);
        let body = self.strip_greeting(&normalized);
        let greeting_stripped = body.len() != normalized.len();

        let (extracted, blocks) = CodeBlocks::extract(body);
        let escaped = escape_html(&extracted);
        let formatted = format_bullets(&format_inline(&escaped));
        let restored = blocks.restore(&formatted);
        let html = restored.replace('\n', LINE_BREAK);

        tracing::trace!(
            input_len = text.len(),
            output_len = html.len(),
            code_blocks = blocks.len(),
            greeting_stripped,
            "Rendered message"
        );

        RenderOutput {
            html,
            code_blocks: blocks.len(),
            greeting_stripped,
        }
    }
}

/// Render text with the default renderer.
///
/// Strips an English greeting line, then converts fences, emphasis and
/// bullet lists. Never fails.
///
/// # Examples
///
/// ```
/// use recap_renderer::render;
///
/// assert_eq!(
///     render("```<script>alert(1)</script>```"),
///     "<pre><code>&lt;script&gt;alert(1)&lt;/script&gt;</code></pre>"
/// );
/// ```
pub fn render(text: &str) -> String {
    DEFAULT_RENDERER.render(text)
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(super::Renderer: Send, Sync);

    /// Check that every `<` and `>` in `html` belongs to renderer markup.
    fn only_renderer_markup(html: &str) -> bool {
        const TAGS: &[&str] = &[
            "<br/>",
            "<strong>",
            "</strong>",
            "<em>",
            "</em>",
            "<ul>",
            "</ul>",
            "<li>",
            "</li>",
            "<pre><code>",
            "</code></pre>",
        ];
        let mut rest = html.to_owned();
        for tag in TAGS {
            rest = rest.replace(tag, "");
        }
        !rest.contains('<') && !rest.contains('>')
    }

    #[test]
    fn test_plain_prose_identity() {
        let text = "The team met on Monday\nBudget approved\n\nNext review in May";
        assert_eq!(render(text), text.replace('\n', "<br/>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_script_in_fence_escaped() {
        let html = render("```<script>alert(1)</script>```");
        assert_eq!(
            html,
            "<pre><code>&lt;script&gt;alert(1)&lt;/script&gt;</code></pre>"
        );
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_script_outside_fence_escaped() {
        let html = render("<script>alert('x')</script> & \"more\"");
        assert_eq!(
            html,
            "&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt; &amp; &quot;more&quot;"
        );
    }

    #[test]
    fn test_bold_and_italic() {
        assert!(render("**Action Items**").contains("<strong>Action Items</strong>"));
        assert!(render("*note*").contains("<em>note</em>"));
    }

    #[test]
    fn test_star_inside_bold_is_deterministic() {
        let first = render("**a*b**");
        assert_eq!(first, "*<em>a</em>b**");
        assert_eq!(render("**a*b**"), first);
    }

    #[test]
    fn test_emphasis_across_line_break() {
        assert_eq!(render("**a\nb**"), "<strong>a<br/>b</strong>");
        assert_eq!(render("*a\nb*"), "<em>a<br/>b</em>");
    }

    #[test]
    fn test_list_then_text() {
        let html = render("- one\n- two\n\nthree");
        assert_eq!(html, "<ul><li>one</li><li>two</li></ul><br/>three");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn test_fence_content_not_formatted() {
        let html = render("```\n**keep** *as* is\n- not a list\n```");
        assert_eq!(
            html,
            "<pre><code><br/>**keep** *as* is<br/>- not a list<br/></code></pre>"
        );
    }

    #[test]
    fn test_fence_content_escaped_exactly_once() {
        let html = render("Use ```a &amp; b``` here");
        assert_eq!(html, "Use <pre><code>a &amp;amp; b</code></pre> here");
    }

    #[test]
    fn test_unmatched_fence_literal() {
        assert_eq!(render("```unterminated <b>"), "```unterminated &lt;b&gt;");
    }

    #[test]
    fn test_greeting_stripped() {
        let output = Renderer::new().render_with_stats("Hi!\nHere is your summary.");
        assert_eq!(output.html, "Here is your summary.");
        assert!(output.greeting_stripped);
        assert_eq!(output.code_blocks, 0);
    }

    #[test]
    fn test_greeting_only_kept() {
        let output = Renderer::new().render_with_stats("Hello");
        assert_eq!(output.html, "Hello");
        assert!(!output.greeting_stripped);
    }

    #[test]
    fn test_greeting_stripping_disabled() {
        let renderer = Renderer::new().without_greeting_stripping();
        assert_eq!(renderer.render("Hey\nNotes"), "Hey<br/>Notes");
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(render("Notes\r\n- a\r\n- b"), "Notes<br/><ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_code_block_count() {
        let output = Renderer::new().render_with_stats("```a``` and ```b``` and ```c");
        assert_eq!(output.code_blocks, 2);
        assert!(output.html.ends_with("and ```c"));
    }

    #[test]
    fn test_fence_inside_list_item() {
        assert_eq!(
            render("- run ```make```\n- done"),
            "<ul><li>run <pre><code>make</code></pre></li><li>done</li></ul>"
        );
    }

    #[test]
    fn test_forged_placeholder_stays_text() {
        let html = render("```x``` @@recap-code-0000000000000000-0@@");
        assert!(html.ends_with(" @@recap-code-0000000000000000-0@@"));
        assert_eq!(html.matches("<pre>").count(), 1);
    }

    #[test]
    fn test_full_summary() {
        let text = "Hello!\n\n**Meeting Summary**\n\nWe agreed on the *Q3* plan.\n\n\
                    **Action Items**\n- Ana: send <draft>\n- Bo: book room\n\n\
                    ```\nmake release\n```";
        let html = render(text);
        assert_eq!(
            html,
            "<strong>Meeting Summary</strong><br/><br/>We agreed on the <em>Q3</em> plan.<br/><br/>\
             <strong>Action Items</strong><br/><ul><li>Ana: send &lt;draft&gt;</li><li>Bo: book room</li></ul>\
             <br/><pre><code><br/>make release<br/></code></pre>"
        );
    }

    #[test]
    fn test_only_renderer_markup_in_hostile_input() {
        let inputs = [
            "<img src=x onerror=alert(1)>",
            "**<b>**",
            "*<i>*",
            "- <li>x</li>\n- </ul>",
            "```</code></pre><script>```",
            "``` unclosed <tag>",
            "\"'&<>",
            "**a*b**<x>",
        ];
        for input in inputs {
            let html = render(input);
            assert!(only_renderer_markup(&html), "input: {input:?}, html: {html:?}");
        }
    }

    #[test]
    fn test_locale_accessor() {
        let renderer = Renderer::new();
        assert_eq!(renderer.locale(), "en");
        assert!(renderer.strips_greeting());
        assert_eq!(renderer.with_locale("de").locale(), "de");
        assert!(!Renderer::new().without_greeting_stripping().strips_greeting());
    }
}
