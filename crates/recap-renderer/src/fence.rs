//! Code fence extraction and restoration.
//!
//! Fenced regions must not be touched by emphasis or list formatting, and
//! their content must be escaped exactly once. Extraction moves each region
//! into a side table and leaves a placeholder in the text. Restoration swaps
//! the placeholders back for `<pre><code>` elements after the other stages ran.
//!
//! Placeholders embed a random per-call nonce, so text that happens to look
//! like a placeholder (or one copied from an earlier render) is never
//! mistaken for a real one.

use std::sync::LazyLock;

use rand::RngExt;
use regex::{Captures, Regex};

use crate::escape::escape_html;

/// Non-greedy triple-backtick span, may cross lines.
static FENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("invalid fence regex"));

/// Placeholder token: nonce and block index.
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@@recap-code-([0-9a-f]{16})-([0-9]+)@@").expect("invalid placeholder regex")
});

/// Code fence contents captured from one input, in order of appearance.
///
/// # Example
///
/// ```
/// use recap_renderer::CodeBlocks;
///
/// let (text, blocks) = CodeBlocks::extract("Run ```make <all>``` now");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks.get(0), Some("make <all>"));
/// assert!(!text.contains("make"));
///
/// assert_eq!(
///     blocks.restore(&text),
///     "Run <pre><code>make &lt;all&gt;</code></pre> now"
/// );
/// ```
#[derive(Debug)]
pub struct CodeBlocks {
    nonce: u64,
    blocks: Vec<String>,
}

impl CodeBlocks {
    /// Replace every fenced region of `text` with a placeholder.
    ///
    /// A trailing fence without a partner is left in the text as is.
    #[must_use]
    pub fn extract(text: &str) -> (String, Self) {
        Self::extract_with_nonce(text, rand::rng().random::<u64>())
    }

    pub(crate) fn extract_with_nonce(text: &str, nonce: u64) -> (String, Self) {
        let mut blocks = Self {
            nonce,
            blocks: Vec::new(),
        };

        if !text.contains("```") {
            return (text.to_owned(), blocks);
        }

        let replaced = FENCE_PATTERN
            .replace_all(text, |caps: &Captures| {
                blocks.blocks.push(caps[1].to_owned());
                blocks.placeholder(blocks.blocks.len() - 1)
            })
            .into_owned();

        (replaced, blocks)
    }

    /// Placeholder token standing in for block `index`.
    #[must_use]
    pub fn placeholder(&self, index: usize) -> String {
        format!("@@recap-code-{:016x}-{index}@@", self.nonce)
    }

    /// Number of captured blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if no blocks were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Raw content of block `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.blocks.get(index).map(String::as_str)
    }

    /// Iterate over raw block contents in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(String::as_str)
    }

    /// Replace this call's placeholders with escaped `<pre><code>` elements.
    ///
    /// Runs in a single pass, so restored content is never scanned again.
    /// Tokens with a foreign nonce or an unknown index stay as they are.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        if self.blocks.is_empty() {
            return text.to_owned();
        }

        PLACEHOLDER_PATTERN
            .replace_all(text, |caps: &Captures| {
                let ours = u64::from_str_radix(&caps[1], 16).is_ok_and(|n| n == self.nonce);
                let block = caps[2]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| self.get(index));
                match block {
                    Some(code) if ours => format!("<pre><code>{}</code></pre>", escape_html(code)),
                    _ => caps[0].to_owned(),
                }
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NONCE: u64 = 0x00c0_ffee_1234_abcd;

    #[test]
    fn test_extract_single_block() {
        let (text, blocks) = CodeBlocks::extract_with_nonce("a ```x``` b", NONCE);
        assert_eq!(text, "a @@recap-code-00c0ffee1234abcd-0@@ b");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.get(0), Some("x"));
    }

    #[test]
    fn test_extract_multiple_blocks_in_order() {
        let input = "```one```\nmiddle\n```two\nlines```";
        let (text, blocks) = CodeBlocks::extract_with_nonce(input, NONCE);
        assert_eq!(
            text,
            "@@recap-code-00c0ffee1234abcd-0@@\nmiddle\n@@recap-code-00c0ffee1234abcd-1@@"
        );
        assert_eq!(blocks.iter().collect::<Vec<_>>(), vec!["one", "two\nlines"]);
    }

    #[test]
    fn test_extract_is_non_greedy() {
        let (_, blocks) = CodeBlocks::extract_with_nonce("```a``` and ```b```", NONCE);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks.get(1), Some("b"));
    }

    #[test]
    fn test_unmatched_trailing_fence_is_literal() {
        let (text, blocks) = CodeBlocks::extract_with_nonce("```a``` then ```b", NONCE);
        assert_eq!(text, "@@recap-code-00c0ffee1234abcd-0@@ then ```b");
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_lone_fence_is_literal() {
        let (text, blocks) = CodeBlocks::extract_with_nonce("```rust\nfn main() {}", NONCE);
        assert_eq!(text, "```rust\nfn main() {}");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_empty_block() {
        let (text, blocks) = CodeBlocks::extract_with_nonce("``````", NONCE);
        assert_eq!(blocks.get(0), Some(""));
        assert_eq!(blocks.restore(&text), "<pre><code></code></pre>");
    }

    #[test]
    fn test_restore_escapes_content_once() {
        let (text, blocks) = CodeBlocks::extract_with_nonce("```a && b <c>```", NONCE);
        assert_eq!(
            blocks.restore(&text),
            "<pre><code>a &amp;&amp; b &lt;c&gt;</code></pre>"
        );
    }

    #[test]
    fn test_restore_keeps_formatting_characters() {
        let (text, blocks) = CodeBlocks::extract_with_nonce("```**not bold**\n- not a list```", NONCE);
        assert_eq!(
            blocks.restore(&text),
            "<pre><code>**not bold**\n- not a list</code></pre>"
        );
    }

    #[test]
    fn test_restore_ignores_foreign_nonce() {
        let (text, blocks) = CodeBlocks::extract_with_nonce("```x```", NONCE);
        let forged = format!("{text} @@recap-code-0000000000000001-0@@");
        assert_eq!(
            blocks.restore(&forged),
            "<pre><code>x</code></pre> @@recap-code-0000000000000001-0@@"
        );
    }

    #[test]
    fn test_restore_ignores_unknown_index() {
        let (_, blocks) = CodeBlocks::extract_with_nonce("```x```", NONCE);
        let text = blocks.placeholder(7);
        assert_eq!(blocks.restore(&text), text);
    }

    #[test]
    fn test_restore_does_not_rescan_restored_content() {
        let (_, blocks) = CodeBlocks::extract_with_nonce("```x```", NONCE);
        let inner = blocks.placeholder(0);
        let (text, blocks) =
            CodeBlocks::extract_with_nonce(&format!("```{inner}```"), NONCE);
        assert_eq!(
            blocks.restore(&text),
            format!("<pre><code>{inner}</code></pre>")
        );
    }

    #[test]
    fn test_no_fences_passthrough() {
        let (text, blocks) = CodeBlocks::extract("nothing to see");
        assert_eq!(text, "nothing to see");
        assert!(blocks.is_empty());
        assert_eq!(blocks.restore(&text), "nothing to see");
    }

    #[test]
    fn test_random_nonce_differs_between_calls() {
        let (_, first) = CodeBlocks::extract("```a```");
        let (_, second) = CodeBlocks::extract("```a```");
        assert_ne!(first.placeholder(0), second.placeholder(0));
    }
}
