//! Safe markdown-subset renderer for model-written summaries.
//!
//! Turns the text a language model produces into an HTML fragment that can be
//! dropped into a chat bubble or an email body. The supported subset is small
//! on purpose: fenced code, `**bold**`, `*italic*` and `- ` bullet lists.
//! Everything else is escaped and passed through, with newlines turned into
//! `<br/>`.
//!
//! # Pipeline
//!
//! ```text
//! raw text
//!   │  normalise \r\n
//!   ├─► strip leading greeting     ("Hi!\n..." → "...")
//!   ├─► extract code fences         (side table + nonce placeholders)
//!   ├─► escape & < > " '
//!   ├─► bold / italic / bullet lists
//!   ├─► restore code fences         (<pre><code>escaped</code></pre>)
//!   └─► \n → <br/>
//! ```
//!
//! Every stage is total: any UTF-8 input yields deterministic output, there is
//! no error type. Unbalanced fences and emphasis markers stay literal.
//!
//! # Example
//!
//! ```
//! use recap_renderer::render;
//!
//! let html = render("Hello!\n**Action Items**\n- ship it\n- <b>test</b> it");
//! assert_eq!(
//!     html,
//!     "<strong>Action Items</strong><br/><ul><li>ship it</li><li>&lt;b&gt;test&lt;/b&gt; it</li></ul>"
//! );
//! ```

mod escape;
mod fence;
mod format;
mod greeting;
mod renderer;

pub use escape::escape_html;
pub use fence::CodeBlocks;
pub use format::{format_bullets, format_inline};
pub use greeting::{DEFAULT_LOCALE, GreetingVocabulary, strip_greeting};
pub use renderer::{RenderOutput, Renderer, render};
