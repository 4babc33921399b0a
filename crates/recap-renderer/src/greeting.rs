//! Leading greeting removal.
//!
//! Models like to open an answer with a bare "Hi!" or "**Hello,**" line. That
//! line carries no content, so it is dropped before rendering. The words that
//! count as a greeting are data, grouped by locale, so deployments can add
//! their own languages without touching the stripping logic.

use std::collections::{BTreeMap, BTreeSet};

/// Locale used when none is selected or the selected one is unknown.
pub const DEFAULT_LOCALE: &str = "en";

/// Built-in greetings for [`DEFAULT_LOCALE`].
const EN_GREETINGS: &[&str] = &["hi", "hii", "hello", "hey", "hiya"];

/// Greeting words grouped by locale.
///
/// Words are stored lowercased and trimmed. Lookups for a locale that has no
/// entry fall back to the default locale.
///
/// # Example
///
/// ```
/// use recap_renderer::GreetingVocabulary;
///
/// let mut vocabulary = GreetingVocabulary::builtin();
/// vocabulary.insert("de", ["hallo", "moin"]);
///
/// assert_eq!(vocabulary.strip("Moin!\nProtokoll folgt.", "de"), "Protokoll folgt.");
/// assert_eq!(vocabulary.strip("Hi!\nSummary follows.", "fr"), "Summary follows.");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GreetingVocabulary {
    locales: BTreeMap<String, BTreeSet<String>>,
    default_locale: String,
}

impl Default for GreetingVocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GreetingVocabulary {
    /// Vocabulary containing only the built-in English greetings.
    #[must_use]
    pub fn builtin() -> Self {
        let mut vocabulary = Self::empty(DEFAULT_LOCALE);
        vocabulary.insert(DEFAULT_LOCALE, EN_GREETINGS.iter().copied());
        vocabulary
    }

    /// Vocabulary with no words at all. Nothing is stripped until words are added.
    #[must_use]
    pub fn empty(default_locale: impl Into<String>) -> Self {
        Self {
            locales: BTreeMap::new(),
            default_locale: default_locale.into(),
        }
    }

    /// Add greeting words for a locale, extending any existing entry.
    pub fn insert<I, S>(&mut self, locale: impl Into<String>, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.locales.entry(locale.into()).or_default();
        entry.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    /// Replace the words for a locale.
    pub fn replace<I, S>(&mut self, locale: impl Into<String>, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locale = locale.into();
        self.locales.remove(&locale);
        self.insert(locale, words);
    }

    /// Change the fallback locale.
    pub fn set_default_locale(&mut self, locale: impl Into<String>) {
        self.default_locale = locale.into();
    }

    /// The fallback locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Locales with at least one entry, in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Words for `locale`, falling back to the default locale.
    #[must_use]
    pub fn words(&self, locale: &str) -> Option<&BTreeSet<String>> {
        self.locales
            .get(locale)
            .or_else(|| self.locales.get(&self.default_locale))
    }

    /// Check whether a single line is nothing but a greeting.
    #[must_use]
    pub fn is_greeting(&self, locale: &str, line: &str) -> bool {
        self.words(locale)
            .is_some_and(|words| words.contains(&greeting_core(line)))
    }

    /// Strip a leading greeting line using the words for `locale`.
    ///
    /// See [`strip_greeting`] for the exact rules.
    #[must_use]
    pub fn strip<'a>(&self, text: &'a str, locale: &str) -> &'a str {
        strip_with(text, |line| self.is_greeting(locale, line))
    }
}

/// Strip a leading greeting line using the built-in English words.
///
/// The first line is removed only when:
/// - at least one non-blank line follows it, so a reply that is nothing but
///   a greeting is never emptied, and
/// - after trimming, dropping `*` markers on both ends and trailing `.`, `,`,
///   `!`, `?`, the line is one of `hi`, `hii`, `hello`, `hey`, `hiya`
///   (case-insensitive).
///
/// When the line is removed, the rest is returned with surrounding whitespace
/// trimmed. Otherwise the input comes back untouched.
///
/// # Examples
///
/// ```
/// use recap_renderer::strip_greeting;
///
/// assert_eq!(strip_greeting("Hi!\nHere is your summary."), "Here is your summary.");
/// assert_eq!(strip_greeting("**Hello,**\n\nNotes"), "Notes");
/// assert_eq!(strip_greeting("Hello"), "Hello");
/// assert_eq!(strip_greeting("Hi team, notes below\nNotes"), "Hi team, notes below\nNotes");
/// ```
pub fn strip_greeting(text: &str) -> &str {
    strip_with(text, |line| EN_GREETINGS.contains(&greeting_core(line).as_str()))
}

fn strip_with(text: &str, is_greeting: impl Fn(&str) -> bool) -> &str {
    let Some((first, rest)) = text.split_once('\n') else {
        return text;
    };
    let rest = rest.trim();
    if rest.is_empty() || !is_greeting(first) {
        return text;
    }
    rest
}

/// Reduce a line to the word a greeting check compares against.
fn greeting_core(line: &str) -> String {
    line.trim()
        .trim_start_matches('*')
        .trim_start()
        .trim_end_matches('*')
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | '!' | '?') || c.is_whitespace())
        .to_lowercase()
}
