//! Recipient list normalisation.

use std::collections::HashSet;

use crate::MailError;

/// Clean up a recipient list.
///
/// Entries may themselves hold several addresses separated by `,` or `;`.
/// Addresses are trimmed, blanks dropped and duplicates removed
/// case-insensitively, keeping the first spelling and the input order.
///
/// # Errors
///
/// - [`MailError::InvalidRecipient`] for an address without exactly one `@`,
///   with an empty local or domain part, or with whitespace or control
///   characters inside.
/// - [`MailError::NoRecipients`] when nothing is left.
/// - [`MailError::TooManyRecipients`] when more than `max` remain.
///
/// # Example
///
/// ```
/// use recap_mail::normalize_recipients;
///
/// let list = vec![" ana@example.com, bo@example.com".to_owned(), "ANA@example.com".to_owned()];
/// assert_eq!(
///     normalize_recipients(&list, 10).unwrap(),
///     vec!["ana@example.com", "bo@example.com"]
/// );
/// ```
pub fn normalize_recipients<S: AsRef<str>>(
    recipients: &[S],
    max: usize,
) -> Result<Vec<String>, MailError> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    let addresses = recipients
        .iter()
        .flat_map(|entry| entry.as_ref().split([',', ';']))
        .map(str::trim)
        .filter(|address| !address.is_empty());

    for address in addresses {
        validate_address(address)?;
        if seen.insert(address.to_lowercase()) {
            result.push(address.to_owned());
        }
    }

    if result.is_empty() {
        return Err(MailError::NoRecipients);
    }
    if result.len() > max {
        return Err(MailError::TooManyRecipients {
            count: result.len(),
            max,
        });
    }

    Ok(result)
}

fn validate_address(address: &str) -> Result<(), MailError> {
    let invalid = || MailError::InvalidRecipient(address.to_owned());

    if address
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"'))
    {
        return Err(invalid());
    }

    let (local, domain) = address.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_trims_and_drops_blanks() {
        let list = ["  a@x.io ", "", "   ", "b@x.io"];
        assert_eq!(normalize_recipients(&list, 10).unwrap(), vec!["a@x.io", "b@x.io"]);
    }

    #[test]
    fn test_splits_separated_entries() {
        let list = ["a@x.io; b@x.io,c@x.io"];
        assert_eq!(
            normalize_recipients(&list, 10).unwrap(),
            vec!["a@x.io", "b@x.io", "c@x.io"]
        );
    }

    #[test]
    fn test_dedupes_case_insensitively_keeping_first() {
        let list = ["Ana@X.io", "b@x.io", "ana@x.io"];
        assert_eq!(
            normalize_recipients(&list, 10).unwrap(),
            vec!["Ana@X.io", "b@x.io"]
        );
    }

    #[test]
    fn test_empty_list() {
        let list: [&str; 0] = [];
        assert!(matches!(
            normalize_recipients(&list, 10),
            Err(MailError::NoRecipients)
        ));
        assert!(matches!(
            normalize_recipients(&[" ", ","], 10),
            Err(MailError::NoRecipients)
        ));
    }

    #[test]
    fn test_invalid_addresses() {
        for bad in [
            "no-at-sign",
            "@x.io",
            "a@",
            "a@b@c.io",
            "a@.io",
            "a@x.",
            "a\r\nBcc: evil@x.io",
            "<a@x.io>",
        ] {
            let err = normalize_recipients(&[bad], 10).unwrap_err();
            assert!(
                matches!(err, MailError::InvalidRecipient(_)),
                "expected invalid: {bad:?}"
            );
        }
    }

    #[test]
    fn test_too_many() {
        let list = ["a@x.io", "b@x.io", "c@x.io"];
        let err = normalize_recipients(&list, 2).unwrap_err();
        assert!(matches!(
            err,
            MailError::TooManyRecipients { count: 3, max: 2 }
        ));
    }

    #[test]
    fn test_duplicates_do_not_count_towards_max() {
        let list = ["a@x.io", "A@x.io", "a@X.IO"];
        assert_eq!(normalize_recipients(&list, 1).unwrap(), vec!["a@x.io"]);
    }
}
