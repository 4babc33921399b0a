//! `${VAR}` expansion for deployment-specific settings.
//!
//! Applied once after parsing `recap.toml`, before validation, to
//! `server.host`, `email.from` and `email.footer`.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value` in place.
///
/// `field` names the setting in error messages. Bare `$VAR` is left alone.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if let Some(expanded) = expand_with(value, field, |var| std::env::var(var).ok())? {
        *value = expanded;
    }
    Ok(())
}

/// Expand with a custom variable lookup. Returns `None` when nothing changed.
fn expand_with<F>(value: &str, field: &str, lookup: F) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains("${") {
        return Ok(None);
    }

    let expanded = shellexpand::env_with_context(value, |var| {
        lookup(var)
            .map(Some)
            .ok_or_else(|| UnsetVar(var.to_owned()))
    })
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })?;

    Ok(Some(expanded.into_owned()))
}

/// Name of a referenced variable that has no value.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env(var: &str) -> Option<String> {
        match var {
            "RECAP_HOST" => Some("0.0.0.0".to_owned()),
            "RECAP_DOMAIN" => Some("example.com".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn test_whole_value() {
        let result = expand_with("${RECAP_HOST}", "server.host", env).unwrap();
        assert_eq!(result.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn test_embedded_reference() {
        let result = expand_with("notes@${RECAP_DOMAIN}", "email.from", env).unwrap();
        assert_eq!(result.as_deref(), Some("notes@example.com"));
    }

    #[test]
    fn test_default_used_when_unset() {
        let result = expand_with("Sent by ${RECAP_TEAM:-the team}", "email.footer", env).unwrap();
        assert_eq!(result.as_deref(), Some("Sent by the team"));
    }

    #[test]
    fn test_unset_reference_names_field_and_var() {
        let err = expand_with("${RECAP_SENDER}", "email.from", env).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in email.from: ${RECAP_SENDER} not set"
        );
    }

    #[test]
    fn test_plain_values_untouched() {
        assert_eq!(expand_with("127.0.0.1", "server.host", env).unwrap(), None);
        assert_eq!(expand_with("$HOME", "server.host", env).unwrap(), None);
    }

    #[test]
    fn test_expand_in_place_leaves_plain_value() {
        let mut value = "notes@localhost".to_owned();
        expand_in_place(&mut value, "email.from").unwrap();
        assert_eq!(value, "notes@localhost");
    }
}
