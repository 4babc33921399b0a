//! CLI command implementations.

pub(crate) mod email;
pub(crate) mod render;
pub(crate) mod serve;

pub(crate) use email::EmailArgs;
pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;

use std::io::Read;
use std::path::Path;

use crate::error::CliError;

/// Read a summary from `path`, or from stdin when no path (or `-`) is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        std::fs::write(&path, "**Notes**\n").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "**Notes**\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(&dir.path().join("missing.md"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
