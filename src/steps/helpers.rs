//! Shared helpers for step implementations.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Append `block` to `path` unless `marker` already occurs in the file.
///
/// The marker check is what makes profile mutations safe to rerun: a
/// second pass finds the first pass's lines and leaves the file alone.
/// A missing file is created. Returns `true` when the block was appended.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn append_once(path: &Path, marker: &str, block: &str) -> Result<bool> {
    let current = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };

    if current.contains(marker) {
        return Ok(false);
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {} for append", path.display()))?;
    if !current.is_empty() && !current.ends_with('\n') {
        writeln!(file).with_context(|| format!("appending to {}", path.display()))?;
    }
    writeln!(file, "{block}").with_context(|| format!("appending to {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_file_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bashrc");

        let appended = append_once(&path, "NVM_DIR", "export NVM_DIR=\"$HOME/.nvm\"").unwrap();
        assert!(appended);
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("NVM_DIR"));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bashrc");

        assert!(append_once(&path, "NVM_DIR", "export NVM_DIR=\"$HOME/.nvm\"").unwrap());
        let first = fs::read_to_string(&path).unwrap();

        assert!(!append_once(&path, "NVM_DIR", "export NVM_DIR=\"$HOME/.nvm\"").unwrap());
        let second = fs::read_to_string(&path).unwrap();
        assert_eq!(first, second, "rerun must not duplicate the block");
    }

    #[test]
    fn existing_marker_prevents_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bashrc");
        fs::write(&path, "# NVM_DIR set up by hand\n").unwrap();

        assert!(!append_once(&path, "NVM_DIR", "export NVM_DIR=x").unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# NVM_DIR set up by hand\n"
        );
    }

    #[test]
    fn appends_after_file_without_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bashrc");
        fs::write(&path, "alias ll='ls -l'").unwrap();

        assert!(append_once(&path, "NVM_DIR", "export NVM_DIR=x").unwrap());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(
            contents.contains("alias ll='ls -l'\nexport NVM_DIR=x"),
            "block should start on its own line: {contents:?}"
        );
    }

    #[test]
    fn distinct_markers_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".bashrc");

        assert!(append_once(&path, "NVM_DIR", "export NVM_DIR=x").unwrap());
        assert!(append_once(&path, "PYENV_ROOT", "export PYENV_ROOT=y").unwrap());
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("NVM_DIR"));
        assert!(contents.contains("PYENV_ROOT"));
    }
}
