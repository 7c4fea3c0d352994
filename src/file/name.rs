//! File name handling: splitting, sanitizing and validating names.

use crate::{Result, SortboxError};

/// Split a file name into its stem and extension.
///
/// The extension starts at the last `.` and includes it. A leading dot
/// (`.bashrc`) or a trailing dot (`notes.`) does not start an extension,
/// so both return an empty extension.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// Turn a client supplied file name into one that is safe to store.
///
/// Path components are dropped, whitespace becomes `_`, and only letters,
/// digits, `.`, `-` and `_` survive. Leading and trailing `.`/`_` are
/// trimmed so the result can never be `.`, `..` or a hidden file.
///
/// Returns `None` when nothing usable is left.
pub fn secure_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check that a name refers to an entry directly inside a root directory.
///
/// Used for names arriving in request paths, where no sanitizing happens.
pub fn validate_stored_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SortboxError::Validation("file name is empty".to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        let message = format!("invalid file name: {name}");
        return Err(SortboxError::Validation(message));
    }
    Ok(())
}
