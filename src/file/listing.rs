//! Directory listings.

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::category::extension_of;
use crate::{Result, SortboxError};

/// Turn "not found" into `None`: the entry was removed after the directory
/// was read.
fn skip_vanished<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// A regular file stored directly inside one of the roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    /// File name, unique within its directory.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Lower-cased extension without the dot, empty when there is none.
    pub extension: String,
    /// Last modification time, when the filesystem reports one.
    pub modified_at: Option<DateTime<Utc>>,
}

/// One category folder under the organized root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Category label (folder name).
    pub name: String,
    /// Files in the category folder.
    pub files: Vec<StoredFile>,
}

/// List regular files directly inside `dir`, sorted by name.
///
/// Subdirectories and entries whose names are not valid UTF-8 are skipped,
/// as are entries removed while the listing runs.
pub fn list_files(dir: &Path) -> Result<Vec<StoredFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let Some(entry) = skip_vanished(entry)? else {
            continue;
        };
        let Some(metadata) = skip_vanished(entry.metadata())? else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };

        files.push(StoredFile {
            extension: extension_of(&name),
            size_bytes: metadata.len(),
            modified_at: metadata.modified().ok().map(DateTime::<Utc>::from),
            name,
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// List every category folder under `organized_root` with its files.
pub fn list_categories(organized_root: &Path) -> Result<Vec<CategorySummary>> {
    let mut categories = Vec::new();

    for entry in fs::read_dir(organized_root)? {
        let Some(entry) = skip_vanished(entry)? else {
            continue;
        };
        let Some(file_type) = skip_vanished(entry.file_type())? else {
            continue;
        };
        if !file_type.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let files = match list_files(&entry.path()) {
            Ok(files) => files,
            Err(SortboxError::Io(e)) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };

        categories.push(CategorySummary { name, files });
    }

    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(categories)
}
