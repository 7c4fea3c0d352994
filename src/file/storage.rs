//! File storage for Sortbox.
//!
//! Two sibling roots live on disk:
//! ```text
//! {upload_dir}/              flat, freshly uploaded files
//! ├── report.pdf
//! └── report(1).pdf
//! {organized_dir}/           one folder per category
//! ├── images/
//! │   └── a.jpg
//! └── no_extension/
//!     └── c
//! ```
//! Nothing else is persisted. Category membership is recomputed from the
//! extension on every organize run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::category::classify;
use super::listing::{list_categories, list_files, CategorySummary, StoredFile};
use super::name::{secure_filename, validate_stored_name};
use super::placer::Placer;
use crate::{Result, SortboxError};

/// A file moved out of the upload root by an organize run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedFile {
    /// Name the file had in the upload root.
    pub name: String,
    /// Category it was sorted into.
    pub category: String,
    /// Name it received inside the category folder.
    pub destination: String,
}

/// A file an organize run could not move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizeFailure {
    /// Name of the file in the upload root.
    pub name: String,
    /// Why it was left behind.
    pub reason: String,
}

/// Outcome of an organize run.
///
/// Runs continue past individual failures; files already moved stay moved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizeReport {
    /// Files moved, in processing order.
    pub moved: Vec<MovedFile>,
    /// Files left in place.
    pub failed: Vec<OrganizeFailure>,
}

impl OrganizeReport {
    /// Number of files moved.
    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    /// Whether every file was moved.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// File storage service owning the upload and organized roots.
#[derive(Debug)]
pub struct FileStorage {
    /// Directory for fresh uploads.
    upload_dir: PathBuf,
    /// Directory for category folders.
    organized_dir: PathBuf,
    /// Serializes placements per destination directory.
    placer: Placer,
}

impl FileStorage {
    /// Create a new FileStorage over the given roots.
    ///
    /// Both directories are created if they don't exist.
    pub fn new(upload_dir: impl Into<PathBuf>, organized_dir: impl Into<PathBuf>) -> Result<Self> {
        let upload_dir = upload_dir.into();
        let organized_dir = organized_dir.into();
        fs::create_dir_all(&upload_dir)?;
        fs::create_dir_all(&organized_dir)?;

        Ok(Self {
            upload_dir,
            organized_dir,
            placer: Placer::new(),
        })
    }

    /// Get the upload root.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Get the organized root.
    pub fn organized_dir(&self) -> &Path {
        &self.organized_dir
    }

    /// Save uploaded content under a sanitized version of `original_name`.
    ///
    /// An existing upload with the same name is never replaced; the new file
    /// gets a disambiguated name instead. Returns the stored file.
    pub fn save_upload(&self, original_name: &str, content: &[u8]) -> Result<StoredFile> {
        let name = secure_filename(original_name)
            .ok_or_else(|| SortboxError::Validation("No file selected".to_string()))?;

        let path = self.placer.save_new(&self.upload_dir, &name, content)?;
        let stored = stored_file_at(&path)?;

        tracing::info!(
            original = original_name,
            stored = %stored.name,
            size = stored.size_bytes,
            "File uploaded"
        );
        Ok(stored)
    }

    /// List files in the upload root.
    pub fn list_uploads(&self) -> Result<Vec<StoredFile>> {
        list_files(&self.upload_dir)
    }

    /// List category folders and their files.
    pub fn list_organized(&self) -> Result<Vec<CategorySummary>> {
        list_categories(&self.organized_dir)
    }

    /// Get the path of an upload, checking that it names a regular file.
    pub fn upload_path(&self, name: &str) -> Result<PathBuf> {
        validate_stored_name(name)?;
        let path = self.upload_dir.join(name);

        match fs::metadata(&path) {
            Ok(m) if m.is_file() => Ok(path),
            Ok(_) => Err(SortboxError::NotFound(format!("File: {name}"))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SortboxError::NotFound(format!("File: {name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load the content of an upload.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.upload_path(name)?;

        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SortboxError::NotFound(format!("File: {name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an upload.
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.upload_path(name)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(file = name, "File deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SortboxError::NotFound(format!("File: {name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Sort every upload into its category folder.
    ///
    /// Failing files are recorded in the report and the run carries on.
    /// Only a failure to read the upload root aborts the run.
    pub fn organize_all(&self) -> Result<OrganizeReport> {
        let mut report = OrganizeReport::default();

        for file in list_files(&self.upload_dir)? {
            let category = classify(&file.name);
            match self.organize_one(&file.name, &category) {
                Ok(dest) => {
                    let destination = dest
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| file.name.clone());
                    tracing::info!(
                        file = %file.name,
                        category = %category,
                        destination = %destination,
                        "File organized"
                    );
                    report.moved.push(MovedFile {
                        name: file.name,
                        category,
                        destination,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        file = %file.name,
                        category = %category,
                        error = %e,
                        "Failed to organize file"
                    );
                    report.failed.push(OrganizeFailure {
                        name: file.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            moved = report.moved_count(),
            failed = report.failed.len(),
            "Organize run finished"
        );
        Ok(report)
    }

    fn organize_one(&self, name: &str, category: &str) -> Result<PathBuf> {
        let category_dir = self.organized_dir.join(category);
        fs::create_dir_all(&category_dir)?;
        self.placer
            .move_into(&self.upload_dir.join(name), &category_dir, name)
    }
}

/// Describe the file at `path`.
fn stored_file_at(path: &Path) -> Result<StoredFile> {
    let metadata = fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(StoredFile {
        extension: super::category::extension_of(&name),
        size_bytes: metadata.len(),
        modified_at: metadata.modified().ok().map(Into::into),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(
            temp_dir.path().join("uploads"),
            temp_dir.path().join("organized"),
        )
        .unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_new_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let uploads = temp_dir.path().join("app").join("uploads");
        let organized = temp_dir.path().join("app").join("organized");

        let storage = FileStorage::new(&uploads, &organized).unwrap();

        assert!(uploads.is_dir());
        assert!(organized.is_dir());
        assert_eq!(storage.upload_dir(), uploads);
        assert_eq!(storage.organized_dir(), organized);
    }

    #[test]
    fn test_save_upload_and_load() {
        let (_temp_dir, storage) = setup_storage();

        let stored = storage.save_upload("report.pdf", b"%PDF-1.7").unwrap();

        assert_eq!(stored.name, "report.pdf");
        assert_eq!(stored.size_bytes, 8);
        assert_eq!(stored.extension, "pdf");
        assert_eq!(storage.load("report.pdf").unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_save_upload_disambiguates() {
        let (_temp_dir, storage) = setup_storage();

        storage.save_upload("report.pdf", b"first").unwrap();
        let second = storage.save_upload("report.pdf", b"second").unwrap();

        assert_eq!(second.name, "report(1).pdf");
        assert_eq!(storage.load("report.pdf").unwrap(), b"first");
        assert_eq!(storage.load("report(1).pdf").unwrap(), b"second");
    }

    #[test]
    fn test_save_upload_sanitizes_name() {
        let (_temp_dir, storage) = setup_storage();

        let stored = storage.save_upload("../../my notes.txt", b"x").unwrap();

        assert_eq!(stored.name, "my_notes.txt");
        assert!(storage.upload_dir().join("my_notes.txt").is_file());
    }

    #[test]
    fn test_save_upload_empty_name() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.save_upload("", b"x");

        assert!(matches!(result, Err(SortboxError::Validation(_))));
        assert!(storage.list_uploads().unwrap().is_empty());
    }

    #[test]
    fn test_binary_content() {
        let (_temp_dir, storage) = setup_storage();
        let content: Vec<u8> = (0..=255).collect();

        storage.save_upload("binary.bin", &content).unwrap();

        assert_eq!(storage.load("binary.bin").unwrap(), content);
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.load("nonexistent.txt");
        assert!(matches!(result, Err(SortboxError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_traversal() {
        let (temp_dir, storage) = setup_storage();
        fs::write(temp_dir.path().join("secret.txt"), b"secret").unwrap();

        let result = storage.load("../secret.txt");
        assert!(matches!(result, Err(SortboxError::Validation(_))));
    }

    #[test]
    fn test_delete_rejects_traversal() {
        let (temp_dir, storage) = setup_storage();
        let secret = temp_dir.path().join("secret.txt");
        fs::write(&secret, b"secret").unwrap();

        let result = storage.delete("../secret.txt");
        assert!(matches!(result, Err(SortboxError::Validation(_))));
        assert!(matches!(storage.delete(".."), Err(SortboxError::Validation(_))));
        assert!(secret.is_file());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = setup_storage();
        storage.save_upload("old.txt", b"bye").unwrap();

        storage.delete("old.txt").unwrap();

        assert!(!storage.upload_dir().join("old.txt").exists());
    }

    #[test]
    fn test_delete_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.delete("nonexistent.txt");
        assert!(matches!(result, Err(SortboxError::NotFound(_))));
    }

    #[test]
    fn test_delete_refuses_directories() {
        let (_temp_dir, storage) = setup_storage();
        fs::create_dir(storage.upload_dir().join("folder")).unwrap();

        let result = storage.delete("folder");

        assert!(matches!(result, Err(SortboxError::NotFound(_))));
        assert!(storage.upload_dir().join("folder").is_dir());
    }

    #[test]
    fn test_organize_empty_upload_dir() {
        let (_temp_dir, storage) = setup_storage();

        let report = storage.organize_all().unwrap();

        assert_eq!(report.moved_count(), 0);
        assert!(report.is_complete());
        assert_eq!(fs::read_dir(storage.organized_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_organize_sorts_by_category() {
        let (_temp_dir, storage) = setup_storage();
        storage.save_upload("a.jpg", b"img").unwrap();
        storage.save_upload("b.unknownext", b"?").unwrap();
        storage.save_upload("c", b"plain").unwrap();

        let report = storage.organize_all().unwrap();

        assert_eq!(report.moved_count(), 3);
        let organized = storage.organized_dir();
        assert!(organized.join("images").join("a.jpg").is_file());
        assert!(organized.join("unknownext").join("b.unknownext").is_file());
        assert!(organized.join("no_extension").join("c").is_file());
        assert!(storage.list_uploads().unwrap().is_empty());
    }

    #[test]
    fn test_organize_leaves_subdirectories_alone() {
        let (_temp_dir, storage) = setup_storage();
        fs::create_dir(storage.upload_dir().join("keep")).unwrap();

        let report = storage.organize_all().unwrap();

        assert_eq!(report.moved_count(), 0);
        assert!(storage.upload_dir().join("keep").is_dir());
    }

    #[test]
    fn test_organize_continues_after_failure() {
        let (_temp_dir, storage) = setup_storage();
        // A plain file where the category folder should go
        fs::write(storage.organized_dir().join("images"), b"in the way").unwrap();
        storage.save_upload("a.jpg", b"img").unwrap();
        storage.save_upload("b.pdf", b"pdf").unwrap();

        let report = storage.organize_all().unwrap();

        assert_eq!(report.moved_count(), 1);
        assert_eq!(report.moved[0].name, "b.pdf");
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "a.jpg");
        assert!(storage.upload_dir().join("a.jpg").is_file());
        assert!(storage.organized_dir().join("pdfs").join("b.pdf").is_file());
    }

    #[test]
    fn test_list_organized() {
        let (_temp_dir, storage) = setup_storage();
        storage.save_upload("a.jpg", b"img").unwrap();
        storage.organize_all().unwrap();

        let categories = storage.list_organized().unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "images");
        assert_eq!(categories[0].files[0].name, "a.jpg");
    }
}
