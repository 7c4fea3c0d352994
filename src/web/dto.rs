//! Response DTOs for the web API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::file::{format_size, CategorySummary, OrganizeReport, StoredFile};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A file in a listing.
#[derive(Debug, Serialize)]
pub struct FileResponse {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Size formatted for display (e.g. "1.5 KB").
    pub size_display: String,
    /// Lower-cased extension, `None` when the file has none.
    pub extension: Option<String>,
    /// Last modification time.
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<StoredFile> for FileResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            size_display: format_size(file.size_bytes),
            size: file.size_bytes,
            extension: Some(file.extension).filter(|ext| !ext.is_empty()),
            modified_at: file.modified_at,
            name: file.name,
        }
    }
}

/// Upload result.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// The stored file.
    pub file: FileResponse,
    /// Status message.
    pub message: String,
}

/// Plain status message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Status message.
    pub message: String,
}

/// A moved file in an organize result.
#[derive(Debug, Serialize)]
pub struct MovedFileResponse {
    /// Name in the upload root.
    pub name: String,
    /// Category folder.
    pub category: String,
    /// Name inside the category folder.
    pub destination: String,
}

/// A file left behind by an organize run.
#[derive(Debug, Serialize)]
pub struct FailedFileResponse {
    /// Name in the upload root.
    pub name: String,
    /// Reason for the failure.
    pub reason: String,
}

/// Organize result.
#[derive(Debug, Serialize)]
pub struct OrganizeResponse {
    /// Number of files moved.
    pub moved_count: usize,
    /// Moved files.
    pub moved: Vec<MovedFileResponse>,
    /// Files that could not be moved.
    pub failed: Vec<FailedFileResponse>,
    /// Status message.
    pub message: String,
}

impl From<OrganizeReport> for OrganizeResponse {
    fn from(report: OrganizeReport) -> Self {
        let moved_count = report.moved_count();
        let mut message = if moved_count > 0 {
            format!("Organized {moved_count} file(s) successfully!")
        } else if report.failed.is_empty() {
            "No files to organize.".to_string()
        } else {
            "No files were organized.".to_string()
        };
        if !report.failed.is_empty() {
            message.push_str(&format!(" {} file(s) could not be moved.", report.failed.len()));
        }

        Self {
            moved_count,
            moved: report
                .moved
                .into_iter()
                .map(|m| MovedFileResponse {
                    name: m.name,
                    category: m.category,
                    destination: m.destination,
                })
                .collect(),
            failed: report
                .failed
                .into_iter()
                .map(|f| FailedFileResponse {
                    name: f.name,
                    reason: f.reason,
                })
                .collect(),
            message,
        }
    }
}

/// A category folder in the organized tree.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category label.
    pub name: String,
    /// Number of files in the folder.
    pub file_count: usize,
    /// Files in the folder.
    pub files: Vec<FileResponse>,
}

impl From<CategorySummary> for CategoryResponse {
    fn from(category: CategorySummary) -> Self {
        Self {
            name: category.name,
            file_count: category.files.len(),
            files: category.files.into_iter().map(FileResponse::from).collect(),
        }
    }
}
