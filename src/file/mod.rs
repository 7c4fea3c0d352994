//! File management module for Sortbox.
//!
//! This module provides the upload/organize functionality:
//! - Extension based classification into categories
//! - Collision-safe placement of saved and moved files
//! - Directory listings and human-readable sizes
//! - The `FileStorage` service tying the two roots together

mod category;
mod listing;
mod name;
mod placer;
mod size;
mod storage;

pub use category::{classify, extension_of, CATEGORY_TABLE, NO_EXTENSION};
pub use listing::{list_categories, list_files, CategorySummary, StoredFile};
pub use name::{secure_filename, split_name, validate_stored_name};
pub use placer::Placer;
pub use size::format_size;
pub use storage::{FileStorage, MovedFile, OrganizeFailure, OrganizeReport};

/// Default maximum upload size (50MB).
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 50 * 1024 * 1024;
