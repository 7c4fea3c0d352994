//! Sortbox - upload files and sort them into category folders.
//!
//! Uploaded files land in a flat upload directory. An organize run moves
//! each one into `organized/<category>/`, where the category is derived from
//! the file extension. Files are never overwritten: colliding names get a
//! `(n)` disambiguator before the extension.

pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use config::Config;
pub use error::{Result, SortboxError};
pub use file::{classify, format_size, FileStorage, OrganizeReport, Placer, StoredFile};
