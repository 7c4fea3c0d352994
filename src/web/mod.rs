//! Web API module for Sortbox.
//!
//! A small JSON API over [`crate::file::FileStorage`]: upload, list,
//! download, delete and organize.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
