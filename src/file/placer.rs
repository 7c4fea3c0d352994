//! Collision-safe placement of files.
//!
//! A file placed into a directory never replaces an existing entry. When the
//! wanted name is taken, a disambiguator is inserted before the extension:
//! `report.pdf`, `report(1).pdf`, `report(2).pdf`, ...
//!
//! Placements into the same directory are serialized with a per-directory
//! lock, and fresh saves additionally use create-exclusive opens, so
//! concurrent requests cannot pick the same destination.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::name::split_name;
use crate::Result;

/// Candidate path number `n` for `base_name` inside `dest_dir`.
fn candidate(dest_dir: &Path, base_name: &str, n: u32) -> PathBuf {
    if n == 0 {
        return dest_dir.join(base_name);
    }
    let (stem, ext) = split_name(base_name);
    dest_dir.join(format!("{stem}({n}){ext}"))
}

/// Places files into directories without overwriting anything.
#[derive(Debug, Default)]
pub struct Placer {
    /// One lock per destination directory.
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Placer {
    /// Create a new placer with an empty lock registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the first unused path for `base_name` inside `dest_dir`.
    ///
    /// The result did not exist when it was checked. Callers that go on to
    /// write the path should use [`Placer::save_new`] or
    /// [`Placer::move_into`], which hold the directory lock across the check.
    pub fn place_unique(dest_dir: &Path, base_name: &str) -> PathBuf {
        (0..)
            .map(|n| candidate(dest_dir, base_name, n))
            .find(|path| !path_taken(path))
            .unwrap_or_else(|| dest_dir.join(base_name))
    }

    /// Write `content` as a new file named after `base_name` in `dest_dir`.
    ///
    /// Returns the path actually written.
    pub fn save_new(&self, dest_dir: &Path, base_name: &str, content: &[u8]) -> Result<PathBuf> {
        let lock = self.dir_lock(dest_dir);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut n = 0;
        loop {
            let path = candidate(dest_dir, base_name, n);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    let written = file.write_all(content).and_then(|()| file.sync_all());
                    if let Err(e) = written {
                        drop(file);
                        let _ = fs::remove_file(&path);
                        return Err(e.into());
                    }
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Move `source` into `dest_dir`, keeping `base_name` when it is free.
    ///
    /// Returns the destination path. A plain rename is tried first; when
    /// that fails (for example across filesystems) the file is copied and
    /// the source removed.
    pub fn move_into(&self, source: &Path, dest_dir: &Path, base_name: &str) -> Result<PathBuf> {
        let lock = self.dir_lock(dest_dir);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let dest = Self::place_unique(dest_dir, base_name);
        match fs::rename(source, &dest) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(e.into()),
            Err(rename_err) => {
                tracing::debug!(
                    source = %source.display(),
                    error = %rename_err,
                    "Rename failed, falling back to copy"
                );
                copy_then_remove(source, &dest).map_err(|copy_err| {
                    tracing::debug!(error = %copy_err, "Copy fallback failed");
                    rename_err
                })?;
            }
        }

        Ok(dest)
    }

    /// Get (or create) the lock guarding `dir`.
    fn dir_lock(&self, dir: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(dir.to_path_buf()).or_default().clone()
    }
}

/// Move a file by copying it to `dest` and removing `source`.
///
/// Used when a rename is not possible, e.g. across filesystems. On failure
/// `dest` is removed again so only one copy remains.
fn copy_then_remove(source: &Path, dest: &Path) -> io::Result<()> {
    if let Err(e) = fs::copy(source, dest) {
        let _ = fs::remove_file(dest);
        return Err(e);
    }
    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(dest);
        return Err(e);
    }
    Ok(())
}

/// Whether anything (file, directory or dangling link) occupies `path`.
fn path_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
