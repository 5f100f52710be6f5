//! # Storage Module - Guild Document Persistence
//!
//! The whole guild lives in one JSON document. This module reads it once at
//! startup and rewrites it in full after every change.
//!
//! ## Loading
//!
//! [`load_document`] never fails. A missing file yields a fresh
//! [`Document`]; an unreadable or unparsable file also yields a fresh one, and
//! the cause is handed back in [`Loaded::warning`] (and logged) so the caller
//! can tell the operator. Inside a readable file, missing keys are filled in
//! with defaults one field at a time and unknown keys are ignored.
//!
//! ## Saving
//!
//! [`save_document`] stamps `last_updated`, serializes the document with
//! `serde_json`, writes it to a temp file next to the destination, fsyncs it,
//! and renames it over the destination while holding an exclusive `fs2` lock
//! on a `.<name>.lock` sidecar. A reader therefore sees either the old file or
//! the new one, never a torn write, and a failed write leaves no temp file.
//!
//! ```rust,no_run
//! use guildbook::storage::{load_document, save_document};
//!
//! let mut loaded = load_document("guild_data.json");
//! loaded.document.guild_name = "Lanternbearers".to_string();
//! save_document("guild_data.json", &mut loaded.document)?;
//! # Ok::<(), guildbook::guild::PersistenceError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use chrono::Utc;
use fs2::FileExt;
use log::{debug, warn};

use crate::guild::errors::PersistenceError;
use crate::guild::types::Document;

/// Result of [`load_document`]: always a usable document, plus the reason
/// the on-disk copy was discarded, if it was.
#[derive(Debug)]
pub struct Loaded {
    pub document: Document,
    pub warning: Option<PersistenceError>,
}

/// Read the guild document, substituting a default one when the file is
/// missing or cannot be parsed.
pub fn load_document(path: impl AsRef<Path>) -> Loaded {
    let path = path.as_ref();
    match read_document(path) {
        Ok(Some(document)) => Loaded {
            document,
            warning: None,
        },
        Ok(None) => {
            debug!("No guild data at {}; starting fresh", path.display());
            Loaded {
                document: Document::default(),
                warning: None,
            }
        }
        Err(e) => {
            warn!(
                "Could not load {}: {} (starting with empty data)",
                path.display(),
                e
            );
            Loaded {
                document: Document::default(),
                warning: Some(e),
            }
        }
    }
}

/// Strict read: `Ok(None)` when the file does not exist, an error when it
/// exists but cannot be read or parsed.
pub fn read_document(path: impl AsRef<Path>) -> Result<Option<Document>, PersistenceError> {
    match fs::read_to_string(path.as_ref()) {
        Ok(data) => {
            // Guard against any accidental leading NULs
            let cleaned = data.trim_start_matches('\0');
            let document: Document = serde_json::from_str(cleaned)?;
            Ok(Some(document))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Stamp `last_updated` and rewrite the whole file.
///
/// The stamp never moves backwards, even if the wall clock does. On error the
/// stamp has still been applied to `document`; nothing else is touched.
pub fn save_document(
    path: impl AsRef<Path>,
    document: &mut Document,
) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    document.last_updated = Utc::now().max(document.last_updated);
    let content = serde_json::to_string_pretty(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_file_locked(path, &content)?;
    debug!("Guild data saved to {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Write `content` to `path` via temp file + rename under an exclusive lock.
fn write_file_locked(path: &Path, content: &str) -> Result<(), PersistenceError> {
    write_file_locked_with(path, |tmp| {
        tmp.write_all(content.as_bytes())?;
        tmp.flush()
    })
}

/// The destination is only ever replaced by a rename, so it is either the old
/// file or the complete new one. The lock is taken on a `.<name>.lock`
/// sidecar; the destination itself is never opened for writing.
fn write_file_locked_with<F>(path: &Path, fill: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("guild_data.json");

    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(dir.join(format!(".{}.lock", base)))?;
    lock_file.lock_exclusive()?;

    let mut counter = 0u32;
    let (tmp_path, mut tmp) = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => break (candidate, file),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e.into()),
        }
    };

    // The temp file is closed before it is renamed or removed
    let written = fill(&mut tmp).and_then(|()| {
        let _ = tmp.sync_all();
        drop(tmp);
        fs::rename(&tmp_path, path)
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    // Persist the rename itself (best-effort)
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }

    drop(lock_file);
    Ok(())
}
