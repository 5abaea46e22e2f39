//! File-backed resume cursors.
//!
//! Each sweep records the highest entry id it has fully completed in a
//! small state file, one integer per named cursor. The catalog sweep and
//! the review sweep each own an independent cursor; neither infers its
//! progress from record presence in the database.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A durable, monotonically advancing pointer to the last fully processed
/// entry id for one sweep.
#[derive(Debug, Clone)]
pub struct ResumeCursor {
    path: PathBuf,
}

impl ResumeCursor {
    /// Cursor named `name`, stored as `<dir>/<name>.cursor`.
    pub fn named(dir: &Path, name: &str) -> Self {
        Self {
            path: dir.join(format!("{name}.cursor")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cursor value. 0 if the file does not exist yet.
    pub fn get(&self) -> io::Result<i64> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };
        text.trim().parse::<i64>().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("corrupt cursor file {}: {e}", self.path.display()),
            )
        })
    }

    /// Durably record a new cursor value.
    ///
    /// Writes to a sibling temp file and renames over the cursor, so a crash
    /// mid-write leaves the previous value intact.
    pub fn set(&self, value: i64) -> io::Result<()> {
        let tmp = self.path.with_extension("cursor.tmp");
        fs::write(&tmp, value.to_string())?;
        fs::rename(&tmp, &self.path)
    }
}
