//! Local persistence for downloaded images.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::url_model;

/// Capability that persists bytes under a suggested filename.
/// Returns where the bytes ended up.
pub trait SaveTarget: Send + Sync {
    fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Saves into a directory. Each save writes its own hidden temp file and then
/// claims the final name with a no-clobber rename, so concurrent saves of the
/// same filename never share a temp file or replace each other's image.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectoryTarget {
    /// Without overwrite, an existing `name.png` makes the next save `name (1).png`.
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
        }
    }

    fn existing_names(&self) -> io::Result<HashSet<String>> {
        let mut names = HashSet::new();
        for entry in fs::read_dir(&self.dir)? {
            if let Ok(name) = entry?.file_name().into_string() {
                names.insert(name);
            }
        }
        Ok(names)
    }
}

impl SaveTarget for DirectoryTarget {
    fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let candidate = url_model::derive_filename(filename);

        // Dropped (and removed) on any early return.
        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", candidate))
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;

        if self.overwrite {
            let final_path = self.dir.join(&candidate);
            temp.persist(&final_path).map_err(|e| e.error)?;
            return Ok(final_path);
        }

        let mut taken = self.existing_names()?;
        loop {
            let name = url_model::unique_filename_among(&candidate, &taken);
            let final_path = self.dir.join(&name);
            match temp.persist_noclobber(&final_path) {
                Ok(_) => return Ok(final_path),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!("{} was claimed concurrently; trying the next name", name);
                    temp = e.file;
                    taken.insert(name);
                }
                Err(e) => return Err(e.error),
            }
        }
    }
}
