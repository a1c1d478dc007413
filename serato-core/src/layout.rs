//! Where Serato keeps its library files
//!
//! Given a library root `R` (a drive root or the user's Music folder):
//! - `R/_Serato_/database V2`: every known track
//! - `R/_Serato_/Subcrates/*.crate`: one file per crate

use std::path::{Path, PathBuf};

/// Names of the directories and files that make up a library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLayout {
    pub serato_dir: String,
    pub database_file: String,
    pub subcrates_dir: String,
    /// Crate file extension, without the leading dot
    pub crate_extension: String,
}

impl Default for LibraryLayout {
    fn default() -> Self {
        Self {
            serato_dir: "_Serato_".into(),
            database_file: "database V2".into(),
            subcrates_dir: "Subcrates".into(),
            crate_extension: "crate".into(),
        }
    }
}

impl LibraryLayout {
    pub fn database_path(&self, root: &Path) -> PathBuf {
        root.join(&self.serato_dir).join(&self.database_file)
    }

    pub fn subcrates_path(&self, root: &Path) -> PathBuf {
        root.join(&self.serato_dir).join(&self.subcrates_dir)
    }

    /// True if `path` has the crate extension (case-sensitive)
    pub fn is_crate_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == self.crate_extension.as_str())
            .unwrap_or(false)
    }
}
