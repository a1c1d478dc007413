//! Library assembly
//!
//! Loads the database file, every crate file next to it, resolves crate
//! tracks against the database and rebuilds subcrate nesting.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::layout::LibraryLayout;
use crate::model::{Crate, Track};
use crate::nesting::rebuild_nesting;
use crate::reader::{read_crate_file, read_database_file};
use crate::resolve::TrackIndex;
use crate::schema::{CrateRecord, DatabaseRecord};

/// A fully resolved Serato library
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Library {
    pub version: String,
    /// Every track from the database, in database order
    pub tracks: Vec<Arc<Track>>,
    /// Top-level crates
    pub crates: Vec<Crate>,
}

impl Library {
    /// Load the library rooted at `root` using the standard Serato layout.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::load_with_layout(root, &LibraryLayout::default())
    }

    /// Load the library rooted at `root` using a custom layout.
    ///
    /// Fails if the database file cannot be read or any crate file is
    /// malformed. A missing subcrates directory means no crates.
    pub fn load_with_layout<P: AsRef<Path>>(root: P, layout: &LibraryLayout) -> Result<Self> {
        let root = root.as_ref();

        let database = read_database_file(layout.database_path(root))?;
        let records = read_crate_records(root, layout)?;
        let library = Self::assemble(database, records);

        info!(
            "Loaded library {:?}: {} tracks, {} crates",
            root,
            library.tracks.len(),
            library.crate_count()
        );
        Ok(library)
    }

    /// Build a library from already-decoded records.
    ///
    /// Takes `version` and `tracks` from the database, resolves each crate
    /// record against those tracks, then nests the resolved crates.
    pub fn assemble(database: DatabaseRecord, records: Vec<CrateRecord>) -> Self {
        let DatabaseRecord { version, tracks } = database;

        let index = TrackIndex::new(&tracks);
        if index.is_empty() && !records.is_empty() {
            debug!("Database has no tracks, every crate resolves empty");
        }
        let flat: Vec<Crate> = records
            .into_iter()
            .map(|record| index.resolve_crate(record))
            .collect();

        Self {
            version,
            tracks,
            crates: rebuild_nesting(flat),
        }
    }

    /// Number of crates at any depth
    pub fn crate_count(&self) -> usize {
        self.crates.iter().map(|c| 1 + c.descendant_count()).sum()
    }

    /// Depth-first, pre-order walk over every crate with its depth (0 = top-level)
    pub fn walk_crates(&self) -> CrateWalk<'_> {
        CrateWalk {
            stack: self.crates.iter().rev().map(|c| (0, c)).collect(),
        }
    }

    /// Look up a crate by its path-key pieces, e.g. `["Top", "Mid"]`
    pub fn find_crate(&self, pieces: &[&str]) -> Option<&Crate> {
        let (first, rest) = pieces.split_first()?;
        let mut current = self.crates.iter().find(|c| c.name == *first)?;
        for piece in rest {
            current = current.subcrate(piece)?;
        }
        Some(current)
    }
}

/// Iterator returned by [`Library::walk_crates`]
pub struct CrateWalk<'a> {
    stack: Vec<(usize, &'a Crate)>,
}

impl<'a> Iterator for CrateWalk<'a> {
    type Item = (usize, &'a Crate);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, c) = self.stack.pop()?;
        self.stack
            .extend(c.subcrates().iter().rev().map(|sub| (depth + 1, sub)));
        Some((depth, c))
    }
}

/// Read every crate file in the subcrates directory, in file-name order.
///
/// Symlinked entries are followed. Errors listing the directory are returned,
/// only a missing directory counts as empty.
fn read_crate_records(root: &Path, layout: &LibraryLayout) -> Result<Vec<CrateRecord>> {
    let dir = layout.subcrates_path(root);
    if !dir.is_dir() {
        debug!("No subcrates directory at {:?}", dir);
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for entry in WalkDir::new(&dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let path = entry.path();

        if !entry.file_type().is_file() || !layout.is_crate_file(path) {
            debug!("Skipping {:?}", path);
            continue;
        }

        records.push(read_crate_file(path)?);
    }

    Ok(records)
}
