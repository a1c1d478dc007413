//! Resolved library objects
//!
//! A [`Track`] is created once while reading the database file and shared by
//! every crate that lists it. Crates own their subcrates, so the crate
//! structure is always a forest.

use std::sync::Arc;

use serde::Serialize;

/// A track known to the database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Track {
    /// Location of the audio file, exactly as stored by Serato
    pub path: String,
}

/// A crate after track resolution and nesting reconstruction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Crate {
    /// Leaf name; after nesting this no longer contains the `%%` delimiter
    pub name: String,
    pub version: String,
    /// Tracks found in the database, in crate-file order
    pub tracks: Vec<Arc<Track>>,
    pub subcrates: Vec<Crate>,
}

impl Crate {
    /// True when the crate lists no tracks and has no subcrates
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.subcrates.is_empty()
    }

    pub fn subcrates(&self) -> &[Crate] {
        &self.subcrates
    }

    /// Direct child by leaf name
    pub fn subcrate(&self, name: &str) -> Option<&Crate> {
        self.subcrates.iter().find(|c| c.name == name)
    }

    /// Number of crates below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.subcrates
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}
