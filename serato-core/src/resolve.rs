//! Cross-referencing crate track entries against the database
//!
//! Crate files only carry path strings. Each path is matched byte-for-byte
//! against the database's tracks; entries with no match are dropped.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::model::{Crate, Track};
use crate::schema::CrateRecord;

/// Path lookup over the database's tracks, built once per database
#[derive(Debug, Default)]
pub struct TrackIndex {
    by_path: HashMap<String, Arc<Track>>,
}

impl TrackIndex {
    /// Index `tracks` by path. If a path occurs more than once, the first
    /// occurrence is the one crates resolve to.
    pub fn new(tracks: &[Arc<Track>]) -> Self {
        let mut by_path = HashMap::with_capacity(tracks.len());
        for track in tracks {
            by_path
                .entry(track.path.clone())
                .or_insert_with(|| Arc::clone(track));
        }
        Self { by_path }
    }

    pub fn get(&self, path: &str) -> Option<&Arc<Track>> {
        self.by_path.get(path)
    }

    /// Number of distinct paths
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Turn a raw crate record into a [`Crate`].
    ///
    /// Populates `name`, `version` and `tracks` (resolved, in file order).
    /// `subcrates` is left empty; nesting is rebuilt in a later pass.
    pub fn resolve_crate(&self, record: CrateRecord) -> Crate {
        let CrateRecord {
            name,
            version,
            tracks: refs,
        } = record;

        let mut tracks = Vec::with_capacity(refs.len());
        for track_ref in refs {
            match self.get(&track_ref.path) {
                Some(track) => tracks.push(Arc::clone(track)),
                None => debug!("Crate {:?}: dropping unknown track {:?}", name, track_ref.path),
            }
        }

        Crate {
            name,
            version,
            tracks,
            subcrates: Vec::new(),
        }
    }
}
