//! Per-record-type field tables
//!
//! Each record type lists the tags it understands and how to decode each one
//! into the record under construction. Tables are keyed per enclosing type:
//! a track's path is `pfil` inside the database file but `ptrk` inside a
//! crate file.
//!
//! | Record            | Tag    | Field          | Cardinality |
//! |-------------------|--------|----------------|-------------|
//! | `DatabaseRecord`  | `vrsn` | version text   | singular    |
//! | `DatabaseRecord`  | `otrk` | `Track`        | repeated    |
//! | `Track`           | `pfil` | path text      | singular    |
//! | `CrateRecord`     | `vrsn` | version text   | singular    |
//! | `CrateRecord`     | `otrk` | `CrateTrackRef`| repeated    |
//! | `CrateTrackRef`   | `ptrk` | path text      | singular    |

use std::sync::Arc;

use crate::codec::{append_repeated, decode_text};
use crate::error::Result;
use crate::model::Track;
use crate::record::Tag;

/// Decodes one payload into a field of `T`
pub type FieldDecoder<T> = fn(&mut T, &[u8]) -> Result<()>;

/// One tag a record understands
pub struct Field<T> {
    pub tag: Tag,
    pub decode: FieldDecoder<T>,
}

impl<T> Field<T> {
    pub const fn new(tag: &[u8; 4], decode: FieldDecoder<T>) -> Self {
        Self {
            tag: Tag::new(tag),
            decode,
        }
    }
}

/// A record type decodable from a tagged-record stream
///
/// Singular fields overwrite (last tag wins); repeated fields must use
/// [`append_repeated`] so earlier elements are kept.
pub trait Record: Default + 'static {
    /// Human-readable record name for diagnostics
    const KIND: &'static str;

    /// Field table; at most one entry per tag
    const FIELDS: &'static [Field<Self>];

    fn field(tag: Tag) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|f| f.tag == tag)
    }
}

/// Root record of the `database V2` file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseRecord {
    pub version: String,
    /// The canonical track set, shared with crates after resolution
    pub tracks: Vec<Arc<Track>>,
}

/// Root record of a `.crate` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateRecord {
    /// Taken from the file name; never present in the file body
    pub name: String,
    pub version: String,
    pub tracks: Vec<CrateTrackRef>,
}

/// Track entry inside a crate file; only used to look up the real track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateTrackRef {
    pub path: String,
}

impl Record for DatabaseRecord {
    const KIND: &'static str = "database";
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"vrsn", |db: &mut DatabaseRecord, payload: &[u8]| {
            db.version = decode_text(payload)?;
            Ok(())
        }),
        Field::new(b"otrk", |db: &mut DatabaseRecord, payload: &[u8]| {
            append_repeated::<Track, _>(&mut db.tracks, payload)
        }),
    ];
}

impl Record for Track {
    const KIND: &'static str = "database track";
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"pfil", |track: &mut Track, payload: &[u8]| {
            track.path = decode_text(payload)?;
            Ok(())
        }),
    ];
}

impl Record for CrateRecord {
    const KIND: &'static str = "crate";
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"vrsn", |c: &mut CrateRecord, payload: &[u8]| {
            c.version = decode_text(payload)?;
            Ok(())
        }),
        Field::new(b"otrk", |c: &mut CrateRecord, payload: &[u8]| {
            append_repeated::<CrateTrackRef, _>(&mut c.tracks, payload)
        }),
    ];
}

impl Record for CrateTrackRef {
    const KIND: &'static str = "crate track";
    const FIELDS: &'static [Field<Self>] = &[
        Field::new(b"ptrk", |t: &mut CrateTrackRef, payload: &[u8]| {
            t.path = decode_text(payload)?;
            Ok(())
        }),
    ];
}
