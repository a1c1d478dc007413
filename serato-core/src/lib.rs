//! serato-core: reader for Serato DJ library files
//!
//! This crate decodes:
//! - `_Serato_/database V2`: the authoritative track list
//! - `_Serato_/Subcrates/*.crate`: one crate per file, nesting encoded in the name
//!
//! and assembles them into a [`Library`] of shared tracks and a crate forest.
//!
//! Reference: https://www.mixxx.org/wiki/doku.php/serato_database_format

pub mod codec;
pub mod error;
pub mod layout;
pub mod library;
pub mod model;
pub mod nesting;
pub mod reader;
pub mod record;
pub mod resolve;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{Error, Result};
pub use layout::LibraryLayout;
pub use library::Library;
pub use model::{Crate, Track};
pub use reader::{read_crate_file, read_database_file};
pub use schema::{CrateRecord, DatabaseRecord};
