//! Whole-file readers for `database V2` and `.crate` files
//!
//! Each file is a single root record framed by the file's own length.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::decode_record;
use crate::schema::{CrateRecord, DatabaseRecord, Record};

/// Read and decode a `database V2` file.
pub fn read_database_file<P: AsRef<Path>>(path: P) -> Result<DatabaseRecord> {
    read_root(path.as_ref())
}

/// Read and decode a `.crate` file.
///
/// The crate's name is the file name without extension.
pub fn read_crate_file<P: AsRef<Path>>(path: P) -> Result<CrateRecord> {
    let path = path.as_ref();
    let mut record: CrateRecord = read_root(path)?;
    record.name = crate_name_from_path(path);
    Ok(record)
}

/// Decode a database record from an in-memory file image.
pub fn decode_database(bytes: &[u8]) -> Result<DatabaseRecord> {
    decode_record(&mut Cursor::new(bytes), bytes.len() as u64)
}

/// Decode a crate record from an in-memory file image.
pub fn decode_crate(name: &str, bytes: &[u8]) -> Result<CrateRecord> {
    let mut record: CrateRecord = decode_record(&mut Cursor::new(bytes), bytes.len() as u64)?;
    record.name = name.to_string();
    Ok(record)
}

/// File stem, lossily converted; `%%` nesting delimiters are kept intact
pub fn crate_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_root<T: Record>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| Error::file_open(path, e))?;
    let len = file.metadata()?.len();
    debug!("Reading {} file {:?} ({} bytes)", T::KIND, path, len);

    // The handle is dropped on every return path, including decode errors
    let mut reader = BufReader::new(file);
    decode_record(&mut reader, len)
}
