//! Tagged-record decoding
//!
//! Serato's `database V2` and `.crate` files are **big-endian** streams of
//! tagged records. A payload is either a leaf value (text) or another stream
//! of records, so the format nests to arbitrary depth:
//!
//! ```text
//! [tag: 4 bytes ASCII][len: u32 BE][payload: len bytes] ...
//! ```
//!
//! Which tags a record understands is declared by its [`Record`] schema.
//! Tags outside the schema are skipped by length, never rejected.
//!
//! Reference: https://www.mixxx.org/wiki/doku.php/serato_database_format

use std::fmt;
use std::io::{self, Read, Seek};

use binrw::{binrw, BinRead};
use tracing::trace;

use crate::error::{Error, Result};
use crate::schema::Record;

/// Size of a record tag in bytes
pub const TAG_SIZE: u64 = 4;

/// Size of a record length field in bytes
pub const LENGTH_SIZE: u64 = 4;

/// Tag + length
pub const HEADER_SIZE: u64 = TAG_SIZE + LENGTH_SIZE;

/// Four-byte record tag, e.g. `vrsn` or `otrk`
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Tag(*bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

/// Header preceding every record payload
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub tag: Tag,
    /// Payload length in bytes, excluding the header itself
    pub len: u32,
}

impl RecordHeader {
    /// Total bytes this record occupies in its enclosing budget
    pub fn record_size(&self) -> u64 {
        HEADER_SIZE + u64::from(self.len)
    }
}

/// Decode a fresh `T` from `budget` bytes of `reader`.
pub fn decode_record<T: Record, R: Read + Seek>(reader: &mut R, budget: u64) -> Result<T> {
    let mut record = T::default();
    decode_fields(reader, budget, &mut record)?;
    Ok(record)
}

/// Decode records from `reader` into `record` until `budget` bytes are used up.
///
/// The loop stops once the running total reaches or passes `budget`; the last
/// record is not re-checked against the budget. Known tags are dispatched to
/// the schema's field decoder with exactly `len` payload bytes. A payload is
/// read in full before it is applied, so a truncated record never leaves a
/// half-written field behind.
pub fn decode_fields<T: Record, R: Read + Seek>(
    reader: &mut R,
    budget: u64,
    record: &mut T,
) -> Result<()> {
    let mut consumed = 0u64;

    while consumed < budget {
        let offset = reader.stream_position()?;
        let header = read_header(reader, offset, T::KIND)?;
        consumed += header.record_size();

        match T::field(header.tag) {
            Some(field) => {
                let payload = read_payload(reader, &header, offset, T::KIND)?;
                (field.decode)(record, &payload)?;
            }
            None => {
                trace!(
                    kind = T::KIND,
                    tag = %header.tag,
                    len = header.len,
                    "skipping unknown record"
                );
                skip_payload(reader, &header, offset, T::KIND)?;
            }
        }
    }

    Ok(())
}

fn read_header<R: Read + Seek>(reader: &mut R, offset: u64, kind: &str) -> Result<RecordHeader> {
    RecordHeader::read(reader).map_err(|e| {
        if e.is_eof() {
            Error::TruncatedInput(format!(
                "{} record header cut short (at offset {})",
                kind, offset
            ))
        } else {
            Error::from(e)
        }
    })
}

fn read_payload<R: Read>(
    reader: &mut R,
    header: &RecordHeader,
    offset: u64,
    kind: &str,
) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    let read = (&mut *reader)
        .take(u64::from(header.len))
        .read_to_end(&mut payload)?;

    if read as u64 != u64::from(header.len) {
        return Err(truncated_payload(header, offset, kind, read as u64));
    }
    Ok(payload)
}

fn skip_payload<R: Read>(
    reader: &mut R,
    header: &RecordHeader,
    offset: u64,
    kind: &str,
) -> Result<()> {
    let skipped = io::copy(&mut (&mut *reader).take(u64::from(header.len)), &mut io::sink())?;

    if skipped != u64::from(header.len) {
        return Err(truncated_payload(header, offset, kind, skipped));
    }
    Ok(())
}

fn truncated_payload(header: &RecordHeader, offset: u64, kind: &str, available: u64) -> Error {
    Error::TruncatedInput(format!(
        "{} record '{}' declares {} bytes but only {} remain (at offset {})",
        kind, header.tag, header.len, available, offset
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{record, text};
    use crate::schema::{CrateRecord, DatabaseRecord};
    use std::io::Cursor;

    fn decode<T: Record>(bytes: &[u8]) -> Result<T> {
        decode_record(&mut Cursor::new(bytes), bytes.len() as u64)
    }

    #[test]
    fn test_header_is_big_endian() {
        let bytes = [b'v', b'r', b's', b'n', 0x00, 0x00, 0x01, 0x02];
        let header = RecordHeader::read(&mut Cursor::new(&bytes[..])).unwrap();

        assert_eq!(header.tag, Tag::new(b"vrsn"));
        assert_eq!(header.len, 0x0102);
        assert_eq!(header.record_size(), 8 + 0x0102);
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(Tag::new(b"otrk").to_string(), "otrk");
        assert_eq!(Tag::new(b"a\x00b\xff").to_string(), "a\\x00b\\xff");
    }

    #[test]
    fn test_known_fields_decoded() {
        let mut bytes = record(b"vrsn", &text("1.0/Serato ScratchLive Crate"));
        bytes.extend(record(b"otrk", &record(b"ptrk", &text("/music/a.mp3"))));
        bytes.extend(record(b"otrk", &record(b"ptrk", &text("/music/b.mp3"))));

        let crate_record: CrateRecord = decode(&bytes).unwrap();

        assert_eq!(crate_record.version, "1.0/Serato ScratchLive Crate");
        let paths: Vec<&str> = crate_record.tracks.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, ["/music/a.mp3", "/music/b.mp3"]);
    }

    #[test]
    fn test_unknown_tag_skipped() {
        let mut bytes = record(b"vrsn", &text("2.0"));
        bytes.extend(record(b"xxxx", &[0xde, 0xad, 0xbe, 0xef]));
        bytes.extend(record(b"otrk", &record(b"pfil", &text("/a.mp3"))));

        let db: DatabaseRecord = decode(&bytes).unwrap();

        assert_eq!(db.version, "2.0");
        assert_eq!(db.tracks.len(), 1);
        assert_eq!(db.tracks[0].path, "/a.mp3");
    }

    #[test]
    fn test_unknown_nested_tag_skipped() {
        let mut track = record(b"ttyp", &text("mp3"));
        track.extend(record(b"pfil", &text("/a.mp3")));
        track.extend(record(b"uadd", &[0, 0, 0, 1]));
        let bytes = record(b"otrk", &track);

        let db: DatabaseRecord = decode(&bytes).unwrap();

        assert_eq!(db.tracks[0].path, "/a.mp3");
    }

    #[test]
    fn test_singular_field_last_tag_wins() {
        let mut bytes = record(b"vrsn", &text("first"));
        bytes.extend(record(b"vrsn", &text("second")));

        let db: DatabaseRecord = decode(&bytes).unwrap();

        assert_eq!(db.version, "second");
    }

    #[test]
    fn test_empty_budget_yields_default() {
        let db: DatabaseRecord = decode(&[]).unwrap();

        assert!(db.version.is_empty());
        assert!(db.tracks.is_empty());
    }

    #[test]
    fn test_truncated_payload() {
        // Declares 10 payload bytes, supplies 5
        let mut bytes = b"vrsn".to_vec();
        bytes.extend_from_slice(&10u32.to_be_bytes());
        bytes.extend_from_slice(&[0, b'a', 0, b'b', 0]);

        let err = decode::<DatabaseRecord>(&bytes).unwrap_err();

        assert!(matches!(err, Error::TruncatedInput(_)), "got {err:?}");
    }

    #[test]
    fn test_truncated_unknown_payload() {
        let mut bytes = b"zzzz".to_vec();
        bytes.extend_from_slice(&64u32.to_be_bytes());
        bytes.extend_from_slice(&[0; 8]);

        let err = decode::<CrateRecord>(&bytes).unwrap_err();

        assert!(matches!(err, Error::TruncatedInput(_)), "got {err:?}");
    }

    #[test]
    fn test_truncated_tag() {
        let mut bytes = record(b"vrsn", &text("1"));
        bytes.extend_from_slice(b"ot");

        let err = decode::<DatabaseRecord>(&bytes).unwrap_err();

        assert!(matches!(err, Error::TruncatedInput(_)), "got {err:?}");
    }

    #[test]
    fn test_truncated_length() {
        let mut bytes = b"vrsn".to_vec();
        bytes.extend_from_slice(&[0, 0]);

        let err = decode::<DatabaseRecord>(&bytes).unwrap_err();

        assert!(matches!(err, Error::TruncatedInput(_)), "got {err:?}");
    }

    #[test]
    fn test_truncation_inside_nested_record_aborts() {
        // The otrk payload is complete, but its inner pfil overstates its length
        let mut inner = b"pfil".to_vec();
        inner.extend_from_slice(&100u32.to_be_bytes());
        inner.extend(text("/a.mp3"));
        let bytes = record(b"otrk", &inner);

        let err = decode::<DatabaseRecord>(&bytes).unwrap_err();

        assert!(matches!(err, Error::TruncatedInput(_)), "got {err:?}");
    }

    #[test]
    fn test_budget_overshoot_terminates() {
        // Budget ends mid-way through the final record's payload
        let mut bytes = record(b"vrsn", &text("1"));
        bytes.extend(record(b"otrk", &record(b"pfil", &text("/a.mp3"))));
        let budget = bytes.len() as u64 - 3;

        let db: DatabaseRecord = decode_record(&mut Cursor::new(&bytes[..]), budget).unwrap();

        assert_eq!(db.tracks.len(), 1);
    }

    #[test]
    fn test_decoding_is_repeatable() {
        let mut bytes = record(b"vrsn", &text("1.0"));
        bytes.extend(record(b"otrk", &record(b"ptrk", &text("/x.flac"))));
        bytes.extend(record(b"xxxx", &[1, 2, 3, 4]));

        let first: CrateRecord = decode(&bytes).unwrap();
        let second: CrateRecord = decode(&bytes).unwrap();

        assert_eq!(first, second);
    }
}
