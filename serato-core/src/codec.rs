//! Leaf decoders for record payloads
//!
//! - Text: UTF-16BE without BOM, decoded strictly into a UTF-8 `String`
//! - Objects: a payload holding a nested record stream
//! - Repeated fields: decode an object and append it, never overwrite

use std::io::Cursor;

use crate::error::{Error, Result};
use crate::record::decode_record;
use crate::schema::Record;

/// Decode a UTF-16BE text payload.
///
/// Decoding is strict: an odd byte count or an unpaired surrogate is
/// reported as [`Error::MalformedText`] rather than replaced.
pub fn decode_text(payload: &[u8]) -> Result<String> {
    if payload.len() % 2 != 0 {
        return Err(Error::MalformedText(format!(
            "UTF-16 payload has odd length {}",
            payload.len()
        )));
    }

    let units = payload
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| {
            Error::MalformedText(format!(
                "unpaired surrogate 0x{:04x} in UTF-16 payload",
                e.unpaired_surrogate()
            ))
        })
}

/// Decode a payload as a nested record of type `U`.
pub fn decode_object<U: Record>(payload: &[u8]) -> Result<U> {
    decode_record(&mut Cursor::new(payload), payload.len() as u64)
}

/// Decode a nested record and append it to `items`.
///
/// `W` is the element type stored by the enclosing record, e.g. `U` itself or
/// an `Arc<U>` when the decoded value is going to be shared.
pub fn append_repeated<U, W>(items: &mut Vec<W>, payload: &[u8]) -> Result<()>
where
    U: Record,
    W: From<U>,
{
    let item = decode_object::<U>(payload)?;
    items.push(W::from(item));
    Ok(())
}
