//! Byte-exact builders for test inputs

/// `[tag][len: u32 BE][payload]`
pub fn record(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(8 + payload.len());
    buffer.extend_from_slice(tag);
    buffer.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buffer.extend_from_slice(payload);
    buffer
}

/// UTF-16BE text payload
pub fn text(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|c| c.to_be_bytes()).collect()
}

/// A complete `database V2` image
pub fn database_file(version: &str, paths: &[&str]) -> Vec<u8> {
    let mut buffer = record(b"vrsn", &text(version));
    for path in paths {
        let mut track = record(b"ttyp", &text("mp3"));
        track.extend(record(b"pfil", &text(path)));
        buffer.extend(record(b"otrk", &track));
    }
    buffer
}

/// A complete `.crate` image
pub fn crate_file(version: &str, paths: &[&str]) -> Vec<u8> {
    let mut buffer = record(b"vrsn", &text(version));
    buffer.extend(record(b"osrt", &record(b"tvcn", &text("song"))));
    for path in paths {
        buffer.extend(record(b"otrk", &record(b"ptrk", &text(path))));
    }
    buffer
}
