//! Per-field text decoding with an encoding fallback chain.
//!
//! Fields arrive from the reader as raw bytes. Each field is decoded with
//! the first encoding in [`DECODING_CHAIN`] that accepts it without
//! replacement; when every chain entry rejects the bytes, the field is
//! decoded as UTF-8 with replacement characters instead. Decoding therefore
//! never fails a row.

use encoding_rs::{Encoding, ISO_8859_15_INIT, UTF_8, UTF_8_INIT, WINDOWS_1252_INIT};
use std::borrow::Cow;

/// Encodings tried in order for each field. UTF-8 first; windows-1252 covers
/// most legacy western exports; ISO-8859-15 accepts every byte value and so
/// terminates the chain for single-byte content.
pub static DECODING_CHAIN: &[&Encoding] = &[&UTF_8_INIT, &WINDOWS_1252_INIT, &ISO_8859_15_INIT];

/// Decode one field through the fallback chain.
///
/// Borrows when the bytes are valid for the first matching encoding without
/// remapping (the common ASCII/UTF-8 case), allocates otherwise.
pub fn decode_field(bytes: &[u8]) -> Cow<'_, str> {
    for encoding in DECODING_CHAIN {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            return text;
        }
    }
    // Last resort: forced replacement of invalid sequences
    let (text, _, _) = UTF_8.decode(bytes);
    text
}
