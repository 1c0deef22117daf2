//! UTF-8 decoding across byte-chunk boundaries.

use std::str;

/// Result of decoding one byte chunk.
#[derive(Debug, PartialEq, Eq)]
pub enum Decoded {
    /// Valid text, and the bytes of a character cut off at the end.
    Text { text: String, carry: Vec<u8> },
    /// Invalid UTF-8 at this byte index of the decoded buffer.
    Invalid { at: usize },
}

/// Decodes `pending` followed by `bytes`.
///
/// A multi-byte character cut by the chunk boundary is carried, not
/// rejected, unless this is the last chunk.
pub fn decode(pending: &[u8], bytes: &[u8], is_final: bool) -> Decoded {
    let mut buf = Vec::with_capacity(pending.len() + bytes.len());
    buf.extend_from_slice(pending);
    buf.extend_from_slice(bytes);

    let valid = match str::from_utf8(&buf) {
        Ok(_) => buf.len(),
        Err(e) if e.error_len().is_none() && !is_final => e.valid_up_to(),
        Err(e) => return Decoded::Invalid { at: e.valid_up_to() },
    };
    let carry = buf.split_off(valid);

    match String::from_utf8(buf) {
        Ok(text) => Decoded::Text { text, carry },
        Err(e) => Decoded::Invalid {
            at: e.utf8_error().valid_up_to(),
        },
    }
}
