//! Domain name parsing from wire format with compression support.
//!
//! Handles RFC 1035 Section 4.1.4 name compression: a length byte with the
//! top two bits set introduces a 14-bit absolute offset into the same
//! message where the name continues. A pointer terminates the name at its
//! own nesting level, so the caller's cursor resumes right after it.
//!
//! Two guards make hostile pointer chains a clean decode failure instead
//! of a hang: targets must point strictly backward, and the total number
//! of pointer follows is capped.

use super::Name;
use crate::MAX_NAME_LENGTH;
use crate::error::{Error, Result};
use smallvec::SmallVec;

/// Maximum number of compression pointer jumps per name.
const MAX_COMPRESSION_JUMPS: usize = 128;

/// Parses a domain name starting at `offset` into canonical form.
///
/// Returns the name and the absolute offset of the first byte after the
/// name's span at `offset` (not following pointers).
pub(crate) fn parse_at(message: &[u8], offset: usize) -> Result<(Name, usize)> {
    let mut bytes = SmallVec::<[u8; 64]>::new();
    let mut wire_len = 1usize;
    let mut pos = offset;
    let mut next = offset;
    let mut jumps = 0usize;
    let mut followed_pointer = false;

    loop {
        if pos >= message.len() {
            return Err(Error::unexpected_eof(pos));
        }

        let len_byte = message[pos];

        // Compression pointer: top two bits set
        if len_byte >= 0xC0 {
            if pos + 1 >= message.len() {
                return Err(Error::unexpected_eof(pos + 1));
            }

            let target = usize::from(u16::from_be_bytes([len_byte & 0x3F, message[pos + 1]]));

            // Forward or self references cannot occur in well-formed
            // compression and would admit loops
            if target >= pos {
                return Err(Error::invalid_pointer(pos, target));
            }

            if !followed_pointer {
                next = pos + 2;
                followed_pointer = true;
            }

            jumps += 1;
            if jumps > MAX_COMPRESSION_JUMPS {
                return Err(Error::TooManyCompressionJumps {
                    max_jumps: MAX_COMPRESSION_JUMPS,
                });
            }

            pos = target;
            continue;
        }

        // Reserved label types (top bits 01 or 10)
        if len_byte >= 0x40 {
            return Err(Error::invalid_data(
                pos,
                format!("invalid label type 0x{len_byte:02X}"),
            ));
        }

        let len = len_byte as usize;

        // Root label terminates the name
        if len == 0 {
            if !followed_pointer {
                next = pos + 1;
            }
            break;
        }

        if pos + 1 + len > message.len() {
            return Err(Error::unexpected_eof(pos + 1 + len));
        }

        wire_len += 1 + len;
        if wire_len > MAX_NAME_LENGTH {
            return Err(Error::name_too_long(wire_len));
        }

        if !bytes.is_empty() {
            bytes.push(b'.');
        }
        bytes.extend(
            message[pos + 1..pos + 1 + len]
                .iter()
                .map(|b| b.to_ascii_lowercase()),
        );

        pos += 1 + len;
    }

    Ok((Name::from_canonical(bytes), next))
}
