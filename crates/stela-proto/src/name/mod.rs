//! Domain names.
//!
//! [`Name`] holds a domain name in canonical form: the ASCII-lowercased,
//! dot-separated label bytes with no trailing dot (the root name is the
//! empty byte sequence). Canonicalizing at construction makes equality,
//! hashing, and record-store lookups case-insensitive for free, and gives
//! the round-trip guarantee that decoding an encoded name yields the
//! lowercased original.
//!
//! Labels are length-limited (63 bytes each, 255 bytes total in wire form)
//! but otherwise uninterpreted: any byte other than the `.` separator is
//! legal inside a label. Record values routinely carry names that would
//! fail hostname syntax, and the wire can carry arbitrary octets.

mod parse;

use crate::error::{Error, Result};
use crate::wire::WireWriter;
use crate::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// A domain name in canonical (lowercased, dotted) form.
///
/// # Examples
///
/// ```rust,ignore
/// use stela_proto::Name;
/// use std::str::FromStr;
///
/// let name = Name::from_str("WWW.Example.COM.")?;
/// assert_eq!(name.to_string(), "www.example.com");
/// assert_eq!(name.label_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    /// Lowercased label bytes joined by `.`; empty for the root.
    bytes: SmallVec<[u8; 64]>,
}

impl Name {
    /// Returns the root name.
    #[inline]
    pub fn root() -> Self {
        Self { bytes: SmallVec::new() }
    }

    /// Returns true if this is the root name.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the canonical dotted bytes (no trailing dot, lowercased).
    ///
    /// This is the form the record store keys on.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of labels (zero for the root).
    pub fn label_count(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.bytes.iter().filter(|&&b| b == b'.').count() + 1
        }
    }

    /// Returns the encoded length of this name in wire format.
    #[inline]
    pub fn wire_len(&self) -> usize {
        if self.is_root() {
            1
        } else {
            // One length byte per label replaces each dot and prefixes the
            // first label; plus the terminating root byte.
            self.bytes.len() + 2
        }
    }

    /// Iterates over the label byte slices.
    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        let bytes: &[u8] = &self.bytes;
        bytes
            .split(|&b| b == b'.')
            .filter(|label| !label.is_empty())
    }

    /// Parses a name from wire format, resolving compression pointers.
    ///
    /// Returns the name and the offset of the first byte after the name's
    /// span at `offset` (after the terminating zero label, or after the
    /// first compression pointer if the name uses one).
    #[inline]
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        parse::parse_at(message, offset)
    }

    /// Writes the name in uncompressed wire format.
    pub fn write_to(&self, writer: &mut WireWriter) {
        for label in self.labels() {
            // labels are <= 63 bytes by construction
            writer.write_u8(label.len() as u8);
            writer.write_bytes(label);
        }
        writer.write_u8(0);
    }

    /// Builds a name from pre-validated canonical bytes.
    pub(crate) fn from_canonical(bytes: SmallVec<[u8; 64]>) -> Self {
        Self { bytes }
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses from text, folding ASCII uppercase and stripping one
    /// trailing dot. `""` and `"."` both give the root. Validation is
    /// structural only: empty labels and length limits are rejected, any
    /// other byte is accepted.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let text = s.strip_suffix('.').unwrap_or(s);
        let mut bytes = SmallVec::<[u8; 64]>::new();
        let mut wire_len = 1usize;
        let mut position = 0usize;

        for label in text.split('.') {
            if label.is_empty() {
                return Err(Error::EmptyLabel { position });
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(Error::label_too_long(label.len()));
            }

            wire_len += 1 + label.len();
            if wire_len > MAX_NAME_LENGTH {
                return Err(Error::name_too_long(wire_len));
            }

            if !bytes.is_empty() {
                bytes.push(b'.');
            }
            bytes.extend(label.bytes().map(|b| b.to_ascii_lowercase()));
            position += label.len() + 1;
        }

        Ok(Self { bytes })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            fmt::Display::fmt(&String::from_utf8_lossy(&self.bytes), f)
        }
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        let other = other.strip_suffix('.').unwrap_or(other);
        self.bytes.len() == other.len()
            && self
                .bytes
                .iter()
                .zip(other.bytes())
                .all(|(a, b)| *a == b.to_ascii_lowercase())
    }
}

impl PartialEq<&str> for Name {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_str(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_lowercases() {
        let name = Name::from_str("WWW.Example.COM").unwrap();
        assert_eq!(name.as_bytes(), b"www.example.com");
        assert_eq!(name.to_string(), "www.example.com");
        assert_eq!(name.label_count(), 3);
    }

    #[test]
    fn test_from_str_trailing_dot() {
        let with_dot = Name::from_str("example.com.").unwrap();
        let without = Name::from_str("example.com").unwrap();
        assert_eq!(with_dot, without);
    }

    #[test]
    fn test_from_str_root() {
        assert!(Name::from_str(".").unwrap().is_root());
        assert!(Name::from_str("").unwrap().is_root());
        assert_eq!(Name::root().to_string(), ".");
        assert_eq!(Name::root().label_count(), 0);
        assert_eq!(Name::root().wire_len(), 1);
    }

    #[test]
    fn test_from_str_empty_label() {
        assert!(matches!(
            Name::from_str("a..b"),
            Err(Error::EmptyLabel { .. })
        ));
        assert!(matches!(
            Name::from_str(".example.com"),
            Err(Error::EmptyLabel { .. })
        ));
    }

    #[test]
    fn test_from_str_label_too_long() {
        let long = "a".repeat(64);
        assert!(matches!(
            Name::from_str(&long),
            Err(Error::LabelTooLong { length: 64 })
        ));

        let max = "a".repeat(63);
        assert!(Name::from_str(&max).is_ok());
    }

    #[test]
    fn test_from_str_name_too_long() {
        // Four 63-byte labels encode to 257 wire bytes
        let label = "a".repeat(63);
        let name = format!("{label}.{label}.{label}.{label}");
        assert!(matches!(
            Name::from_str(&name),
            Err(Error::NameTooLong { .. })
        ));
    }

    #[test]
    fn test_from_str_unusual_bytes() {
        // Record values carry names that are not hostnames; only the
        // separator is structural.
        let name = Name::from_str("abc mail.example.com").unwrap();
        assert_eq!(name.as_bytes(), b"abc mail.example.com");
        assert_eq!(name.label_count(), 3);
    }

    #[test]
    fn test_write_to_wire() {
        let name = Name::from_str("example.com").unwrap();
        let mut writer = WireWriter::new();
        name.write_to(&mut writer);

        assert_eq!(
            writer.as_bytes(),
            &[7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0]
        );
        assert_eq!(name.wire_len(), 13);
    }

    #[test]
    fn test_write_root() {
        let mut writer = WireWriter::new();
        Name::root().write_to(&mut writer);
        assert_eq!(writer.as_bytes(), &[0]);
    }

    #[test]
    fn test_roundtrip_lowercases() {
        let name = Name::from_str("MiXeD.CaSe.ORG").unwrap();
        let mut writer = WireWriter::new();
        name.write_to(&mut writer);

        let (parsed, next) = Name::parse(writer.as_bytes(), 0).unwrap();
        assert_eq!(parsed, name);
        assert_eq!(parsed.as_bytes(), b"mixed.case.org");
        assert_eq!(next, writer.len());
    }

    #[test]
    fn test_eq_str() {
        let name = Name::from_str("example.com").unwrap();
        assert_eq!(name, "example.com");
        assert_eq!(name, "EXAMPLE.COM");
        assert_eq!(name, "example.com.");
        assert_ne!(name, "example.org");
        assert_ne!(name, "www.example.com");
    }

    #[test]
    fn test_hash_is_case_insensitive_via_fold() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Name::from_str("Example.COM").unwrap());
        assert!(set.contains(&Name::from_str("example.com").unwrap()));
    }
}
