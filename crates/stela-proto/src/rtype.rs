//! DNS record types.
//!
//! [`RecordType`] is a closed enumeration over the types this server knows
//! how to encode, with an [`RecordType::Unknown`] fallback that carries the
//! original text so unrecognized types round-trip instead of being
//! silently miscast. Unknown values still match queries (via ANY) and
//! encode their value as raw bytes.

use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A resource record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 host address (RFC 1035)
    A,
    /// Authoritative name server (RFC 1035)
    Ns,
    /// Canonical name alias (RFC 1035)
    Cname,
    /// Start of authority (RFC 1035)
    Soa,
    /// Domain name pointer, reverse lookups (RFC 1035)
    Ptr,
    /// Host information (RFC 1035)
    Hinfo,
    /// Mail exchange (RFC 1035)
    Mx,
    /// Text record (RFC 1035)
    Txt,
    /// IPv6 host address (RFC 3596)
    Aaaa,
    /// Anything else, carrying the original type text verbatim.
    Unknown(CompactString),
}

impl RecordType {
    /// Parses a type mnemonic, case-insensitively.
    ///
    /// Never fails: unrecognized text becomes [`RecordType::Unknown`] with
    /// the raw string preserved.
    pub fn parse(text: &str) -> Self {
        match text.to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "NS" => Self::Ns,
            "CNAME" => Self::Cname,
            "SOA" => Self::Soa,
            "PTR" => Self::Ptr,
            "HINFO" => Self::Hinfo,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "AAAA" => Self::Aaaa,
            _ => Self::Unknown(CompactString::from(text)),
        }
    }

    /// Maps a wire QTYPE to the type used for store lookup.
    ///
    /// Only the codes this server serves by type are mapped; every other
    /// value falls back to A-type handling. QTYPE 255 (ANY) is a lookup
    /// strategy, not a record type, and is special-cased by the responder
    /// before this mapping applies.
    pub fn from_qtype(qtype: u16) -> Self {
        match qtype {
            2 => Self::Ns,
            5 => Self::Cname,
            6 => Self::Soa,
            12 => Self::Ptr,
            15 => Self::Mx,
            16 => Self::Txt,
            _ => Self::A,
        }
    }

    /// Returns the wire TYPE code emitted in answers.
    ///
    /// Unknown types emit their numeric suffix when the text has the
    /// RFC 3597 `TYPE<n>` shape, otherwise 0.
    pub fn wire_code(&self) -> u16 {
        match self {
            Self::A => 1,
            Self::Ns => 2,
            Self::Cname => 5,
            Self::Soa => 6,
            Self::Ptr => 12,
            Self::Hinfo => 13,
            Self::Mx => 15,
            Self::Txt => 16,
            Self::Aaaa => 28,
            Self::Unknown(text) => text
                .strip_prefix("TYPE")
                .or_else(|| text.strip_prefix("type"))
                .and_then(|digits| digits.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Returns the type mnemonic (or the raw text for unknown types).
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Ns => "NS",
            Self::Cname => "CNAME",
            Self::Soa => "SOA",
            Self::Ptr => "PTR",
            Self::Hinfo => "HINFO",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Aaaa => "AAAA",
            Self::Unknown(text) => text,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RecordType {
    #[inline]
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = CompactString::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}
