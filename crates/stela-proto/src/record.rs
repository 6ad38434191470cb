//! Resource records and answer encoding.
//!
//! Records are text-valued: the store keeps `(owner, type, value)` triples
//! and the value's interpretation is deferred until an answer is encoded.
//! Values that fail to parse recover locally (a default MX preference, a
//! zero A address, raw bytes for anything name-shaped that is not a valid
//! name); encoding an answer never fails.
//!
//! # Wire Format
//!
//! Every answer starts with a compression pointer to the question name at
//! offset 12, the only compression this encoder produces:
//!
//! ```text
//! +--------+--------+--------+--------+--------+--------+
//! | 0xC00C (owner)  |  TYPE  |  CLASS (IN)  |    TTL    |
//! +--------+--------+--------+--------+-----------------+
//! | RDLENGTH        |  RDATA (per-type layout)  ...     |
//! +--------+--------+-----------------------------------+
//! ```

use crate::name::Name;
use crate::rtype::RecordType;
use crate::wire::WireWriter;
use crate::{CLASS_IN, RECORD_TTL};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Compression pointer to the question name at offset 12, used as the
/// owner of every answer.
pub const ANSWER_OWNER_POINTER: u16 = 0xC00C;

/// Default MX preference when the value carries none.
const DEFAULT_MX_PREFERENCE: u16 = 10;

/// Longest text chunk a TXT record can carry.
const MAX_TXT_LENGTH: usize = 255;

/// A resource record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Owner name, canonical lowercase.
    pub owner: CompactString,
    /// Record type.
    pub rtype: RecordType,
    /// Free-text value, interpreted per type at encoding time.
    pub value: CompactString,
}

impl Record {
    /// Creates a record.
    pub fn new(
        owner: impl Into<CompactString>,
        rtype: RecordType,
        value: impl Into<CompactString>,
    ) -> Self {
        Self {
            owner: owner.into(),
            rtype,
            value: value.into(),
        }
    }

    /// Appends this record as a complete answer RR.
    ///
    /// RDLENGTH is backpatched once the RDATA is written, so per-type
    /// encoders never compute their own length.
    pub fn write_answer(&self, writer: &mut WireWriter, soa: &SoaDefaults) {
        writer.write_u16(ANSWER_OWNER_POINTER);
        writer.write_u16(self.rtype.wire_code());
        writer.write_u16(CLASS_IN);
        writer.write_u32(RECORD_TTL);

        let len_pos = writer.len();
        writer.write_u16(0);
        let rdata_start = writer.len();

        self.write_rdata(writer, soa);

        let rdlength = writer.len() - rdata_start;
        writer.patch_u16(len_pos, rdlength as u16);
    }

    fn write_rdata(&self, writer: &mut WireWriter, soa: &SoaDefaults) {
        match &self.rtype {
            RecordType::A => write_a(writer, &self.value),
            RecordType::Ns | RecordType::Cname | RecordType::Ptr => {
                write_name_text(writer, &self.value);
            }
            RecordType::Mx => write_mx(writer, &self.value),
            RecordType::Txt => write_txt(writer, &self.value),
            RecordType::Soa => soa.write_rdata(writer),
            // AAAA, HINFO, and unknown types carry the value verbatim
            RecordType::Aaaa | RecordType::Hinfo | RecordType::Unknown(_) => {
                writer.write_bytes(self.value.as_bytes());
            }
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.owner, self.rtype, self.value)
    }
}

/// SOA field values.
///
/// These are not parsed from the record's text value: every SOA answer is
/// emitted from a defaults struct, whose `Default` carries the fixed
/// values this server has always served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaDefaults {
    /// Primary name server (MNAME).
    pub primary_ns: CompactString,
    /// Responsible mailbox (RNAME).
    pub mailbox: CompactString,
    /// Zone serial number.
    pub serial: u32,
    /// Secondary refresh interval, seconds.
    pub refresh: u32,
    /// Failed-refresh retry interval, seconds.
    pub retry: u32,
    /// Zone expiry, seconds.
    pub expire: u32,
    /// Negative-caching TTL, seconds.
    pub minimum: u32,
}

impl SoaDefaults {
    fn write_rdata(&self, writer: &mut WireWriter) {
        write_name_text(writer, &self.primary_ns);
        write_name_text(writer, &self.mailbox);
        writer.write_u32(self.serial);
        writer.write_u32(self.refresh);
        writer.write_u32(self.retry);
        writer.write_u32(self.expire);
        writer.write_u32(self.minimum);
    }
}

impl Default for SoaDefaults {
    fn default() -> Self {
        Self {
            primary_ns: CompactString::const_new("ns1.example.com"),
            mailbox: CompactString::const_new("admin.example.com"),
            serial: 2_023_091_401,
            refresh: 3600,
            retry: 900,
            expire: 1_209_600,
            minimum: 300,
        }
    }
}

fn write_a(writer: &mut WireWriter, value: &str) {
    // An unparsable address becomes 0.0.0.0 rather than garbage
    let addr = Ipv4Addr::from_str(value).unwrap_or(Ipv4Addr::UNSPECIFIED);
    writer.write_bytes(&addr.octets());
}

fn write_name_text(writer: &mut WireWriter, value: &str) {
    match Name::from_str(value) {
        Ok(name) => name.write_to(writer),
        // Structurally invalid names fall back to the raw bytes
        Err(_) => writer.write_bytes(value.as_bytes()),
    }
}

fn write_mx(writer: &mut WireWriter, value: &str) {
    // Value is "<preference> <exchange>"; a missing or unparsable
    // preference defaults to 10 with the whole text as the exchange
    let (preference, exchange) = match value.split_once(' ') {
        Some((prefix, suffix)) => match prefix.parse::<u16>() {
            Ok(preference) => (preference, suffix),
            Err(_) => (DEFAULT_MX_PREFERENCE, value),
        },
        None => (DEFAULT_MX_PREFERENCE, value),
    };

    writer.write_u16(preference);
    write_name_text(writer, exchange);
}

fn write_txt(writer: &mut WireWriter, value: &str) {
    let text = value.as_bytes();
    let text = &text[..text.len().min(MAX_TXT_LENGTH)];

    writer.write_u8(text.len() as u8);
    writer.write_bytes(text);
}
