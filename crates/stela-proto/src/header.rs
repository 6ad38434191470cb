//! DNS message header.
//!
//! The fixed 12-byte structure at the start of every message. Unlike
//! stricter codecs, parsing here never rejects a header: OPCODE and RCODE
//! are carried as raw 4-bit values because responses must echo the query's
//! opcode verbatim, whatever it is.

use crate::HEADER_SIZE;
use crate::error::{Error, Result};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// DNS header flags (the single-bit fields of bytes 2 and 3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct HeaderFlags: u16 {
        /// Query/Response flag: 0 = query, 1 = response
        const QR = 0x8000;

        /// Authoritative Answer
        const AA = 0x0400;

        /// Truncation: message was cut to fit the transport
        const TC = 0x0200;

        /// Recursion Desired
        const RD = 0x0100;

        /// Recursion Available
        const RA = 0x0080;

        /// Reserved bits (must be zero)
        const Z = 0x0070;
    }
}

impl Default for HeaderFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// DNS message header.
///
/// # Wire Format
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|    Z   |   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    QDCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ANCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    NSCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                    ARCOUNT                    |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Message identifier for matching requests to responses.
    pub id: u16,

    /// Single-bit flags.
    pub flags: HeaderFlags,

    /// Operation code, raw 4-bit value.
    pub opcode: u8,

    /// Response code, raw 4-bit value.
    pub rcode: u8,

    /// Number of questions.
    pub qd_count: u16,

    /// Number of answer records.
    pub an_count: u16,

    /// Number of authority records.
    pub ns_count: u16,

    /// Number of additional records.
    pub ar_count: u16,
}

impl Header {
    /// Creates a new header with the given message ID.
    #[inline]
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::empty(),
            opcode: 0,
            rcode: 0,
            qd_count: 0,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Creates a query header carrying a single question.
    #[inline]
    pub const fn query(id: u16) -> Self {
        let mut header = Self::new(id);
        header.qd_count = 1;
        header
    }

    /// Creates the response header for a decoded query.
    ///
    /// ID and OPCODE come from the query; QR is set; every other flag is
    /// cleared (AA deliberately stays unset, and RD is not echoed). The
    /// caller fills in RCODE and ANCOUNT. QDCOUNT is 1 for the single
    /// echoed question; no authority or additional records are ever
    /// emitted, so those counts are zero.
    pub fn response_to(query: &Header) -> Self {
        Self {
            id: query.id,
            flags: HeaderFlags::QR,
            opcode: query.opcode,
            rcode: 0,
            qd_count: 1,
            an_count: 0,
            ns_count: 0,
            ar_count: 0,
        }
    }

    /// Returns true if this is a query.
    #[inline]
    pub fn is_query(&self) -> bool {
        !self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if this is a response.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(HeaderFlags::QR)
    }

    /// Returns true if the message was truncated.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(HeaderFlags::TC)
    }

    /// Returns true if recursion was requested.
    #[inline]
    pub fn recursion_desired(&self) -> bool {
        self.flags.contains(HeaderFlags::RD)
    }

    /// Parses a header from the first 12 bytes of a message.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::buffer_too_short(HEADER_SIZE, data.len()));
        }

        let id = u16::from_be_bytes([data[0], data[1]]);
        let flags_raw = u16::from_be_bytes([data[2], data[3]]);

        let opcode = ((flags_raw >> 11) & 0x0F) as u8;
        let rcode = (flags_raw & 0x0F) as u8;
        let flags = HeaderFlags::from_bits_truncate(flags_raw);

        Ok(Self {
            id,
            flags,
            opcode,
            rcode,
            qd_count: u16::from_be_bytes([data[4], data[5]]),
            an_count: u16::from_be_bytes([data[6], data[7]]),
            ns_count: u16::from_be_bytes([data[8], data[9]]),
            ar_count: u16::from_be_bytes([data[10], data[11]]),
        })
    }

    /// Returns the combined flags/opcode/rcode word (bytes 2-3).
    #[inline]
    pub fn flags_word(&self) -> u16 {
        self.flags.bits() | (u16::from(self.opcode & 0x0F) << 11) | u16::from(self.rcode & 0x0F)
    }

    /// Serializes the header to wire format.
    pub fn to_wire(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];

        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2..4].copy_from_slice(&self.flags_word().to_be_bytes());
        buf[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.ar_count.to_be_bytes());

        buf
    }

    /// Writes the header to a wire writer.
    pub fn write_to(&self, writer: &mut crate::wire::WireWriter) {
        writer.write_bytes(&self.to_wire());
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(0)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID:{:04X} {} opcode:{} rcode:{}",
            self.id,
            if self.is_query() { "query" } else { "response" },
            self.opcode,
            self.rcode
        )?;

        if self.is_truncated() {
            write!(f, " TC")?;
        }
        if self.recursion_desired() {
            write!(f, " RD")?;
        }

        write!(
            f,
            " QD:{} AN:{} NS:{} AR:{}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}
