//! # Stela DNS Protocol Library
//!
//! Wire format codec for an authoritative DNS responder: bounds-checked
//! message reading, compression-aware domain name decoding, and answer
//! encoding for text-valued resource records (RFC 1035).
//!
//! ## Design
//!
//! - **Explicit failure** on every read: truncated packets and bad
//!   compression pointers surface as [`Error`] values, never panics.
//! - **Canonical names**: [`Name`] holds the lowercased form, so store
//!   lookups and equality are case-insensitive by construction.
//! - **Text-valued records**: record data is free text interpreted at
//!   encoding time; unrecognized record types round-trip as raw bytes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stela_proto::{Header, Question, Name, RecordType};
//!
//! // Decode the question of a query packet
//! let header = Header::parse(packet)?;
//! let (question, end) = Question::parse(packet, stela_proto::HEADER_SIZE)?;
//!
//! // Build a query for tests and tools
//! let mut writer = stela_proto::wire::WireWriter::new();
//! Question::a("example.com")?.write_to(&mut writer);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod header;
pub mod name;
pub mod question;
pub mod rcode;
pub mod record;
pub mod rtype;
pub mod wire;

// Re-exports for convenience
pub use error::{Error, Result};
pub use header::{Header, HeaderFlags};
pub use name::Name;
pub use question::Question;
pub use rcode::ResponseCode;
pub use record::{Record, SoaDefaults};
pub use rtype::RecordType;

/// Maximum length of a DNS label (63 bytes per RFC 1035)
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a domain name in wire form (255 bytes per RFC 1035)
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum size of a UDP DNS message without EDNS0 (512 bytes per RFC 1035)
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

/// Size of the fixed DNS message header (12 bytes)
pub const HEADER_SIZE: usize = 12;

/// Offset of the question section in every DNS message
pub const QUESTION_OFFSET: usize = HEADER_SIZE;

/// Fixed TTL applied to every answer (seconds); the data model carries no
/// per-record TTL
pub const RECORD_TTL: u32 = 300;

/// QTYPE wildcard requesting all records for a name (ANY)
pub const QTYPE_ANY: u16 = 255;

/// The only record class this server consumes or emits (IN)
pub const CLASS_IN: u16 = 1;
