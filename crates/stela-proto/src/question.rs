//! DNS question section.
//!
//! A question is a QNAME/QTYPE/QCLASS triple starting at byte offset 12 of
//! every message. QTYPE and QCLASS are carried as raw u16s: the responder
//! interprets QTYPE through [`RecordType::from_qtype`] at lookup time and
//! echoes the question bytes verbatim, so nothing is lost on values it
//! does not recognize.
//!
//! [`RecordType::from_qtype`]: crate::rtype::RecordType::from_qtype

use crate::error::Result;
use crate::name::Name;
use crate::wire::{WireReader, WireWriter};
use crate::{CLASS_IN, QTYPE_ANY};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A question from the question section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The name being queried.
    pub qname: Name,
    /// Query type, raw wire value.
    pub qtype: u16,
    /// Query class, raw wire value.
    pub qclass: u16,
}

impl Question {
    /// Creates a question with class IN.
    #[inline]
    pub const fn new(qname: Name, qtype: u16) -> Self {
        Self {
            qname,
            qtype,
            qclass: CLASS_IN,
        }
    }

    /// Creates an A question for a textual name.
    pub fn a(name: &str) -> Result<Self> {
        Ok(Self::new(Name::from_str(name)?, 1))
    }

    /// Creates an MX question for a textual name.
    pub fn mx(name: &str) -> Result<Self> {
        Ok(Self::new(Name::from_str(name)?, 15))
    }

    /// Creates a TXT question for a textual name.
    pub fn txt(name: &str) -> Result<Self> {
        Ok(Self::new(Name::from_str(name)?, 16))
    }

    /// Creates a PTR question for a textual name.
    pub fn ptr(name: &str) -> Result<Self> {
        Ok(Self::new(Name::from_str(name)?, 12))
    }

    /// Creates an ANY question for a textual name.
    pub fn any(name: &str) -> Result<Self> {
        Ok(Self::new(Name::from_str(name)?, QTYPE_ANY))
    }

    /// Parses a question starting at `offset`.
    ///
    /// Returns the question and the offset of the first byte after its
    /// span, which the responder uses to echo the question bytes verbatim.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let mut reader = WireReader::new_at(data, offset);

        let qname = reader.read_name()?;
        let qtype = reader.read_u16()?;
        let qclass = reader.read_u16()?;

        Ok((
            Self {
                qname,
                qtype,
                qclass,
            },
            reader.position(),
        ))
    }

    /// Writes the question in wire format (name uncompressed).
    pub fn write_to(&self, writer: &mut WireWriter) {
        self.qname.write_to(writer);
        writer.write_u16(self.qtype);
        writer.write_u16(self.qclass);
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} class{}",
            self.qname,
            qtype_str(self.qtype),
            self.qclass
        )
    }
}

/// Returns a readable mnemonic for a wire QTYPE, for logs and display.
pub fn qtype_str(qtype: u16) -> Cow<'static, str> {
    match qtype {
        1 => Cow::Borrowed("A"),
        2 => Cow::Borrowed("NS"),
        5 => Cow::Borrowed("CNAME"),
        6 => Cow::Borrowed("SOA"),
        12 => Cow::Borrowed("PTR"),
        13 => Cow::Borrowed("HINFO"),
        15 => Cow::Borrowed("MX"),
        16 => Cow::Borrowed("TXT"),
        28 => Cow::Borrowed("AAAA"),
        255 => Cow::Borrowed("ANY"),
        other => Cow::Owned(format!("TYPE{other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_question() {
        // 12 zero bytes of header, then example.com A IN
        let mut data = vec![0u8; 12];
        data.extend_from_slice(&[
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0,
        ]);
        data.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

        let (question, next) = Question::parse(&data, 12).unwrap();
        assert_eq!(question.qname, "example.com");
        assert_eq!(question.qtype, 1);
        assert_eq!(question.qclass, 1);
        assert_eq!(next, data.len());
    }

    #[test]
    fn test_parse_question_folds_case() {
        let mut data = vec![0u8; 12];
        data.extend_from_slice(&[4, b'T', b'e', b'S', b't', 0, 0x00, 0xFF, 0x00, 0x01]);

        let (question, _) = Question::parse(&data, 12).unwrap();
        assert_eq!(question.qname.as_bytes(), b"test");
        assert_eq!(question.qtype, QTYPE_ANY);
    }

    #[test]
    fn test_parse_question_truncated() {
        // Name terminates but the qtype/qclass fields are cut off
        let mut data = vec![0u8; 12];
        data.extend_from_slice(&[3, b'c', b'o', b'm', 0, 0x00]);

        assert!(matches!(
            Question::parse(&data, 12),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_question_roundtrip() {
        let question = Question::a("www.example.com").unwrap();

        let mut writer = WireWriter::new();
        question.write_to(&mut writer);

        let (parsed, next) = Question::parse(writer.as_bytes(), 0).unwrap();
        assert_eq!(parsed, question);
        assert_eq!(next, writer.len());
    }

    #[test]
    fn test_question_constructors() {
        assert_eq!(Question::a("example.com").unwrap().qtype, 1);
        assert_eq!(Question::mx("example.com").unwrap().qtype, 15);
        assert_eq!(Question::txt("example.com").unwrap().qtype, 16);
        assert_eq!(Question::ptr("1.2.0.192.in-addr.arpa").unwrap().qtype, 12);
        assert_eq!(Question::any("example.com").unwrap().qtype, 255);

        assert!(Question::a("bad..name").is_err());
    }

    #[test]
    fn test_question_display() {
        let question = Question::any("example.com").unwrap();
        assert_eq!(question.to_string(), "example.com ANY class1");

        let question = Question::new(Name::from_str("x.org").unwrap(), 731);
        assert_eq!(question.to_string(), "x.org TYPE731 class1");
    }
}
