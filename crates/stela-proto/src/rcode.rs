//! DNS response codes (RCODEs).
//!
//! RFC 1035 Section 4.1.1. This server only ever puts NOERROR and NXDOMAIN
//! on the wire; the remaining base codes are carried for diagnostics and
//! log readability.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// DNS response code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum ResponseCode {
    /// No error condition
    NoError = 0,

    /// Format error: the server could not interpret the query
    FormErr = 1,

    /// Server failure
    ServFail = 2,

    /// Name error: the queried name does not exist in this server's data
    NXDomain = 3,

    /// Not implemented
    NotImp = 4,

    /// Query refused
    Refused = 5,
}

impl ResponseCode {
    /// Returns the 4-bit value for the header RCODE field.
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Creates a response code from its 4-bit header value.
    #[inline]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value & 0x0F).ok()
    }

    /// Returns true if this response indicates success.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Returns the human-readable name of the response code.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
        }
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for ResponseCode {
    fn default() -> Self {
        Self::NoError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rcode_values() {
        assert_eq!(ResponseCode::NoError.to_u8(), 0);
        assert_eq!(ResponseCode::NXDomain.to_u8(), 3);
        assert_eq!(ResponseCode::Refused.to_u8(), 5);
    }

    #[test]
    fn test_rcode_from_u8() {
        assert_eq!(ResponseCode::from_u8(0), Some(ResponseCode::NoError));
        assert_eq!(ResponseCode::from_u8(3), Some(ResponseCode::NXDomain));
        assert_eq!(ResponseCode::from_u8(12), None);
    }

    #[test]
    fn test_rcode_display() {
        assert_eq!(ResponseCode::NoError.to_string(), "NOERROR");
        assert_eq!(ResponseCode::NXDomain.to_string(), "NXDOMAIN");
        assert!(ResponseCode::NoError.is_success());
        assert!(!ResponseCode::NXDomain.is_success());
    }
}
