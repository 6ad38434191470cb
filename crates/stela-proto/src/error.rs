//! DNS codec error types.
//!
//! Every decode failure is an explicit value carrying the offset that
//! triggered it, so malformed packets can be diagnosed from logs. Field
//! values that merely fail to parse (an MX preference, an A address) are
//! not errors: they recover locally with documented defaults.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// DNS codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer is too short to contain the expected data.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Expected minimum size.
        expected: usize,
        /// Actual buffer size.
        actual: usize,
    },

    /// A read would run past the end of the packet.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof {
        /// Byte offset where the read was attempted.
        offset: usize,
    },

    /// Invalid data encountered during parsing.
    #[error("invalid data at offset {offset}: {message}")]
    InvalidData {
        /// Byte offset of the invalid data.
        offset: usize,
        /// Description of the error.
        message: String,
    },

    /// Label exceeds the 63-byte maximum.
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Actual label length.
        length: usize,
    },

    /// Domain name exceeds the 255-byte wire maximum.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Actual name length in wire format.
        length: usize,
    },

    /// Empty label in the middle of a domain name.
    #[error("empty label at position {position}")]
    EmptyLabel {
        /// Byte position of the empty label in the source text.
        position: usize,
    },

    /// Compression pointer that does not point strictly backward.
    #[error("invalid compression pointer at offset {offset}: points to {target}")]
    InvalidCompressionPointer {
        /// Offset of the pointer.
        offset: usize,
        /// Target offset the pointer references.
        target: usize,
    },

    /// Pointer chase exceeded the hop bound.
    #[error("too many compression pointer jumps (>{max_jumps})")]
    TooManyCompressionJumps {
        /// Maximum allowed jumps.
        max_jumps: usize,
    },

    /// Message header declares no question to answer.
    #[error("query contains no question section")]
    MissingQuestion,
}

impl Error {
    /// Creates a new `BufferTooShort` error.
    #[inline]
    pub fn buffer_too_short(expected: usize, actual: usize) -> Self {
        Self::BufferTooShort { expected, actual }
    }

    /// Creates a new `UnexpectedEof` error.
    #[inline]
    pub fn unexpected_eof(offset: usize) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Creates a new `InvalidData` error.
    #[inline]
    pub fn invalid_data(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidData {
            offset,
            message: message.into(),
        }
    }

    /// Creates a new `LabelTooLong` error.
    #[inline]
    pub fn label_too_long(length: usize) -> Self {
        Self::LabelTooLong { length }
    }

    /// Creates a new `NameTooLong` error.
    #[inline]
    pub fn name_too_long(length: usize) -> Self {
        Self::NameTooLong { length }
    }

    /// Creates a new `InvalidCompressionPointer` error.
    #[inline]
    pub fn invalid_pointer(offset: usize, target: usize) -> Self {
        Self::InvalidCompressionPointer { offset, target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::buffer_too_short(12, 8);
        assert_eq!(
            err.to_string(),
            "buffer too short: expected at least 12 bytes, got 8"
        );

        let err = Error::unexpected_eof(512);
        assert_eq!(err.to_string(), "unexpected end of data at offset 512");

        let err = Error::invalid_pointer(20, 30);
        assert_eq!(
            err.to_string(),
            "invalid compression pointer at offset 20: points to 30"
        );
    }

    #[test]
    fn test_error_eq() {
        assert_eq!(Error::label_too_long(64), Error::LabelTooLong { length: 64 });
        assert_ne!(Error::unexpected_eof(1), Error::unexpected_eof(2));
    }
}
