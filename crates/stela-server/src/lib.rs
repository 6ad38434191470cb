//! # Stela Server
//!
//! UDP transport and query handling for the stela authoritative responder.
//!
//! ## Architecture
//!
//! - **Responder**: pure function from query bytes to response bytes,
//!   independent of any socket
//! - **UDP transport**: socket2-configured listener, one spawned task per
//!   datagram
//! - **Shutdown**: broadcast channel, every listener exits on signal
//!
//! Malformed queries are dropped without a reply. The responder never
//! guesses at intent: anything that fails to decode is logged and discarded.

use thiserror::Error;

pub mod responder;
pub mod udp;

pub use responder::handle_query;
pub use udp::UdpServer;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] stela_proto::Error),

    #[error("server shutdown")]
    Shutdown,
}

/// Result type for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

/// Socket tuning applied when binding a UDP listener.
#[derive(Debug, Clone, Default)]
pub struct UdpSettings {
    /// Enable `SO_REUSEPORT` so several processes can share the address
    pub reuse_port: bool,
    /// Kernel receive buffer size in bytes, or the system default
    pub recv_buffer: Option<usize>,
    /// Kernel send buffer size in bytes, or the system default
    pub send_buffer: Option<usize>,
}
