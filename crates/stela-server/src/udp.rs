//! UDP transport.

use crate::responder;
use crate::{Result, UdpSettings};
use bytes::Bytes;
use socket2::{Domain, Socket, Type};
use stela_proto::MAX_UDP_MESSAGE_SIZE;
use stela_store::RecordStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument};

/// UDP DNS server.
pub struct UdpServer {
    socket: Arc<UdpSocket>,
    store: Arc<RecordStore>,
    local_addr: SocketAddr,
}

impl UdpServer {
    /// Binds a new UDP server to the given address.
    pub async fn bind(
        addr: SocketAddr,
        store: Arc<RecordStore>,
        settings: &UdpSettings,
    ) -> Result<Self> {
        // Build with socket2 so the options land before bind
        let domain = if addr.is_ipv4() {
            Domain::IPV4
        } else {
            Domain::IPV6
        };

        let socket = Socket::new(domain, Type::DGRAM, None)?;

        socket.set_reuse_address(true)?;

        #[cfg(unix)]
        if settings.reuse_port {
            socket.set_reuse_port(true)?;
        }

        if let Some(size) = settings.recv_buffer {
            socket.set_recv_buffer_size(size)?;
        }
        if let Some(size) = settings.send_buffer {
            socket.set_send_buffer_size(size)?;
        }

        socket.set_nonblocking(true)?;

        socket.bind(&addr.into())?;

        // Convert to tokio socket
        let std_socket: std::net::UdpSocket = socket.into();
        let socket = UdpSocket::from_std(std_socket)?;
        let local_addr = socket.local_addr()?;

        info!(addr = %local_addr, "UDP server listening");

        Ok(Self {
            socket: Arc::new(socket),
            store,
            local_addr,
        })
    }

    /// Returns the local address.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Runs the receive loop until a shutdown broadcast arrives.
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        // One response payload is the most this server ever speaks, so
        // queries are read into a buffer of the same size. The kernel
        // discards the tail of anything larger.
        let mut buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

        loop {
            tokio::select! {
                result = self.socket.recv_from(&mut buf) => {
                    match result {
                        Ok((len, src)) => {
                            let query = Bytes::copy_from_slice(&buf[..len]);
                            let socket = self.socket.clone();
                            let store = self.store.clone();

                            // Answer each datagram on its own task
                            tokio::spawn(async move {
                                if let Err(e) = answer_datagram(socket, store, query, src).await {
                                    debug!(error = %e, client = %src, "Error answering UDP query");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "Error receiving UDP packet");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    info!(addr = %self.local_addr, "UDP server stopped");
                    return Ok(());
                }
            }
        }
    }
}

#[instrument(level = "debug", skip_all, fields(client = %src))]
async fn answer_datagram(
    socket: Arc<UdpSocket>,
    store: Arc<RecordStore>,
    query: Bytes,
    src: SocketAddr,
) -> Result<()> {
    let response = match responder::handle_query(&query, &store) {
        Ok(bytes) => bytes,
        Err(e) => {
            // Drop malformed queries without a reply
            debug!(error = %e, "Failed to parse DNS query");
            return Ok(());
        }
    };

    socket.send_to(&response, src).await?;

    Ok(())
}
