//! Backends hand out protocol channels.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::protocol::{Protocol, StreamProtocol};
use std::net::{TcpStream, ToSocketAddrs};
use tracing::debug;

/// Something that can open a [`Protocol`] channel.
///
/// The channel lives for exactly one call of [`protocol`](Self::protocol)
/// and is released when it returns, whether the closure succeeded or not.
pub trait Backend: Send + Sync {
    /// The channel type.
    type Protocol: Protocol;

    /// Opens a channel, runs `f` on it, then releases it.
    fn protocol<T, F>(&self, f: F) -> ClientResult<T>
    where
        F: FnOnce(&mut Self::Protocol) -> ClientResult<T>;
}

/// A backend opening one TCP connection per channel.
#[derive(Debug, Clone)]
pub struct TcpBackend {
    config: ClientConfig,
}

impl TcpBackend {
    /// Creates a backend; no connection is made until a channel is needed.
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn connect(&self) -> ClientResult<TcpStream> {
        let addr = self.config.socket_addr();
        let resolved = addr
            .to_socket_addrs()
            .map_err(|e| ClientError::Transport(format!("resolving {addr}: {e}")))?;

        let mut last_error = None;
        for socket_addr in resolved {
            let connected = match self.config.connect_limit() {
                Some(timeout) => TcpStream::connect_timeout(&socket_addr, timeout),
                None => TcpStream::connect(socket_addr),
            };
            match connected {
                Ok(stream) => {
                    stream.set_read_timeout(self.config.read_limit())?;
                    stream.set_write_timeout(self.config.write_limit())?;
                    stream.set_nodelay(self.config.nodelay)?;
                    debug!(%socket_addr, "connected");
                    return Ok(stream);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(match last_error {
            Some(e) => e.into(),
            None => ClientError::Transport(format!("{addr} resolved to no addresses")),
        })
    }
}

impl Backend for TcpBackend {
    type Protocol = StreamProtocol<TcpStream>;

    fn protocol<T, F>(&self, f: F) -> ClientResult<T>
    where
        F: FnOnce(&mut Self::Protocol) -> ClientResult<T>,
    {
        let mut protocol = StreamProtocol::new(self.connect()?, self.config.max_frame_len);
        f(&mut protocol)
        // the stream is dropped and closed here on every path
    }
}
