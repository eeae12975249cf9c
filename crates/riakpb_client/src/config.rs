//! Configuration for connections to a store node.

use riakpb_protocol::DEFAULT_MAX_FRAME_LEN;
use std::time::Duration;

/// Default protocol buffers port of a store node.
pub const DEFAULT_PB_PORT: u16 = 8087;

/// Configuration for [`TcpBackend`](crate::TcpBackend).
///
/// A zero timeout disables that timeout.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host name or address of the node.
    pub host: String,
    /// Protocol buffers port.
    pub port: u16,
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,
    /// Timeout while awaiting a response.
    pub read_timeout: Duration,
    /// Timeout while writing a request.
    pub write_timeout: Duration,
    /// Largest frame accepted from the node.
    pub max_frame_len: usize,
    /// Whether to disable Nagle's algorithm.
    pub nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PB_PORT,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for `host:port` with default timeouts.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Sets the write timeout.
    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Sets the largest accepted frame.
    #[must_use]
    pub fn with_max_frame_len(mut self, len: usize) -> Self {
        self.max_frame_len = len;
        self
    }

    /// Sets whether `TCP_NODELAY` is applied.
    #[must_use]
    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }

    /// Returns the connect timeout, or `None` if it is disabled.
    pub fn connect_limit(&self) -> Option<Duration> {
        non_zero(self.connect_timeout)
    }

    /// Returns the read timeout, or `None` if it is disabled.
    pub fn read_limit(&self) -> Option<Duration> {
        non_zero(self.read_timeout)
    }

    /// Returns the write timeout, or `None` if it is disabled.
    pub fn write_limit(&self) -> Option<Duration> {
        non_zero(self.write_timeout)
    }

    /// Returns `host:port`.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_zero(timeout: Duration) -> Option<Duration> {
    (!timeout.is_zero()).then_some(timeout)
}
