//! Transport
//!
//! Plain TCP or TLS byte stream to the router's API service.

use std::io::{self, Read, Write};
use std::net::{IpAddr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

use native_tls::{TlsConnector, TlsStream};

use crate::config::Config;
use crate::error::{Result, RosError};

/// Byte stream to the API service
pub enum Transport {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl Transport {
    /// Open a stream to `host` on the configured port
    ///
    /// Every resolved address is tried in turn with the configured connect
    /// timeout. The same timeout becomes the socket read/write timeout. In
    /// TLS mode the router certificate and hostname are not verified.
    pub fn open(host: &str, config: &Config) -> Result<Self> {
        // Accept bracketed IPv6 literals as well as bare ones
        let host = host.trim_start_matches('[').trim_end_matches(']');

        let mut last_err = None;
        let mut stream = None;
        for addr in (host, config.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, config.timeout) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::trace!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        let stream = match (stream, last_err) {
            (Some(s), _) => s,
            (None, Some(e)) => return Err(e.into()),
            (None, None) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no address resolved for {}", host),
                )
                .into())
            }
        };

        stream.set_read_timeout(Some(config.timeout))?;
        stream.set_write_timeout(Some(config.timeout))?;
        // Words are flushed one by one
        stream.set_nodelay(true)?;

        if !config.tls {
            return Ok(Transport::Plain(stream));
        }

        // SNI carries host names only, never address literals
        let connector = TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .use_sni(!is_ip_literal(host))
            .build()
            .map_err(|e| RosError::Tls(e.to_string()))?;

        let tls = connector
            .connect(host, stream)
            .map_err(|e| RosError::Tls(e.to_string()))?;

        Ok(Transport::Tls(Box::new(tls)))
    }

    /// Remote address of the underlying socket
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        match self {
            Transport::Plain(s) => s.peer_addr().ok(),
            Transport::Tls(s) => s.get_ref().peer_addr().ok(),
        }
    }

    /// Close the stream, sending TLS close_notify first when applicable
    pub fn shutdown(&mut self) {
        let result = match self {
            Transport::Plain(s) => s.shutdown(Shutdown::Both),
            Transport::Tls(s) => s.shutdown(),
        };
        if let Err(e) = result {
            tracing::trace!("Shutdown failed: {}", e);
        }
    }
}

/// Whether `host` is an IPv4/IPv6 address rather than a name
pub fn is_ip_literal(host: &str) -> bool {
    host.parse::<IpAddr>().is_ok()
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.read(buf),
            Transport::Tls(s) => s.read(buf),
        }
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Transport::Plain(s) => s.write(buf),
            Transport::Tls(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Transport::Plain(s) => s.flush(),
            Transport::Tls(s) => s.flush(),
        }
    }
}
