//! Configuration for rosapi
//!
//! Centralized connection settings with the defaults the RouterOS API
//! service expects out of the box.

use std::time::Duration;

use crate::error::{Result, RosError};

/// Plain-text API service port
pub const DEFAULT_PORT: u16 = 8728;

/// Conventional API-SSL service port. Never selected automatically; pass it
/// to [`ConfigBuilder::port`] together with [`ConfigBuilder::tls`].
pub const DEFAULT_TLS_PORT: u16 = 8729;

/// Connection settings for a single [`crate::Connection`]
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// TCP port of the API service
    pub port: u16,

    /// Wrap the stream in TLS. Peer certificate and hostname are not
    /// verified, so self-signed router certificates are accepted.
    pub tls: bool,

    /// Connect timeout, also applied as the socket read/write timeout
    pub timeout: Duration,

    // -------------------------------------------------------------------------
    // Retry Configuration
    // -------------------------------------------------------------------------
    /// How many times `connect` tries before giving up
    pub attempts: u32,

    /// Pause between two failed attempts
    pub delay: Duration,

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------
    /// Log every sent/received word through `tracing`
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            tls: false,
            timeout: Duration::from_secs(3),
            attempts: 3,
            delay: Duration::from_secs(2),
            debug: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the connection cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.attempts == 0 {
            return Err(RosError::Config("attempts must be at least 1".to_string()));
        }
        // A zero socket timeout is rejected by the OS
        if self.timeout.is_zero() {
            return Err(RosError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the API service port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable or disable TLS
    pub fn tls(mut self, enabled: bool) -> Self {
        self.config.tls = enabled;
        self
    }

    /// Set the connect and socket read/write timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the number of connect attempts
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.config.attempts = attempts;
        self
    }

    /// Set the delay between connect attempts
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Enable or disable per-word debug logging
    pub fn debug(mut self, enabled: bool) -> Self {
        self.config.debug = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
