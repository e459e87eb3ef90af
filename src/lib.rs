//! # rosapi
//!
//! Blocking client for the RouterOS API protocol:
//! - Length-prefixed word framing (1 to 5 byte prefixes)
//! - Sentence read/write loop spanning multi-sentence responses
//! - Login with plain credentials or the legacy MD5 challenge
//! - Optional TLS transport for the API-SSL service
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Command Builder                           │
//! │            (execmd line / comm + parameters)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ words
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Connection                               │
//! │        (connect + retry, login, write, read, disconnect)     │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │  Length Codec   │                │ Response Parser │
//!   │  + Word I/O     │                │ (!re/!trap/...) │
//!   └────────┬────────┘                └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │   Transport     │
//!   │  (TCP / TLS)    │
//!   └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rosapi::{Config, Connection};
//!
//! # fn main() -> rosapi::Result<()> {
//! let mut conn = Connection::new(Config::default());
//! conn.connect("192.168.88.1", "admin", "secret")?;
//!
//! let reply = conn.comm("/ip/address/print", [("?interface", "ether1")])?;
//! for record in &reply.replies {
//!     println!("{:?}", record.get("address"));
//! }
//!
//! conn.disconnect();
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod observer;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RosError, Result};
pub use config::{Config, DEFAULT_PORT, DEFAULT_TLS_PORT};
pub use network::{Connection, ConnectionState};
pub use observer::{NoopObserver, TracingObserver, WordObserver};
pub use protocol::{encode_length, parse_response, ParsedResponse, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rosapi
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
