//! Network Module
//!
//! Socket ownership and the session with a router.
//!
//! ## Architecture
//! - `Transport`: plain TCP or TLS stream
//! - `Connection`: connect/retry, login handshake, word I/O, commands

mod connection;
mod transport;

pub use connection::{Connection, ConnectionState};
pub use transport::{is_ip_literal, Transport};
