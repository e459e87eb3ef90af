//! Word observers
//!
//! Hook called by the connection on every word that crosses the socket.
//! Keeps the protocol core free of any concrete output mechanism.

/// Receives every word sent to or read from the router
pub trait WordObserver: Send {
    /// Called after a word has been written (already trimmed)
    fn on_sent(&self, word: &str);

    /// Called after a complete word has been read, including the empty
    /// sentence terminator
    fn on_received(&self, word: &str);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WordObserver for NoopObserver {
    fn on_sent(&self, _word: &str) {}

    fn on_received(&self, _word: &str) {}
}

/// Logs words at `debug` level through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl WordObserver for TracingObserver {
    fn on_sent(&self, word: &str) {
        tracing::debug!("<<< {}", word);
    }

    fn on_received(&self, word: &str) {
        tracing::debug!(">>> {}", word);
    }
}
