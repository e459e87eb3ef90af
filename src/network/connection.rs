//! Connection Manager
//!
//! Owns the socket to one router: connect with retry, login, word I/O and
//! disconnect.

use std::io::BufReader;
use std::thread;

use crate::config::Config;
use crate::error::{Result, RosError};
use crate::network::Transport;
use crate::observer::{NoopObserver, TracingObserver, WordObserver};
use crate::protocol::{
    self, challenge_response, command_line_words, command_words, extract_challenge,
    parse_response, password_sentence, response_sentence, ParsedResponse, ReadEnd, TAG_DONE,
};

/// Lifecycle of a [`Connection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    /// Opening the TCP/TLS stream
    Connecting,
    /// Stream open, login handshake in progress
    Authenticating,
    /// Logged in and ready for commands
    Connected,
}

/// A session with one router
///
/// All I/O is blocking and strictly sequential: every command must have its
/// response read before the next one is written. The socket is released by
/// [`Connection::disconnect`] or, at the latest, when the value is dropped.
pub struct Connection {
    /// Connection settings
    config: Config,

    /// Socket, buffered for reading; writes go to the inner stream
    stream: Option<BufReader<Transport>>,

    state: ConnectionState,

    /// Sees every word sent and received
    observer: Box<dyn WordObserver>,

    /// Why the most recent connect attempt failed
    last_error: Option<String>,
}

impl Connection {
    /// Create a disconnected session
    ///
    /// With `config.debug` set, words are logged through `tracing`.
    pub fn new(config: Config) -> Self {
        let observer: Box<dyn WordObserver> = if config.debug {
            Box::new(TracingObserver)
        } else {
            Box::new(NoopObserver)
        };

        Self {
            config,
            stream: None,
            state: ConnectionState::Disconnected,
            observer,
            last_error: None,
        }
    }

    /// Replace the word observer
    pub fn set_observer(&mut self, observer: Box<dyn WordObserver>) {
        self.observer = observer;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Failure reason of the latest connect attempt, cleared on success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // =========================================================================
    // Connect / Disconnect
    // =========================================================================

    /// Open a stream to `host` and log in
    ///
    /// Tries up to `config.attempts` times, sleeping `config.delay` between
    /// attempts. Socket and login failures are retried alike; only the final
    /// outcome is returned.
    pub fn connect(&mut self, host: &str, login: &str, password: &str) -> Result<()> {
        self.config.validate()?;
        self.disconnect();

        let attempts = self.config.attempts;
        for attempt in 1..=attempts {
            match self.try_connect(host, login, password) {
                Ok(()) => {
                    self.state = ConnectionState::Connected;
                    self.last_error = None;
                    tracing::info!("Connected to {}:{}", host, self.config.port);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Connect attempt {}/{} to {}:{} failed: {}",
                        attempt,
                        attempts,
                        host,
                        self.config.port,
                        e
                    );
                    self.last_error = Some(e.to_string());
                    self.disconnect();
                }
            }

            if attempt < attempts {
                thread::sleep(self.config.delay);
            }
        }

        tracing::warn!("Giving up on {} after {} attempt(s)", host, attempts);
        Err(RosError::ConnectFailed {
            host: host.to_string(),
            attempts,
        })
    }

    fn try_connect(&mut self, host: &str, login: &str, password: &str) -> Result<()> {
        self.state = ConnectionState::Connecting;
        let transport = Transport::open(host, &self.config)?;

        tracing::debug!(
            "Stream open to {}",
            transport
                .peer_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );

        self.stream = Some(BufReader::new(transport));
        self.state = ConnectionState::Authenticating;

        if self.login(login, password)? {
            Ok(())
        } else {
            Err(RosError::LoginRejected)
        }
    }

    /// Run the login handshake on the open stream
    ///
    /// Plain mode answers the first round with a bare `!done`. Legacy
    /// routers answer with `!done =ret=<challenge>` and expect a second
    /// round carrying the MD5 response.
    fn login(&mut self, login: &str, password: &str) -> Result<bool> {
        self.write_sentence(&password_sentence(login, password))?;
        let reply = self.read_words()?;

        if reply.first().map(String::as_str) != Some(TAG_DONE) {
            return Ok(false);
        }

        // Sentence terminators are not "further words"
        let Some(next) = reply[1..].iter().find(|w| !w.is_empty()) else {
            tracing::debug!("Logged in with plain credentials");
            return Ok(true);
        };

        let Some(response) = extract_challenge(next)
            .and_then(|challenge| challenge_response(password, challenge))
        else {
            tracing::debug!("Unexpected login reply word: {}", next);
            return Ok(false);
        };

        tracing::debug!("Answering legacy login challenge");
        self.write_sentence(&response_sentence(login, &response))?;
        let reply = self.read_words()?;

        Ok(reply.first().map(String::as_str) == Some(TAG_DONE))
    }

    /// Close the socket if open
    ///
    /// Safe to call any number of times, connected or not.
    pub fn disconnect(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.get_mut().shutdown();
            tracing::debug!("Socket closed");
        }
        self.state = ConnectionState::Disconnected;
    }

    // =========================================================================
    // Word I/O
    // =========================================================================

    /// Write one word (trimmed); `terminal` closes the sentence
    ///
    /// A failed write drops the socket, since part of a sentence may
    /// already be on the wire.
    pub fn write(&mut self, word: &str, terminal: bool) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(RosError::NotConnected)?;
        let word = word.trim();

        if let Err(e) = protocol::write_word(stream.get_mut(), word, terminal) {
            tracing::warn!("Dropping connection: {}", e);
            self.disconnect();
            return Err(e);
        }
        self.observer.on_sent(word);
        Ok(())
    }

    /// Write all words as one sentence; the last one is terminal
    pub fn write_sentence<S: AsRef<str>>(&mut self, words: &[S]) -> Result<()> {
        let last = words.len().saturating_sub(1);
        for (i, word) in words.iter().enumerate() {
            self.write(word.as_ref(), i == last)?;
        }
        Ok(())
    }

    /// Read the raw words of one logical response
    ///
    /// A timeout or a closed stream returns the words collected so far.
    /// A closed stream, a timeout inside a word or a framing error also
    /// drops the socket.
    pub fn read_words(&mut self) -> Result<Vec<String>> {
        let stream = self.stream.as_mut().ok_or(RosError::NotConnected)?;

        match protocol::read_words(stream, &*self.observer) {
            Ok((words, end)) => {
                match end {
                    ReadEnd::Closed => {
                        tracing::debug!("Router closed the stream");
                        self.disconnect();
                    }
                    ReadEnd::Stalled => {
                        tracing::warn!("Dropping connection: read timed out inside a word");
                        self.disconnect();
                    }
                    ReadEnd::Done | ReadEnd::TimedOut => {}
                }
                Ok(words)
            }
            Err(e) => {
                // Stream position is unknown after a bad prefix
                tracing::warn!("Dropping connection: {}", e);
                self.disconnect();
                Err(e)
            }
        }
    }

    /// Read one logical response and parse it into records
    pub fn read(&mut self) -> Result<ParsedResponse> {
        let words = self.read_words()?;
        Ok(parse_response(&words))
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Run a free-form command line such as `/ip/address/print ?interface=ether1`
    ///
    /// A blank line sends nothing and returns an empty response.
    pub fn execmd(&mut self, line: &str) -> Result<ParsedResponse> {
        let words = command_line_words(line);
        if words.is_empty() {
            return Ok(ParsedResponse::default());
        }

        self.write_sentence(&words)?;
        self.read()
    }

    /// Run `command` with `(key, value)` parameters in iteration order
    pub fn comm<I, K, V>(&mut self, command: &str, params: I) -> Result<ParsedResponse>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let words = command_words(command, params);
        self.write_sentence(&words)?;
        self.read()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}
