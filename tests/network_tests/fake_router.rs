//! In-process stand-in for a router's API service
//!
//! Accepts a fixed number of connections on 127.0.0.1 and runs a script
//! against each one, recording every sentence the client sent.

use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use rosapi::protocol::{read_word, write_word, WordRead};

/// Router end of one accepted connection
pub struct RouterSide {
    stream: TcpStream,
    received: Vec<Vec<String>>,
}

impl RouterSide {
    /// Read one client sentence; `None` once the client has gone away
    pub fn read_sentence(&mut self) -> Option<Vec<String>> {
        let mut words = Vec::new();
        loop {
            match read_word(&mut self.stream).expect("client sent a bad length prefix") {
                WordRead::Word(word) if word.is_empty() => break,
                WordRead::Word(word) => words.push(word),
                WordRead::Truncated(..) | WordRead::Stopped(_) => return None,
            }
        }
        self.received.push(words.clone());
        Some(words)
    }

    /// Send one sentence
    pub fn send(&mut self, words: &[&str]) {
        let last = words.len() - 1;
        for (i, word) in words.iter().enumerate() {
            write_word(&mut self.stream, word, i == last).expect("send to client");
        }
    }

    /// Send bytes as-is, bypassing word framing
    pub fn send_raw(&mut self, bytes: &[u8]) {
        self.stream.write_all(bytes).expect("send to client");
        self.stream.flush().expect("flush to client");
    }

    /// Accept the first login round with a bare `!done`
    pub fn accept_plain_login(&mut self) {
        let login = self.read_sentence().expect("login sentence");
        assert_eq!(login[0], "/login");
        self.send(&["!done"]);
    }

    /// Read until the client disconnects
    pub fn drain(&mut self) {
        while self.read_sentence().is_some() {}
    }
}

pub struct FakeRouter {
    pub port: u16,
    handle: JoinHandle<Vec<Vec<Vec<String>>>>,
}

impl FakeRouter {
    /// Serve `connections` connections one after another with `script`
    pub fn spawn<F>(connections: usize, script: F) -> Self
    where
        F: Fn(&mut RouterSide) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake router");
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let mut sessions = Vec::new();
            for _ in 0..connections {
                let (stream, _) = listener.accept().expect("accept client");
                let mut side = RouterSide {
                    stream,
                    received: Vec::new(),
                };
                script(&mut side);
                sessions.push(side.received);
            }
            sessions
        });

        Self { port, handle }
    }

    /// Wait for the script to finish; returns received sentences per connection
    pub fn join(self) -> Vec<Vec<Vec<String>>> {
        self.handle.join().expect("fake router panicked")
    }
}
