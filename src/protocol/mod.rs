//! Protocol Module
//!
//! Defines the RouterOS API wire protocol.
//!
//! ## Words and Sentences
//!
//! Every word is a length prefix followed by raw bytes. A sentence is a run
//! of words closed by a zero-length word.
//!
//! ```text
//! ┌──────────┬──────────────┬──────────┬──────────────┬──────┐
//! │ Len (1-5)│  /login      │ Len (1-5)│ =name=admin  │ 0x00 │
//! └──────────┴──────────────┴──────────┴──────────────┴──────┘
//! ```
//!
//! ### Outbound words
//! - Command path: `/ip/address/print`
//! - Attribute:    `=key=value`
//! - Query:        `?key`, `~key`
//!
//! ### Inbound tags
//! - `!re`:    one result record follows
//! - `!trap`:  recoverable error record
//! - `!fatal`: fatal error record
//! - `!done`:  end of the logical response
//!
//! A logical response may span several sentences (many `!re`, then one
//! `!done`), so the reader stops after the `!done` sentence, not after the
//! first sentence terminator.

mod codec;
mod command;
mod login;
mod response;

pub use codec::{
    decode_length, encode_length, encode_length_into, read_word, read_words, write_word, ReadEnd,
    WordRead, MAX_PREFIX_SIZE,
};
pub use command::{command_line_words, command_words};
pub use login::{
    challenge_response, extract_challenge, password_sentence, response_sentence, LOGIN_COMMAND,
};
pub use response::{
    parse_response, ParsedResponse, Record, TAG_DONE, TAG_FATAL, TAG_RE, TAG_TRAP,
};
