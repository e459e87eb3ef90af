//! Protocol codec
//!
//! Length prefix encoding and word framing for the API wire protocol.
//!
//! ## Wire Format
//!
//! ### Word
//! ```text
//! ┌────────────────┬─────────────────────────────┐
//! │ Len (1-5)      │         Bytes               │
//! └────────────────┴─────────────────────────────┘
//! ```
//!
//! ### Length Prefix
//! ```text
//! 0xxxxxxx                                  < 0x80
//! 10xxxxxx xxxxxxxx                         < 0x4000
//! 110xxxxx xxxxxxxx xxxxxxxx                < 0x200000
//! 1110xxxx xxxxxxxx xxxxxxxx xxxxxxxx       < 0x10000000
//! 11110000 xxxxxxxx xxxxxxxx xxxxxxxx xxxxxxxx
//! ```
//!
//! ### Sentence
//! Words followed by one zero-length word (a single `0x00` byte).

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::response::TAG_DONE;
use crate::error::{Result, RosError};
use crate::observer::WordObserver;

/// Longest length prefix: 0xF0 marker + 4 bytes
pub const MAX_PREFIX_SIZE: usize = 5;

/// Size of the scratch buffer used while filling a word body
const READ_CHUNK: usize = 8 * 1024;

// =============================================================================
// Length Encoding/Decoding
// =============================================================================

/// Encode a word length using the shortest prefix form
pub fn encode_length(len: u32) -> Bytes {
    let mut buf = BytesMut::with_capacity(MAX_PREFIX_SIZE);
    encode_length_into(&mut buf, len);
    buf.freeze()
}

/// Append the length prefix for `len` to `buf`
pub fn encode_length_into(buf: &mut BytesMut, len: u32) {
    if len < 0x80 {
        buf.put_u8(len as u8);
    } else if len < 0x4000 {
        buf.put_u16(len as u16 | 0x8000);
    } else if len < 0x20_0000 {
        buf.put_uint(u64::from(len | 0xC0_0000), 3);
    } else if len < 0x1000_0000 {
        buf.put_u32(len | 0xE000_0000);
    } else {
        buf.put_u8(0xF0);
        buf.put_u32(len);
    }
}

/// Decode one length prefix from a stream
///
/// Mirrors the thresholds of [`encode_length`]. A first byte of
/// `0xF1..=0xFF` is a framing error.
pub fn decode_length<R: Read>(reader: &mut R) -> Result<u32> {
    let mut first = [0u8; 1];
    reader.read_exact(&mut first)?;
    decode_length_tail(reader, first[0])
}

/// Finish a length prefix whose first byte is already consumed
fn decode_length_tail<R: Read>(reader: &mut R, byte: u8) -> Result<u32> {
    let (extra, high) = if byte & 0x80 == 0x00 {
        (0, u32::from(byte))
    } else if byte & 0xC0 == 0x80 {
        (1, u32::from(byte & 0x3F))
    } else if byte & 0xE0 == 0xC0 {
        (2, u32::from(byte & 0x1F))
    } else if byte & 0xF0 == 0xE0 {
        (3, u32::from(byte & 0x0F))
    } else if byte == 0xF0 {
        (4, 0)
    } else {
        return Err(RosError::Framing(format!(
            "Invalid length prefix byte: 0x{:02x}",
            byte
        )));
    };

    let mut rest = [0u8; 4];
    reader.read_exact(&mut rest[..extra])?;

    Ok(rest[..extra]
        .iter()
        .fold(high, |acc, &b| (acc << 8) | u32::from(b)))
}

// =============================================================================
// Word Writing
// =============================================================================

/// Write one word, trimmed of surrounding whitespace
///
/// With `terminal` set, a zero-length word follows to close the sentence.
pub fn write_word<W: Write>(writer: &mut W, word: &str, terminal: bool) -> Result<()> {
    let bytes = word.trim().as_bytes();
    let len = u32::try_from(bytes.len()).map_err(|_| {
        RosError::Framing(format!("Word too long to encode: {} bytes", bytes.len()))
    })?;

    let mut buf = BytesMut::with_capacity(MAX_PREFIX_SIZE + bytes.len() + 1);
    encode_length_into(&mut buf, len);
    buf.put_slice(bytes);
    if terminal {
        buf.put_u8(0);
    }

    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Word Reading
// =============================================================================

/// Why a read loop stopped accumulating words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadEnd {
    /// The sentence carrying `!done` was closed
    Done,
    /// The socket read timeout expired between words
    TimedOut,
    /// The socket read timeout expired inside a word or its prefix; the
    /// stream is no longer on a word boundary
    Stalled,
    /// The peer closed the stream or the read failed
    Closed,
}

/// Outcome of pulling a single word off the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordRead {
    /// The full declared length was received
    Word(String),
    /// The stream stopped inside the word body; holds the bytes received so far
    Truncated(String, ReadEnd),
    /// The stream stopped before a complete length prefix
    Stopped(ReadEnd),
}

fn classify(err: &std::io::Error) -> ReadEnd {
    match err.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => ReadEnd::TimedOut,
        ErrorKind::UnexpectedEof => ReadEnd::Closed,
        _ => {
            tracing::debug!("Read failed: {}", err);
            ReadEnd::Closed
        }
    }
}

/// Same as [`classify`], for a stop after part of a word was consumed
fn classify_mid_word(err: &std::io::Error) -> ReadEnd {
    match classify(err) {
        ReadEnd::TimedOut => ReadEnd::Stalled,
        end => end,
    }
}

fn lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Read one length-prefixed word
///
/// Short reads keep accumulating until the declared length is reached.
/// Timeouts and closed streams are reported through [`WordRead`]; only a
/// framing violation is an error. A timeout after the first prefix byte
/// reports [`ReadEnd::Stalled`].
pub fn read_word<R: Read>(reader: &mut R) -> Result<WordRead> {
    let mut first = [0u8; 1];
    if let Err(e) = reader.read_exact(&mut first) {
        return Ok(WordRead::Stopped(classify(&e)));
    }

    let len = match decode_length_tail(reader, first[0]) {
        Ok(len) => len as usize,
        Err(RosError::Io(ref e)) => return Ok(WordRead::Stopped(classify_mid_word(e))),
        Err(e) => return Err(e),
    };

    // Grow as bytes arrive instead of trusting the peer's length up front
    let mut word = Vec::with_capacity(len.min(READ_CHUNK));
    let mut chunk = [0u8; READ_CHUNK];

    while word.len() < len {
        let want = (len - word.len()).min(READ_CHUNK);
        match reader.read(&mut chunk[..want]) {
            Ok(0) => return Ok(WordRead::Truncated(lossy(word), ReadEnd::Closed)),
            Ok(n) => word.extend_from_slice(&chunk[..n]),
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(ref e) => return Ok(WordRead::Truncated(lossy(word), classify_mid_word(e))),
        }
    }

    Ok(WordRead::Word(lossy(word)))
}

/// Collect the words of one logical response
///
/// Spans as many sentences as the router sends. Stops once the sentence
/// carrying `!done` is closed by its zero-length word, so trailing
/// attributes of that sentence (`=ret=` during login) are included and the
/// next read starts on a sentence boundary. A read timeout or a closed
/// stream stops early with whatever was collected. Empty sentence
/// terminators are kept in the list.
pub fn read_words<R: Read>(
    reader: &mut R,
    observer: &dyn WordObserver,
) -> Result<(Vec<String>, ReadEnd)> {
    let mut words = Vec::new();
    let mut seen_done = false;

    let end = loop {
        match read_word(reader)? {
            WordRead::Word(word) => {
                observer.on_received(&word);
                let closes = seen_done && word.is_empty();
                seen_done |= word == TAG_DONE;
                words.push(word);
                if closes {
                    break ReadEnd::Done;
                }
            }
            WordRead::Truncated(word, end) => {
                observer.on_received(&word);
                words.push(word);
                break end;
            }
            WordRead::Stopped(end) => break end,
        }
    };

    if end != ReadEnd::Done {
        tracing::debug!(
            "Response ended early ({:?}, done seen: {}) after {} words",
            end,
            seen_done,
            words.len()
        );
    }

    Ok((words, end))
}
