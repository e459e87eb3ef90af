//! Login sentences
//!
//! Builds the `/login` sentences and the legacy challenge-response digest
//! used by routers that predate plain-credential login.

use md5::{Digest, Md5};

/// Command word of both login rounds
pub const LOGIN_COMMAND: &str = "/login";

/// Marker that precedes the challenge inside the legacy `!done` reply
const CHALLENGE_MARKER: &str = "ret=";

/// Hex characters in a challenge (16 raw bytes)
const CHALLENGE_HEX_LEN: usize = 32;

/// First login round: name and password in clear
pub fn password_sentence(login: &str, password: &str) -> [String; 3] {
    [
        LOGIN_COMMAND.to_string(),
        format!("=name={}", login),
        format!("=password={}", password),
    ]
}

/// Second login round of the legacy mode
pub fn response_sentence(login: &str, response: &str) -> [String; 3] {
    [
        LOGIN_COMMAND.to_string(),
        format!("=name={}", login),
        format!("=response={}", response),
    ]
}

/// Find the challenge in a reply word
///
/// Returns the first `ret=` occurrence followed by 32 lowercase hex
/// characters. The word usually reads `=ret=<hex>`.
pub fn extract_challenge(word: &str) -> Option<&str> {
    word.match_indices(CHALLENGE_MARKER).find_map(|(at, marker)| {
        let start = at + marker.len();
        let candidate = word.get(start..start + CHALLENGE_HEX_LEN)?;
        candidate
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
            .then_some(candidate)
    })
}

/// Digest answering a legacy login challenge
///
/// `"00" + hex(md5(0x00 ++ password ++ challenge_bytes))`. Returns `None`
/// when `challenge_hex` is not valid hex.
pub fn challenge_response(password: &str, challenge_hex: &str) -> Option<String> {
    let challenge = hex::decode(challenge_hex).ok()?;

    let mut hasher = Md5::new();
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hasher.update(&challenge);

    Some(format!("00{}", hex::encode(hasher.finalize())))
}
