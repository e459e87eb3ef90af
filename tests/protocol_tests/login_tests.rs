//! Login Tests
//!
//! Tests for the login sentences and the legacy challenge digest.

use rosapi::protocol::{
    challenge_response, extract_challenge, password_sentence, response_sentence, LOGIN_COMMAND,
};

const CHALLENGE: &str = "0123456789abcdef0123456789abcdef";

// =============================================================================
// Sentence Tests
// =============================================================================

#[test]
fn test_password_sentence() {
    assert_eq!(
        password_sentence("admin", "secret"),
        ["/login", "=name=admin", "=password=secret"]
    );
}

#[test]
fn test_response_sentence() {
    let words = response_sentence("admin", "00abc");
    assert_eq!(words[0], LOGIN_COMMAND);
    assert_eq!(words[1], "=name=admin");
    assert_eq!(words[2], "=response=00abc");
}

// =============================================================================
// Challenge Extraction Tests
// =============================================================================

#[test]
fn test_extract_challenge_from_attribute_word() {
    let word = format!("=ret={}", CHALLENGE);
    assert_eq!(extract_challenge(&word), Some(CHALLENGE));
}

#[test]
fn test_extract_challenge_ignores_trailing_text() {
    let word = format!("=ret={}ffff", CHALLENGE);
    assert_eq!(extract_challenge(&word), Some(CHALLENGE));
}

#[test]
fn test_extract_challenge_rejects_uppercase_hex() {
    let word = format!("=ret={}", CHALLENGE.to_uppercase());
    assert_eq!(extract_challenge(&word), None);
}

#[test]
fn test_extract_challenge_rejects_short_value() {
    assert_eq!(extract_challenge("=ret=0123456789abcdef"), None);
    assert_eq!(extract_challenge("=ret="), None);
}

#[test]
fn test_extract_challenge_skips_non_matching_occurrence() {
    let word = format!("=ret=nothex ret={}", CHALLENGE);
    assert_eq!(extract_challenge(&word), Some(CHALLENGE));
}

#[test]
fn test_extract_challenge_missing_marker() {
    assert_eq!(extract_challenge("=message=invalid user name or password"), None);
}

// =============================================================================
// Digest Tests
// =============================================================================

#[test]
fn test_challenge_response_known_vector() {
    // md5(0x00 ++ "secret" ++ hex_decode(CHALLENGE)), prefixed with "00"
    assert_eq!(
        challenge_response("secret", CHALLENGE).as_deref(),
        Some("00ebbe7c3df6b3d902bfd1f355c6e63289")
    );
}

#[test]
fn test_challenge_response_empty_password() {
    assert_eq!(
        challenge_response("", "ffffffffffffffffffffffffffffffff").as_deref(),
        Some("00947a695c84af1793c7a50a9c5f5ed21b")
    );
}

#[test]
fn test_challenge_response_shape() {
    let digest = challenge_response("pw", CHALLENGE).unwrap();
    assert_eq!(digest.len(), 34);
    assert!(digest.starts_with("00"));
    assert!(digest.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
}

#[test]
fn test_challenge_response_rejects_invalid_hex() {
    assert_eq!(challenge_response("secret", "zz"), None);
    assert_eq!(challenge_response("secret", "abc"), None);
}
