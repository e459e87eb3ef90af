//! Response Parser Tests
//!
//! Tests for turning flat word lists into reply/trap/fatal records.

use rosapi::protocol::{parse_response, ParsedResponse, Record};

// =============================================================================
// Basic Parsing Tests
// =============================================================================

#[test]
fn test_single_reply_record() {
    let parsed = parse_response(&["!re", "=name=ether1", "=running=true", "!done"]);

    assert_eq!(parsed.replies.len(), 1);
    assert_eq!(
        parsed.replies[0],
        Record::from_iter([("name", "ether1"), ("running", "true")])
    );
    assert!(parsed.traps.is_empty());
    assert!(parsed.fatals.is_empty());
}

#[test]
fn test_single_trap_record() {
    let parsed = parse_response(&["!trap", "=message=failure", "!done"]);

    assert!(parsed.replies.is_empty());
    assert_eq!(parsed.traps.len(), 1);
    assert_eq!(parsed.traps[0].get("message"), Some("failure"));
    assert!(parsed.has_errors());
    assert_eq!(parsed.first_trap_message(), Some("failure"));
}

#[test]
fn test_fatal_record() {
    let parsed = parse_response(&["!fatal", "=message=session terminated on request"]);

    assert_eq!(parsed.fatals.len(), 1);
    assert_eq!(
        parsed.fatals[0].get("message"),
        Some("session terminated on request")
    );
    assert!(parsed.has_errors());
    assert_eq!(parsed.first_trap_message(), None);
}

#[test]
fn test_multiple_replies_with_sentence_terminators() {
    let words = [
        "!re", "=.id=*1", "=name=ether1", "", "!re", "=.id=*2", "=name=ether2", "", "!done", "",
    ];
    let parsed = parse_response(&words);

    assert_eq!(parsed.replies.len(), 2);
    assert_eq!(parsed.replies[0].get(".id"), Some("*1"));
    assert_eq!(parsed.replies[1].get("name"), Some("ether2"));
    assert!(!parsed.has_errors());
}

#[test]
fn test_done_only_is_empty() {
    let parsed = parse_response(&["!done", ""]);
    assert!(parsed.is_empty());
    assert_eq!(parsed, ParsedResponse::default());
}

#[test]
fn test_empty_word_list() {
    let words: [&str; 0] = [];
    assert!(parse_response(&words).is_empty());
}

// =============================================================================
// Attribute Splitting Tests
// =============================================================================

#[test]
fn test_value_keeps_embedded_equals() {
    let parsed = parse_response(&["!re", "=comment=a=b=c"]);
    assert_eq!(parsed.replies[0].get("comment"), Some("a=b=c"));
}

#[test]
fn test_missing_value_defaults_to_empty() {
    let parsed = parse_response(&["!re", "=disabled"]);
    assert_eq!(parsed.replies[0].get("disabled"), Some(""));
}

#[test]
fn test_empty_value() {
    let parsed = parse_response(&["!re", "=comment="]);
    assert_eq!(parsed.replies[0].get("comment"), Some(""));
}

#[test]
fn test_duplicate_key_overwrites_in_place() {
    let parsed = parse_response(&["!re", "=name=a", "=mtu=1500", "=name=b"]);
    let record = &parsed.replies[0];

    assert_eq!(record.len(), 2);
    let keys: Vec<&str> = record.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["name", "mtu"]);
    assert_eq!(record.get("name"), Some("b"));
}

#[test]
fn test_record_iterates_in_arrival_order() {
    let parsed = parse_response(&["!re", "=z=1", "=a=2", "=m=3"]);
    let pairs: Vec<(&str, &str)> = parsed.replies[0].iter().collect();
    assert_eq!(pairs, [("z", "1"), ("a", "2"), ("m", "3")]);
}

// =============================================================================
// Leniency Tests
// =============================================================================

#[test]
fn test_attribute_before_any_tag_is_dropped() {
    let parsed = parse_response(&["=ret=abc", "!done"]);
    assert!(parsed.is_empty());
}

#[test]
fn test_unknown_words_are_ignored() {
    let parsed = parse_response(&["!re", "name=ether1", ".tag=5", "=mtu=1500", "!empty"]);

    assert_eq!(parsed.replies.len(), 1);
    assert_eq!(parsed.replies[0].len(), 1);
    assert_eq!(parsed.replies[0].get("mtu"), Some("1500"));
}

#[test]
fn test_empty_record_is_kept() {
    let parsed = parse_response(&["!re", "!re", "=name=x"]);

    assert_eq!(parsed.replies.len(), 2);
    assert!(parsed.replies[0].is_empty());
    assert_eq!(parsed.replies[1].get("name"), Some("x"));
}

// =============================================================================
// Grouping Tests
// =============================================================================

#[test]
fn test_traps_grouped_apart_from_replies() {
    let words = [
        "!re", "=name=a", "", "!trap", "=message=oops", "", "!re", "=name=b", "", "!done", "",
    ];
    let parsed = parse_response(&words);

    assert_eq!(parsed.replies.len(), 2);
    assert_eq!(parsed.replies[1].get("name"), Some("b"));
    assert_eq!(parsed.traps.len(), 1);
    // Attributes after the second !re belong to it, not to the trap
    assert_eq!(parsed.traps[0].len(), 1);
}

#[test]
fn test_trap_and_fatal_lists_are_separate() {
    let parsed = parse_response(&[
        "!trap",
        "=category=0",
        "=message=no such item",
        "!fatal",
        "=message=not logged in",
    ]);

    assert_eq!(parsed.traps.len(), 1);
    assert_eq!(parsed.traps[0].get("category"), Some("0"));
    assert_eq!(parsed.fatals.len(), 1);
    assert_eq!(parsed.fatals[0].get("message"), Some("not logged in"));
}
