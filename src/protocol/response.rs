//! Response definitions
//!
//! Turns the flat word list of one logical response into records.

/// One result record follows
pub const TAG_RE: &str = "!re";

/// Recoverable error record follows
pub const TAG_TRAP: &str = "!trap";

/// Fatal error record follows; the router closes the session afterwards
pub const TAG_FATAL: &str = "!fatal";

/// End of a logical response
pub const TAG_DONE: &str = "!done";

/// Attribute map of one `!re`, `!trap` or `!fatal` sentence
///
/// Keys keep the order the router sent them in. Setting a key that already
/// exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over `(key, value)` pairs in arrival order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Structured result of one logical response
///
/// Traps and fatals are grouped per tag, so their position relative to the
/// `!re` records of the same response is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    /// `!re` records in arrival order
    pub replies: Vec<Record>,

    /// `!trap` records in arrival order
    pub traps: Vec<Record>,

    /// `!fatal` records in arrival order
    pub fatals: Vec<Record>,
}

impl ParsedResponse {
    /// True when no record of any kind was produced
    pub fn is_empty(&self) -> bool {
        self.replies.is_empty() && self.traps.is_empty() && self.fatals.is_empty()
    }

    /// True when the router reported a trap or a fatal error
    pub fn has_errors(&self) -> bool {
        !self.traps.is_empty() || !self.fatals.is_empty()
    }

    /// `message` attribute of the first trap, if any
    pub fn first_trap_message(&self) -> Option<&str> {
        self.traps.first().and_then(|t| t.get("message"))
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Reply,
    Trap,
    Fatal,
}

/// Build records from a flat word list
///
/// Lenient: attribute words that arrive
/// before any tag word, and words that are neither tags nor attributes,
/// are dropped.
pub fn parse_response<S: AsRef<str>>(words: &[S]) -> ParsedResponse {
    let mut parsed = ParsedResponse::default();
    let mut current: Option<Slot> = None;

    for word in words {
        let word = word.as_ref();
        match word {
            TAG_RE => {
                parsed.replies.push(Record::new());
                current = Some(Slot::Reply);
            }
            TAG_TRAP => {
                parsed.traps.push(Record::new());
                current = Some(Slot::Trap);
            }
            TAG_FATAL => {
                parsed.fatals.push(Record::new());
                current = Some(Slot::Fatal);
            }
            _ => {
                let Some(attribute) = word.strip_prefix('=') else {
                    continue;
                };
                let (key, value) = attribute.split_once('=').unwrap_or((attribute, ""));

                let record = match current {
                    Some(Slot::Reply) => parsed.replies.last_mut(),
                    Some(Slot::Trap) => parsed.traps.last_mut(),
                    Some(Slot::Fatal) => parsed.fatals.last_mut(),
                    None => None,
                };
                match record {
                    Some(record) => record.insert(key, value),
                    None => tracing::trace!("Dropping attribute outside a record: {}", word),
                }
            }
        }
    }

    parsed
}
