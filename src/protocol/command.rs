//! Command sentences
//!
//! Turns a command line or a command plus parameters into the words of one
//! outbound sentence. The last word of the returned list is the terminal one.

/// Words that go on the wire without the `=` attribute prefix
fn is_query_word(token: &str) -> bool {
    token.starts_with('?') || token.starts_with('~')
}

/// Split a free-form command line into sentence words
///
/// The first token is the command path. Every following token becomes an
/// attribute word (`=` prepended) unless it is a `?query` or `~operator`
/// word. Runs of spaces do not produce empty words.
///
/// ```
/// use rosapi::protocol::command_line_words;
///
/// let words = command_line_words("/interface/set .id=*1 disabled=yes");
/// assert_eq!(words, ["/interface/set", "=.id=*1", "=disabled=yes"]);
/// ```
pub fn command_line_words(line: &str) -> Vec<String> {
    line.trim()
        .split(' ')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            if i == 0 || is_query_word(token) {
                token.to_string()
            } else {
                format!("={}", token)
            }
        })
        .collect()
}

/// Build sentence words from a command and `(key, value)` parameters
///
/// Parameters keep their iteration order. Keys starting with `?` or `~`
/// are sent as-is, all others get the `=` prefix.
pub fn command_words<I, K, V>(command: &str, params: I) -> Vec<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut words = vec![command.to_string()];
    words.extend(params.into_iter().map(|(key, value)| {
        let key = key.as_ref();
        let prefix = if is_query_word(key) { "" } else { "=" };
        format!("{}{}={}", prefix, key, value.as_ref())
    }));
    words
}
