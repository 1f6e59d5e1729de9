//! Shell quoting for commands that git runs through `sh -c`.
//!
//! Editor settings such as `GIT_EDITOR` and `sequence.editor` are handed to
//! the shell, so every word of a generated command must survive word
//! splitting and expansion unchanged.

use bstr::{BString, ByteVec};

/// Returns true if a byte needs backslash-quoting outside the single quotes.
fn need_bs_quote(c: u8) -> bool {
    c == b'\'' || c == b'!'
}

/// Shell-quote a single word.
///
/// Wraps the word in single quotes, escaping single quotes as `'\''` and
/// exclamation points as `'\!'`, matching C git's `sq_quote_buf`.
pub fn shell_quote(word: &[u8]) -> BString {
    let mut out = BString::from("'");
    let mut i = 0;
    while i < word.len() {
        let start = i;
        while i < word.len() && !need_bs_quote(word[i]) {
            i += 1;
        }
        out.push_str(&word[start..i]);
        while i < word.len() && need_bs_quote(word[i]) {
            out.push_str(b"'\\");
            out.push_byte(word[i]);
            out.push_byte(b'\'');
            i += 1;
        }
    }
    out.push_byte(b'\'');
    out
}

/// Quote each word and join them with single spaces.
pub fn shell_command<I, W>(words: I) -> BString
where
    I: IntoIterator<Item = W>,
    W: AsRef<[u8]>,
{
    let mut out = BString::default();
    for word in words {
        if !out.is_empty() {
            out.push_byte(b' ');
        }
        out.push_str(shell_quote(word.as_ref()));
    }
    out
}
