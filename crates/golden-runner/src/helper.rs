//! The `append-line` editor.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Append `line` and a newline to `path`, first terminating an unfinished
/// last line. A missing file is created.
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let needs_newline = match fs::read(path) {
        Ok(content) => content.last().is_some_and(|&b| b != b'\n'),
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(e),
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut text = String::with_capacity(line.len() + 2);
    if needs_newline {
        text.push('\n');
    }
    text.push_str(line);
    text.push('\n');
    file.write_all(text.as_bytes())
}
