//! The conventional `(listfile)` member: a CRLF-separated list of archive
//! member names.

/// Split a decoded `(listfile)` payload into individual filenames.
///
/// Entries are separated by CRLF; trailing blank entries (from a final
/// line terminator, or a file that is only whitespace) are trimmed.
pub fn parse(contents: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(contents);
    let mut entries: Vec<String> = text
        .split("\r\n")
        .map(|line| line.to_string())
        .collect();

    while matches!(entries.last(), Some(last) if last.trim().is_empty()) {
        entries.pop();
    }

    entries
}
