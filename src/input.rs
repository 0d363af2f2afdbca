//! Line-oriented input handling for files and standard input.

use crate::error::{SafeLinksError, SafeLinksResult};
use std::io::{BufRead, Write};

/// Summary of a [`process_lines`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Lines read.
    pub lines_read: usize,
    /// Lines written with changes.
    pub lines_changed: usize,
    /// Lines echoed unchanged because the transform had nothing to do.
    pub lines_passed_through: usize,
}

/// Reads non-blank lines from `reader`.
///
/// Fails with [`SafeLinksError::NoInput`] if every line is blank, and with
/// [`SafeLinksError::Io`] if reading fails.
pub fn read_lines<R: BufRead>(reader: R, source_name: &str) -> SafeLinksResult<Vec<String>> {
    let mut lines = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|source| SafeLinksError::Io {
            source_name: source_name.to_string(),
            source,
        })?;

        if line.trim().is_empty() {
            continue;
        }
        lines.push(line);
    }

    if lines.is_empty() {
        return Err(SafeLinksError::NoInput {
            source_name: source_name.to_string(),
        });
    }

    Ok(lines)
}

/// Applies `transform` to each line of `reader` and writes the result.
///
/// Line terminators (LF or CRLF) are written back exactly as read. Lines
/// for which `transform` reports nothing found or a no-op are echoed
/// unchanged; any other error aborts processing.
pub fn process_lines<R, W, F>(
    mut reader: R,
    mut writer: W,
    source_name: &str,
    mut transform: F,
) -> SafeLinksResult<LineStats>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> SafeLinksResult<String>,
{
    let mut stats = LineStats::default();
    let mut buf = String::new();

    loop {
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|source| SafeLinksError::Io {
                source_name: source_name.to_string(),
                source,
            })?;
        if read == 0 {
            break;
        }
        stats.lines_read += 1;

        let (content, terminator) = split_terminator(&buf);

        let output = if content.trim().is_empty() {
            stats.lines_passed_through += 1;
            content.to_string()
        } else {
            match transform(content) {
                Ok(changed) => {
                    stats.lines_changed += 1;
                    changed
                }
                Err(err) if err.is_nothing_found() || err.is_no_op() => {
                    log::debug!("line {} passed through: {}", stats.lines_read, err);
                    stats.lines_passed_through += 1;
                    content.to_string()
                }
                Err(err) => return Err(err),
            }
        };

        write!(writer, "{}{}", output, terminator).map_err(|source| SafeLinksError::Io {
            source_name: "output".to_string(),
            source,
        })?;
    }

    writer.flush().map_err(|source| SafeLinksError::Io {
        source_name: "output".to_string(),
        source,
    })?;

    Ok(stats)
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}
