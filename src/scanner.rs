//! Line scanner: splits a raw buffer into fixed-width record slices.
//!
//! Any run of CR/LF bytes, of any length and mix, separates records and never
//! produces a row. Every non-empty segment between runs must be exactly the
//! schema's total width; one bad segment fails the whole scan.

use crate::error::ParseError;

#[inline]
fn is_terminator(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Borrowed record slices, one per well-formed line.
///
/// Valid only while the scanned buffer is alive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex<'a> {
    lines: Vec<&'a [u8]>,
}

impl<'a> LineIndex<'a> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        self.lines.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.lines.iter().copied()
    }
}

/// Split `buffer` into records of exactly `width` bytes.
///
/// A zero `width` can never match a record and fails with `ZeroLineWidth`.
pub fn scan_lines(buffer: &[u8], width: usize) -> Result<LineIndex<'_>, ParseError> {
    if width == 0 {
        return Err(ParseError::ZeroLineWidth);
    }

    let mut lines: Vec<&[u8]> = Vec::new();
    lines
        .try_reserve_exact(buffer.len() / width)
        .map_err(|_| ParseError::OutOfMemory)?;

    let len = buffer.len();
    let mut head = 0;
    let mut pos = 0;

    while pos < len {
        if !is_terminator(buffer[pos]) {
            pos += 1;
            continue;
        }

        let segment = pos - head;
        if segment != 0 {
            if segment != width {
                return Err(ParseError::BadLine {
                    line: lines.len(),
                    length: segment,
                    expected: width,
                });
            }
            lines.push(&buffer[head..pos]);
        }

        while pos < len && is_terminator(buffer[pos]) {
            pos += 1;
        }
        head = pos;
    }

    // Last record without a trailing terminator
    let segment = len - head;
    if segment != 0 {
        if segment != width {
            return Err(ParseError::BadLine {
                line: lines.len(),
                length: segment,
                expected: width,
            });
        }
        lines.push(&buffer[head..]);
    }

    Ok(LineIndex { lines })
}
