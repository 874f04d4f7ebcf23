//! Line and token level parsing shared by the mesh and solution readers.

use std::{
    fmt,
    io::{BufRead, Seek, SeekFrom},
    str::{FromStr, SplitWhitespace},
};

use boolinator::Boolinator;

use super::Error;




/// Upper bound for the number of records reserved up front. Counts come from
/// the file and are not trusted; vectors grow past this while reading.
pub(crate) const MAX_PREALLOC: usize = 1 << 16;

/// Capacity to reserve for `count` declared records.
pub(crate) fn initial_capacity(count: usize) -> usize {
    count.min(MAX_PREALLOC)
}


/// Reads a stream line by line and keeps track of the current line number.
///
/// Line endings (`\n` and `\r\n`) are stripped.
pub(crate) struct Lines<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of the line returned by the last call to `next_line` (1-based).
    /// Is 0 if no line has been read yet.
    pub(crate) fn line_number(&self) -> usize {
        self.line
    }

    /// Reads the next line. Returns `None` on EOF.
    pub(crate) fn next_line(&mut self) -> Result<Option<&str>, Error> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }

        self.line += 1;
        Ok(Some(self.buf.trim_end_matches(|c| c == '\n' || c == '\r')))
    }

    /// Reads the next line that is not blank. Returns `None` on EOF.
    pub(crate) fn next_non_blank(&mut self) -> Result<Option<&str>, Error> {
        loop {
            let is_blank = match self.next_line()? {
                None => return Ok(None),
                Some(line) => line.trim().is_empty(),
            };

            if !is_blank {
                return Ok(Some(self.buf.trim_end_matches(|c| c == '\n' || c == '\r')));
            }
        }
    }

    /// Reads the next non-blank line as a whitespace separated record. EOF is
    /// an error here, as the caller expects another record.
    pub(crate) fn record(&mut self) -> Result<Record<'_>, Error> {
        let eof_line = self.line;
        match self.next_non_blank()? {
            Some(_) => {}
            None => return Err(Error::UnexpectedEof { line: eof_line }),
        }

        let line = self.line;
        let text = self.buf.trim_end_matches(|c| c == '\n' || c == '\r');
        Ok(Record {
            tokens: text.split_whitespace(),
            line,
        })
    }

    /// Reads a record consisting of a single count.
    pub(crate) fn count(&mut self) -> Result<u32, Error> {
        let mut record = self.record()?;
        let count = record.next("count")?;
        record.finish()?;
        Ok(count)
    }

    /// Scans forward for a line exactly equal to `tag`. Returns `false` if
    /// EOF is reached first. The line after the tag is the next one to be
    /// read.
    pub(crate) fn goto_section(&mut self, tag: &str) -> Result<bool, Error> {
        while let Some(line) = self.next_line()? {
            if line == tag {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Returns an error about the line that was read last.
    pub(crate) fn error(&self, msg: impl Into<String>) -> Error {
        Error::MalformedRecord {
            line: self.line,
            msg: msg.into(),
        }
    }
}

impl<R: BufRead + Seek> Lines<R> {
    /// Jumps back to the start of the stream.
    pub(crate) fn rewind(&mut self) -> Result<(), Error> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.line = 0;
        Ok(())
    }
}


/// The whitespace separated tokens of one line.
pub(crate) struct Record<'a> {
    tokens: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Record<'a> {
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Parses the next token as `T`. `what` names the value for the error
    /// message.
    pub(crate) fn next<T>(&mut self, what: &str) -> Result<T, Error>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let token = self.tokens.next()
            .ok_or_else(|| self.error(format!("missing {}", what)))?;

        token.parse().map_err(|e| self.error(format!("invalid {} {:?}: {}", what, token, e)))
    }

    /// Makes sure there are no tokens left in this record.
    pub(crate) fn finish(mut self) -> Result<(), Error> {
        let rest = self.tokens.next();
        rest.is_none().as_result_from(
            || (),
            || self.error(format!("unexpected additional data {:?}", rest.unwrap_or(""))),
        )
    }

    pub(crate) fn error(&self, msg: impl Into<String>) -> Error {
        Error::MalformedRecord {
            line: self.line,
            msg: msg.into(),
        }
    }
}


/// Parses the longest prefix of `s` that is a decimal float literal and
/// returns the value and the remaining string.
///
/// Accepts an optional sign, digits with an optional fractional part and an
/// optional exponent. An exponent marker not followed by digits is not part
/// of the literal. This is what makes `0.5-0.25i` split into `0.5` and
/// `-0.25i`.
pub(crate) fn float_prefix(s: &str) -> Option<(f32, &str)> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_end = digits_from(end);
    let mut num_digits = int_end - end;
    end = int_end;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        num_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if num_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok().map(|v| (v, &s[end..]))
}
