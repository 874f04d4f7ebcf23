//! Reading complex amplitude solutions.
//!
//! A solution file has one line per mesh vertex, in vertex order:
//!
//! ```text
//! <real> <imag>i
//! ```
//!
//! The space between both numbers is optional if the imaginary part carries
//! a sign (`0.5-0.25i`), and so is the trailing `i`.

use std::{
    io::BufRead,
    path::Path,
};

use log::debug;

use crate::wave::WaveField;
use super::{
    open_with, Error, FsOpener, Opener,
    parse::{float_prefix, initial_capacity, Lines},
};


#[cfg(test)]
mod tests;


/// A reader for solution files.
///
/// By default the reader is strict: the file must not contain more records
/// than requested. Use [`Reader::lenient`] to silently ignore additional
/// records.
pub struct Reader<R> {
    lines: Lines<R>,
    strict: bool,
}

impl Reader<Box<dyn super::Source>> {
    /// Opens the file at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::open_with(&FsOpener, path)
    }

    /// Opens `path` via the given opener.
    pub fn open_with(opener: &dyn Opener, path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::new(open_with(opener, path.as_ref())?))
    }
}

impl<R: BufRead> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
            strict: true,
        }
    }

    /// Do not complain about records after the last requested one.
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Sets whether additional records are an error.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Reads one `<real> <imag>i` record.
    fn record(&mut self) -> Result<(f32, f32), Error> {
        let eof_line = self.lines.line_number();
        let text = match self.lines.next_non_blank()? {
            Some(line) => line.trim(),
            None => return Err(Error::UnexpectedEof { line: eof_line }),
        };

        let parsed = float_prefix(text).and_then(|(real, rest)| {
            let (imag, rest) = float_prefix(rest.trim_start())?;
            let rest = rest.trim_start();
            let rest = if rest.starts_with('i') { &rest[1..] } else { rest };
            Some((real, imag, rest.trim().is_empty()))
        });

        match parsed {
            Some((real, imag, true)) => Ok((real, imag)),
            Some((_, _, false)) => Err(self.lines.error("unexpected data after imaginary part")),
            None => Err(self.lines.error("expected two floats")),
        }
    }

    /// Reads exactly `num_vertices` records.
    pub fn read(mut self, num_vertices: usize) -> Result<WaveField, Error> {
        let mut real = Vec::with_capacity(initial_capacity(num_vertices));
        let mut imag = Vec::with_capacity(initial_capacity(num_vertices));
        for _ in 0..num_vertices {
            let (re, im) = self.record()?;
            real.push(re);
            imag.push(im);
        }

        if self.strict {
            let mut extra = 0;
            while self.lines.next_non_blank()?.is_some() {
                extra += 1;
            }

            if extra > 0 {
                return Err(Error::CountMismatch {
                    expected: num_vertices,
                    found: num_vertices + extra,
                });
            }
        }

        debug!("read {} complex amplitudes", num_vertices);

        // Both vectors were filled in lockstep.
        WaveField::new(real, imag).map_err(|e| Error::CountMismatch {
            expected: e.expected,
            found: e.found,
        })
    }
}

/// Reads the solution file at `path` for a mesh with `num_vertices`
/// vertices.
pub fn load(path: impl AsRef<Path>, num_vertices: usize) -> Result<WaveField, Error> {
    Reader::open(path)?.read(num_vertices)
}

/// Reads the solution at `path` via the given opener.
pub fn load_with(
    opener: &dyn Opener,
    path: impl AsRef<Path>,
    num_vertices: usize,
) -> Result<WaveField, Error> {
    Reader::open_with(opener, path)?.read(num_vertices)
}
