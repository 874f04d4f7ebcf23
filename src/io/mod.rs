//! Reading the two text formats this crate consumes: mesh descriptions and
//! complex amplitude solutions.
//!
//! Both formats are line based. The mesh format is split into sections
//! (`Vertices`, `Triangles`) that can appear in any order. The solution
//! format is one `<real> <imag>i` record per vertex.
//!
//! All readers fail closed: if anything goes wrong, an [`Error`] is returned
//! and nothing that was read so far is handed out.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, Cursor, Seek},
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use failure::Fail;
use fxhash::FxHashMap;


pub(crate) mod parse;
pub mod mesh;
pub mod solution;



/// Everything that can go wrong while reading a mesh or solution file.
#[derive(Debug, Fail)]
pub enum Error {
    /// The file could not be opened.
    #[fail(display = "cannot open '{}': {}", path, cause)]
    ResourceUnavailable {
        path: String,
        #[fail(cause)]
        cause: io::Error,
    },

    /// A section tag (e.g. `Vertices`) is not present in the file.
    #[fail(display = "section '{}' not found", _0)]
    MissingSection(&'static str),

    /// A record does not consist of the expected tokens.
    #[fail(display = "malformed record in line {}: {}", line, msg)]
    MalformedRecord {
        line: usize,
        msg: String,
    },

    /// The file ended before all declared records were read.
    #[fail(display = "unexpected EOF after line {}", line)]
    UnexpectedEof {
        line: usize,
    },

    /// Two counts that are supposed to be equal are not.
    #[fail(display = "count mismatch: expected {} records, found {}", expected, found)]
    CountMismatch {
        expected: usize,
        found: usize,
    },

    /// A triangle references a vertex that does not exist. `index` is the
    /// 1-based index as written in the file.
    #[fail(
        display = "vertex index {} in line {} is out of bounds (mesh has {} vertices)",
        index, line, num_vertices
    )]
    IndexOutOfBounds {
        line: usize,
        index: u32,
        num_vertices: u32,
    },

    /// Any other IO error while reading.
    #[fail(display = "IO error: {}", _0)]
    Io(#[fail(cause)] io::Error),
}

impl From<io::Error> for Error {
    fn from(src: io::Error) -> Self {
        Error::Io(src)
    }
}

impl Error {
    /// Returns `true` if this error means the file could not be opened at
    /// all (as opposed to a file with invalid content).
    pub fn is_unavailable(&self) -> bool {
        match self {
            Error::ResourceUnavailable { .. } => true,
            _ => false,
        }
    }
}


// ===========================================================================
// ===== Opening files
// ===========================================================================

/// A readable and seekable byte stream. The mesh reader rewinds the stream
/// for every section, so `Seek` is required.
pub trait Source: BufRead + Seek + Send {}

impl<T: BufRead + Seek + Send> Source for T {}

/// Something that can turn a path into a [`Source`].
///
/// All file access of the displacement engine goes through this trait, which
/// makes it possible to serve files from memory or to observe how often a
/// file is opened.
pub trait Opener: fmt::Debug + Send + Sync {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Source>>;
}

/// Opens files from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl Opener for FsOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Source>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

/// Serves files from memory. Paths that were never inserted behave like
/// missing files.
///
/// The number of calls to [`Opener::open`] is counted (including failed
/// ones), which is useful to check how often a resource is requested.
#[derive(Debug, Default)]
pub struct MemOpener {
    files: FxHashMap<PathBuf, Arc<[u8]>>,
    opened: AtomicUsize,
}

impl MemOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let content: Vec<u8> = content.into();
        self.files.insert(path.into(), Arc::from(content));
    }

    /// Builder-style version of [`MemOpener::insert`].
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Returns how often `open` was called so far.
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl Opener for MemOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Source>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        match self.files.get(path) {
            Some(content) => Ok(Box::new(Cursor::new(content.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no in-memory file '{}'", path.display()),
            )),
        }
    }
}

/// Opens `path` with the given opener and maps failure to
/// [`Error::ResourceUnavailable`].
pub(crate) fn open_with(opener: &dyn Opener, path: &Path) -> Result<Box<dyn Source>, Error> {
    opener.open(path).map_err(|cause| Error::ResourceUnavailable {
        path: path.display().to_string(),
        cause,
    })
}


// ===========================================================================
// ===== File formats
// ===========================================================================

/// Represents one of the supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Sectioned mesh description (`.mesh`).
    Mesh,

    /// Per-vertex complex amplitudes (`.sol` or `.txt`).
    Solution,
}

impl FileFormat {
    /// Tries to guess the file format from the file extension.
    ///
    /// Returns `None` if:
    /// - the path/file has no extension in its name, or
    /// - the extension is no valid UTF8, or
    /// - the file extension is not known.
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| {
                match ext.to_ascii_lowercase().as_str() {
                    "mesh" => Some(FileFormat::Mesh),
                    "sol" | "txt" => Some(FileFormat::Solution),
                    _ => None,
                }
            })
    }

    /// Returns the canonical file extension of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Mesh => "mesh",
            FileFormat::Solution => "sol",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileFormat::Mesh => "mesh",
            FileFormat::Solution => "solution",
        }.fmt(f)
    }
}
