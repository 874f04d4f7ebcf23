//! Applying a lazily loaded wave field to vertex positions.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use log::{debug, warn};

use crate::{
    io::{self, FsOpener, Opener},
    math::Pos3Like,
    memo::LoadOnce,
    wave::{LengthMismatch, WaveField},
};




/// What happened during one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The displacement was added to all positions.
    Displaced,

    /// No wave field is available (the load failed now or earlier). The
    /// positions were not touched.
    NoField,

    /// The wave field does not match the position buffer. The positions were
    /// not touched.
    LengthMismatch {
        expected: usize,
        found: usize,
    },
}

impl Outcome {
    pub fn is_displaced(&self) -> bool {
        *self == Outcome::Displaced
    }
}

impl From<LengthMismatch> for Outcome {
    fn from(src: LengthMismatch) -> Self {
        Outcome::LengthMismatch {
            expected: src.expected,
            found: src.found,
        }
    }
}


/// Displaces vertex positions according to a wave solution file.
///
/// The solution is loaded on the first evaluation, sized for the vertex
/// buffer passed to that evaluation. This happens at most once per evaluator:
/// if loading fails, the failure is remembered and later evaluations are
/// no-ops that do not touch the file again. Only changing the solution path
/// (or calling [`DisplacementEvaluator::reset`]) allows another attempt.
///
/// Cloning an evaluator yields one that has not loaded anything yet.
#[derive(Debug)]
pub struct DisplacementEvaluator {
    solution_path: PathBuf,
    opener: Arc<dyn Opener>,
    strict: bool,
    field: LoadOnce<WaveField>,

    /// Set after the first length mismatch was logged as warning. Later
    /// mismatches with the same field are only logged at debug level.
    mismatch_warned: AtomicBool,
}

impl Clone for DisplacementEvaluator {
    fn clone(&self) -> Self {
        Self {
            solution_path: self.solution_path.clone(),
            opener: self.opener.clone(),
            strict: self.strict,
            field: self.field.clone(),
            mismatch_warned: AtomicBool::new(false),
        }
    }
}

impl DisplacementEvaluator {
    /// Creates an evaluator reading the solution from the file system.
    pub fn new(solution_path: impl Into<PathBuf>) -> Self {
        Self::with_opener(solution_path, Arc::new(FsOpener))
    }

    /// Creates an evaluator opening the solution via the given opener.
    pub fn with_opener(solution_path: impl Into<PathBuf>, opener: Arc<dyn Opener>) -> Self {
        Self {
            solution_path: solution_path.into(),
            opener,
            strict: true,
            field: LoadOnce::new(),
            mismatch_warned: AtomicBool::new(false),
        }
    }

    /// Accept solution files with more records than the mesh has vertices.
    /// See [`io::solution::Reader::lenient`].
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    pub fn solution_path(&self) -> &Path {
        &self.solution_path
    }

    /// Changes the solution path. If it differs from the current one, the
    /// loaded field (or remembered failure) is dropped.
    pub fn set_solution_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path != self.solution_path {
            self.solution_path = path;
            self.reset();
        }
    }

    /// Forgets the loaded field or a failed load.
    pub fn reset(&mut self) {
        self.field.reset();
        *self.mismatch_warned.get_mut() = false;
    }

    /// Returns `true` if a load was attempted and failed.
    pub fn has_failed(&self) -> bool {
        self.field.has_failed()
    }

    /// Returns the already loaded field, if any. Never loads.
    pub fn loaded_field(&self) -> Option<Arc<WaveField>> {
        self.field.get()
    }

    /// Returns the field, loading it for `num_vertices` vertices if this is
    /// the first attempt.
    pub fn field(&self, num_vertices: usize) -> Option<Arc<WaveField>> {
        self.field.get_or_load(|| {
            debug!(
                "loading wave solution '{}' for {} vertices",
                self.solution_path.display(),
                num_vertices,
            );

            io::solution::Reader::open_with(&*self.opener, &self.solution_path)
                .and_then(|r| r.strict(self.strict).read(num_vertices))
                .map_err(|e| format!(
                    "failed to load wave solution '{}': {}",
                    self.solution_path.display(),
                    e,
                ))
        })
    }

    /// Adds the displacement at `time`, scaled by `amplitude`, to the height
    /// of every position.
    ///
    /// The displacement is added to whatever height the positions have. To
    /// get the wave surface at `time`, pass positions at their rest height.
    pub fn evaluate<P: Pos3Like>(
        &self,
        positions: &mut [P],
        time: f32,
        amplitude: f32,
    ) -> Outcome {
        let field = match self.field(positions.len()) {
            Some(field) => field,
            None => return Outcome::NoField,
        };

        match field.apply(positions, time, amplitude) {
            Ok(()) => Outcome::Displaced,
            Err(e) => {
                if self.mismatch_warned.swap(true, Ordering::Relaxed) {
                    debug!("skipping wave displacement: {}", e);
                } else {
                    warn!("skipping wave displacement: {}", e);
                }
                e.into()
            }
        }
    }
}
