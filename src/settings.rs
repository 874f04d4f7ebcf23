use std::path::{Path, PathBuf};


/// Configuration of a wave modifier, as supplied by the host application.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Phase passed to `cos`/`sin`.
    pub time: f32,

    /// Gain applied to every displacement.
    pub amplitude: f32,

    /// Path of the complex amplitude solution file.
    pub solution_path: PathBuf,

    /// Path of the mesh description file. Only used by the
    /// [`ConstructiveModifier`][crate::ConstructiveModifier].
    pub mesh_path: Option<PathBuf>,
}

impl Settings {
    /// Settings with the given solution path, `time = 1` and
    /// `amplitude = 1`.
    pub fn new(solution_path: impl Into<PathBuf>) -> Self {
        Self {
            time: 1.0,
            amplitude: 1.0,
            solution_path: solution_path.into(),
            mesh_path: None,
        }
    }

    pub fn time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    pub fn amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn mesh_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mesh_path = Some(path.into());
        self
    }

    pub fn solution_path(&self) -> &Path {
        &self.solution_path
    }
}
