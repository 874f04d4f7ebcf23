//! The two front ends of the wave displacement.
//!
//! - [`DeformModifier`] displaces the positions of geometry that already
//!   exists.
//! - [`ConstructiveModifier`] ignores its input, synthesizes geometry from a
//!   mesh file, flattens it and displaces it. If that fails, the input is
//!   passed through unchanged.
//!
//! Both own a [`DisplacementEvaluator`], so each modifier instance loads its
//! solution at most once and remembers its own failures.

use std::{
    path::PathBuf,
    sync::Arc,
};

use log::debug;

use crate::{
    evaluator::{DisplacementEvaluator, Outcome},
    geometry::{self, Geometry},
    io::{FsOpener, Opener},
    math::Pos3Like,
    memo::LoadOnce,
    settings::Settings,
};


/// Displaces existing vertex positions.
#[derive(Debug, Clone)]
pub struct DeformModifier {
    settings: Settings,
    evaluator: DisplacementEvaluator,
}

impl DeformModifier {
    pub fn new(settings: Settings) -> Self {
        Self::with_opener(settings, Arc::new(FsOpener))
    }

    pub fn with_opener(settings: Settings, opener: Arc<dyn Opener>) -> Self {
        let evaluator = DisplacementEvaluator::with_opener(settings.solution_path.clone(), opener);
        Self { settings, evaluator }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn evaluator(&self) -> &DisplacementEvaluator {
        &self.evaluator
    }

    pub fn set_time(&mut self, time: f32) {
        self.settings.time = time;
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.settings.amplitude = amplitude;
    }

    /// Changes the solution path. A different path discards the loaded
    /// solution and any remembered failure.
    pub fn set_solution_path(&mut self, path: impl Into<PathBuf>) {
        self.settings.solution_path = path.into();
        self.evaluator.set_solution_path(self.settings.solution_path.clone());
    }

    /// Adds the displacement for the current time to `positions`. See
    /// [`DisplacementEvaluator::evaluate`].
    pub fn deform<P: Pos3Like>(&self, positions: &mut [P]) -> Outcome {
        self.evaluator.evaluate(positions, self.settings.time, self.settings.amplitude)
    }
}


/// Builds geometry from the configured mesh file and displaces it.
///
/// The geometry is read from the mesh file on first use and cached. As with
/// the solution, a failed read is remembered until the mesh path changes.
#[derive(Debug, Clone)]
pub struct ConstructiveModifier {
    settings: Settings,
    opener: Arc<dyn Opener>,
    evaluator: DisplacementEvaluator,
    geometry: LoadOnce<Geometry>,
}

impl ConstructiveModifier {
    pub fn new(settings: Settings) -> Self {
        Self::with_opener(settings, Arc::new(FsOpener))
    }

    pub fn with_opener(settings: Settings, opener: Arc<dyn Opener>) -> Self {
        let evaluator = DisplacementEvaluator::with_opener(
            settings.solution_path.clone(),
            opener.clone(),
        );

        Self {
            settings,
            opener,
            evaluator,
            geometry: LoadOnce::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn evaluator(&self) -> &DisplacementEvaluator {
        &self.evaluator
    }

    pub fn set_time(&mut self, time: f32) {
        self.settings.time = time;
    }

    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.settings.amplitude = amplitude;
    }

    pub fn set_solution_path(&mut self, path: impl Into<PathBuf>) {
        self.settings.solution_path = path.into();
        self.evaluator.set_solution_path(self.settings.solution_path.clone());
    }

    /// Changes the mesh path. A different path discards the cached geometry,
    /// and since the vertex count may change, the loaded solution as well.
    pub fn set_mesh_path(&mut self, path: impl Into<PathBuf>) {
        let path = Some(path.into());
        if path != self.settings.mesh_path {
            self.settings.mesh_path = path;
            self.geometry.reset();
            self.evaluator.reset();
        }
    }

    /// Returns the flat geometry read from the mesh file, reading it if this
    /// is the first attempt.
    pub fn rest_geometry(&self) -> Option<Arc<Geometry>> {
        let path = match &self.settings.mesh_path {
            Some(path) => path,
            None => {
                debug!("no mesh path configured");
                return None;
            }
        };

        self.geometry.get_or_load(|| {
            geometry::build_with(&*self.opener, path).map_err(|e| {
                format!("failed to build geometry from '{}': {}", path.display(), e)
            })
        })
    }

    /// Produces the displaced geometry for the current time, or returns
    /// `input` unchanged if no geometry can be built from the mesh file.
    ///
    /// If only the solution is unavailable, the flat geometry is returned.
    pub fn apply(&self, input: Geometry) -> Geometry {
        let rest = match self.rest_geometry() {
            Some(rest) => rest,
            None => return input,
        };

        let mut out = (*rest).clone();
        out.reset_heights();
        self.evaluator.evaluate(
            out.positions_mut(),
            self.settings.time,
            self.settings.amplitude,
        );
        out
    }
}
