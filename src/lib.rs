//! Harmonic wave displacement over triangulated water surface meshes.
//!
//! Given a 2D triangle mesh of a water surface (read from a sectioned
//! `.mesh` file) and a precomputed complex amplitude per vertex (read from a
//! solution file), this crate computes the height of every vertex at time
//! `t`:
//!
//! ```text
//! z(t) = A * (real * cos(t) - imag * sin(t))
//! ```
//!
//! The main entry points are:
//!
//! - [`io::mesh`] and [`io::solution`] to read the two file formats,
//! - [`WaveField`] to evaluate the displacement,
//! - [`DisplacementEvaluator`] to lazily load a solution once and apply it,
//! - [`DeformModifier`] and [`ConstructiveModifier`], the two front ends a
//!   host application plugs into its modifier stack.
//!
//! ```no_run
//! use shoal::{ConstructiveModifier, Geometry, Settings, mesh::Empty};
//!
//! let settings = Settings::new("lyttelton.sol")
//!     .mesh_path("lyttelton.mesh")
//!     .amplitude(2.0);
//! let mut modifier = ConstructiveModifier::new(settings);
//!
//! for frame in 0..100 {
//!     modifier.set_time(frame as f32 * 0.1);
//!     let geometry = modifier.apply(Geometry::empty());
//!     println!("{} vertices", geometry.num_vertices());
//! }
//! ```

#[cfg(test)]
#[macro_use]
mod test_utils;

pub mod evaluator;
pub mod geometry;
pub mod handle;
pub mod io;
pub mod math;
mod memo;
pub mod mesh;
pub mod modifier;
mod settings;
pub mod wave;

pub use self::{
    evaluator::{DisplacementEvaluator, Outcome},
    geometry::Geometry,
    handle::{FaceHandle, Handle, VertexHandle},
    mesh::{MeshTopology, Triangle, Vertex},
    modifier::{ConstructiveModifier, DeformModifier},
    settings::Settings,
    wave::{Phase, WaveField},
};
