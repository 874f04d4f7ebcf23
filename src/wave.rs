//! The harmonic wave field: one complex amplitude per vertex.
//!
//! The displacement of vertex `i` at time `t` is
//!
//! ```text
//! z_i(t) = A * Re(c_i * e^(it)) = A * (real_i * cos(t) - imag_i * sin(t))
//! ```
//!
//! where `A` is the amplitude multiplier.

use failure::Fail;
use rayon::prelude::*;

use crate::math::{Pos3Like, PrimitiveFloat};


/// Below this number of vertices, the displacement is computed on the current
/// thread only.
pub const PARALLEL_THRESHOLD: usize = 18;


/// The buffer to displace has a different length than the wave field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
#[fail(display = "length mismatch: wave field has {} entries, buffer has {}", expected, found)]
pub struct LengthMismatch {
    pub expected: usize,
    pub found: usize,
}


/// `cos` and `sin` of a time value. Computed once per evaluation, not per
/// vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    cos: f32,
    sin: f32,
}

impl Phase {
    pub fn new(time: f32) -> Self {
        let (sin, cos) = time.sin_cos();
        Self { cos, sin }
    }

    /// `real * cos(t) - imag * sin(t)`
    #[inline(always)]
    pub fn weight(&self, real: f32, imag: f32) -> f32 {
        real * self.cos - imag * self.sin
    }
}


/// Per-vertex complex amplitudes, stored as two parallel arrays.
///
/// Both arrays always have the same length, which is the number of vertices
/// of the mesh the field belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveField {
    real: Vec<f32>,
    imag: Vec<f32>,
}

impl WaveField {
    /// Creates a field from the real and imaginary parts.
    pub fn new(real: Vec<f32>, imag: Vec<f32>) -> Result<Self, LengthMismatch> {
        if real.len() != imag.len() {
            return Err(LengthMismatch { expected: real.len(), found: imag.len() });
        }

        Ok(Self { real, imag })
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.real.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    pub fn real(&self) -> &[f32] {
        &self.real
    }

    pub fn imag(&self) -> &[f32] {
        &self.imag
    }

    /// Returns the displacement of a single vertex or `None` if `vertex` is
    /// out of bounds.
    pub fn displacement(&self, vertex: usize, phase: Phase, amplitude: f32) -> Option<f32> {
        let real = *self.real.get(vertex)?;
        let imag = self.imag[vertex];
        Some(amplitude * phase.weight(real, imag))
    }

    /// The largest modulus `|c_i|` of all amplitudes, i.e. the largest height
    /// any vertex reaches with an amplitude multiplier of 1.
    pub fn max_amplitude(&self) -> f32 {
        self.real.iter()
            .zip(&self.imag)
            .map(|(re, im)| re.hypot(*im))
            .fold(0.0, f32::max)
    }

    /// Adds the displacement at time `time` to the height of every position.
    ///
    /// This is additive: calling it twice on the same buffer doubles the
    /// displacement. The caller is responsible for resetting the heights to
    /// the rest shape before each evaluation.
    pub fn apply<P: Pos3Like>(
        &self,
        positions: &mut [P],
        time: f32,
        amplitude: f32,
    ) -> Result<(), LengthMismatch> {
        self.apply_phase(positions, Phase::new(time), amplitude)
    }

    /// Like [`WaveField::apply`], but with a precomputed phase.
    pub fn apply_phase<P: Pos3Like>(
        &self,
        positions: &mut [P],
        phase: Phase,
        amplitude: f32,
    ) -> Result<(), LengthMismatch> {
        if positions.len() != self.len() {
            return Err(LengthMismatch { expected: self.len(), found: positions.len() });
        }

        let displace = |(p, (&real, &imag)): (&mut P, (&f32, &f32))| {
            let offset = P::Scalar::from_f32(amplitude * phase.weight(real, imag));
            let z = p.z_mut();
            *z = *z + offset;
        };

        if positions.len() < PARALLEL_THRESHOLD {
            positions.iter_mut()
                .zip(self.real.iter().zip(&self.imag))
                .for_each(displace);
        } else {
            positions.par_iter_mut()
                .zip(self.real.par_iter().zip(self.imag.par_iter()))
                .for_each(displace);
        }

        Ok(())
    }
}
