//! Abstractions over numerical types and position-like types.
//!
//! The displacement engine writes into vertex buffers owned by someone else.
//! Those buffers can use `cgmath` points, plain arrays or tuples, so
//! everything here is expressed via the [`Pos3Like`] trait.

use std::fmt::Debug;

use cgmath::Point3;
use num_traits::Float;


/// Floating point scalar types positions can be made of (`f32` and `f64`).
pub trait PrimitiveFloat: 'static + Float + Debug + Send + Sync {
    /// Converts an `f32` into this type. Lossless for both implementors.
    fn from_f32(v: f32) -> Self;
}

impl PrimitiveFloat for f32 {
    fn from_f32(v: f32) -> Self {
        v
    }
}

impl PrimitiveFloat for f64 {
    fn from_f32(v: f32) -> Self {
        v.into()
    }
}


/// Types that can be interpreted to represent some kind of 3D position.
///
/// This type is implemented for strongly typed "position"-types, like
/// `cgmath::Point3`, as well as for generic "weaker" types such as tuples
/// `(T, T, T)` and arrays `[T; 3]`. However, to avoid logic errors, you should
/// try to use strong types to represent points in 3D space instead of simple
/// tuples.
pub trait Pos3Like: Copy + Send + Sync {
    /// The type of each component.
    type Scalar: PrimitiveFloat;

    /// Creates the position type from the given three scalar values.
    fn from_coords(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar) -> Self;

    /// Returns the `x` component of this position.
    fn x(&self) -> Self::Scalar;

    /// Returns the `y` component of this position.
    fn y(&self) -> Self::Scalar;

    /// Returns the `z` component of this position.
    fn z(&self) -> Self::Scalar;

    /// Returns a mutable reference to the `z` component. The height is the
    /// only component that is ever changed by the displacement engine.
    fn z_mut(&mut self) -> &mut Self::Scalar;

    fn to_point3(self) -> Point3<Self::Scalar> {
        Point3::new(self.x(), self.y(), self.z())
    }
}

impl<T: PrimitiveFloat> Pos3Like for Point3<T> {
    type Scalar = T;
    fn from_coords(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar) -> Self {
        Self::new(x, y, z)
    }
    fn x(&self) -> Self::Scalar { self.x }
    fn y(&self) -> Self::Scalar { self.y }
    fn z(&self) -> Self::Scalar { self.z }
    fn z_mut(&mut self) -> &mut Self::Scalar { &mut self.z }
}

impl<T: PrimitiveFloat> Pos3Like for (T, T, T) {
    type Scalar = T;
    fn from_coords(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar) -> Self {
        (x, y, z)
    }
    fn x(&self) -> Self::Scalar { self.0 }
    fn y(&self) -> Self::Scalar { self.1 }
    fn z(&self) -> Self::Scalar { self.2 }
    fn z_mut(&mut self) -> &mut Self::Scalar { &mut self.2 }
}

impl<T: PrimitiveFloat> Pos3Like for [T; 3] {
    type Scalar = T;
    fn from_coords(x: Self::Scalar, y: Self::Scalar, z: Self::Scalar) -> Self {
        [x, y, z]
    }
    fn x(&self) -> Self::Scalar { self[0] }
    fn y(&self) -> Self::Scalar { self[1] }
    fn z(&self) -> Self::Scalar { self[2] }
    fn z_mut(&mut self) -> &mut Self::Scalar { &mut self[2] }
}
