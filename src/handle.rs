//! Handles to refer to mesh elements.
//!
//! A handle is a thin wrapper around an index into the element arrays of a
//! [`MeshTopology`][crate::MeshTopology] or [`Geometry`][crate::Geometry].
//! Handles are always 0-based, even though the mesh file format stores
//! 1-based vertex indices.

use std::fmt;

use derive_more::{From, Into};
use static_assertions::assert_eq_size;


/// The integer type used inside all handles.
#[allow(non_camel_case_types)]
pub type hsize = u32;

/// Types that are handles to some mesh element.
pub trait Handle: Copy + fmt::Debug + Eq + Ord + std::hash::Hash {
    /// Creates a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of the element referred to by this handle.
    fn idx(&self) -> hsize;

    /// Creates a handle from a `usize` index. Panics if the index does not
    /// fit into `hsize`.
    fn from_usize(raw: usize) -> Self {
        assert!(raw <= hsize::max_value() as usize, "handle index overflow");
        Self::new(raw as hsize)
    }

    /// Returns the index as `usize`, e.g. to index into a slice.
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident, $short:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(idx: hsize) -> Self {
                $name(idx)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.0)
            }
        }
    }
}

make_handle_type!(
    /// A handle to a vertex.
    VertexHandle, "V"
);
make_handle_type!(
    /// A handle to a face (always a triangle in this crate).
    FaceHandle, "F"
);

assert_eq_size!(VertexHandle, hsize);
assert_eq_size!(FaceHandle, hsize);
