use std::ops::Range;

use cgmath::{Point2, Point3};

use crate::handle::{hsize, FaceHandle, Handle, VertexHandle};


pub trait Empty {
    /// Returns an empty value of this type.
    fn empty() -> Self;
}

/// A vertex as stored in the mesh file: a 2D position on the water surface
/// plus the boundary classification assigned by the mesh generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// The position. `z` is always 0 after loading.
    pub position: Point3<f32>,
    pub boundary_id: i32,
}

impl Vertex {
    /// Creates a vertex at height 0.
    pub fn new(position: Point2<f32>, boundary_id: i32) -> Self {
        Self {
            position: Point3::new(position.x, position.y, 0.0),
            boundary_id,
        }
    }
}

/// A triangle with 0-based vertex handles and its domain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub vertices: [VertexHandle; 3],
    pub domain_id: i32,
}

/// Returns the loop slots occupied by the given triangle: triangle `i` owns
/// the slots `3i`, `3i + 1` and `3i + 2`.
pub fn loop_range(face: FaceHandle) -> Range<usize> {
    let start = 3 * face.to_usize();
    start..start + 3
}

/// An indexed triangle soup, as read from a mesh file.
///
/// All vertex handles stored in `triangles` are valid indices into
/// `vertices`. The readers in [`io::mesh`][crate::io::mesh] check this before
/// handing out a topology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshTopology {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) triangles: Vec<Triangle>,
}

impl Empty for MeshTopology {
    fn empty() -> Self {
        Self::default()
    }
}

impl MeshTopology {
    pub fn num_vertices(&self) -> hsize {
        self.vertices.len() as hsize
    }

    pub fn num_triangles(&self) -> hsize {
        self.triangles.len() as hsize
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex(&self, v: VertexHandle) -> Option<&Vertex> {
        self.vertices.get(v.to_usize())
    }

    pub fn triangle(&self, f: FaceHandle) -> Option<&Triangle> {
        self.triangles.get(f.to_usize())
    }

    /// Iterates over the vertex handles of all loop slots in order. The
    /// `k`-th item is the vertex referenced by loop slot `k`.
    pub fn loops(&self) -> impl Iterator<Item = VertexHandle> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.iter().cloned())
    }

    /// Returns the rest positions of all vertices (with `z = 0`).
    pub fn rest_positions(&self) -> Vec<Point3<f32>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Returns `true` if every triangle only references existing vertices.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.num_vertices();
        self.triangles.iter().all(|t| t.vertices.iter().all(|v| v.idx() < n))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> MeshTopology {
        let vertices = (0..4)
            .map(|i| Vertex::new(Point2::new(i as f32, 0.0), 0))
            .collect();
        let v = VertexHandle::new;
        MeshTopology {
            vertices,
            triangles: vec![
                Triangle { vertices: [v(0), v(1), v(2)], domain_id: 1 },
                Triangle { vertices: [v(2), v(1), v(3)], domain_id: 1 },
            ],
        }
    }

    #[test]
    fn loop_slots() {
        assert_eq!(loop_range(FaceHandle::new(0)), 0..3);
        assert_eq!(loop_range(FaceHandle::new(5)), 15..18);

        let topo = two_triangles();
        let loops = topo.loops().map(|v| v.idx()).collect::<Vec<_>>();
        assert_eq!(loops, [0, 1, 2, 2, 1, 3]);
        assert_eq!(&loops[loop_range(FaceHandle::new(1))], &[2, 1, 3]);
    }

    #[test]
    fn bounds_check() {
        let mut topo = two_triangles();
        assert!(topo.indices_in_bounds());

        topo.triangles[1].vertices[2] = VertexHandle::new(4);
        assert!(!topo.indices_in_bounds());
    }

    #[test]
    fn rest_positions_are_flat() {
        let topo = two_triangles();
        assert!(topo.rest_positions().iter().all(|p| p.z == 0.0));
        assert_eq!(topo.vertex(VertexHandle::new(3)).map(|v| v.position.x), Some(3.0));
        assert_eq!(topo.vertex(VertexHandle::new(4)), None);
    }
}
