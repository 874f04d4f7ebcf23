//! Synthesizing renderable geometry from a parsed mesh topology.
//!
//! A [`Geometry`] is the minimal mesh container a host needs: vertex
//! positions, corner loops, triangle polygons pointing into the loops, an
//! origin index per polygon, the derived edges and vertex normals.

use std::path::Path;

use cgmath::{InnerSpace, Point3, Vector3};
use fxhash::FxHashSet;
use log::debug;

use crate::{
    handle::{hsize, FaceHandle, Handle, VertexHandle},
    io::{self, mesh::Reader, FsOpener, Opener},
    mesh::{Empty, MeshTopology},
};


/// A polygon as a range of loop slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Polygon {
    pub loop_start: u32,
    pub loop_count: u32,
}

/// An undirected edge; the smaller vertex handle comes first.
pub type Edge = [VertexHandle; 2];

/// Mesh geometry as handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<Point3<f32>>,
    loops: Vec<VertexHandle>,
    polygons: Vec<Polygon>,
    origin_index: Vec<Option<FaceHandle>>,
    edges: Vec<Edge>,
    normals: Vec<Vector3<f32>>,
    normals_dirty: bool,
}

impl Empty for Geometry {
    fn empty() -> Self {
        Self {
            positions: vec![],
            loops: vec![],
            polygons: vec![],
            origin_index: vec![],
            edges: vec![],
            normals: vec![],
            normals_dirty: false,
        }
    }
}

impl Geometry {
    /// Builds geometry from the topology: every triangle `i` becomes a
    /// polygon owning the loop slots `3i..3i + 3`. All heights are 0, edges
    /// are computed and normals are marked dirty.
    pub fn from_topology(topology: &MeshTopology) -> Self {
        let num_triangles = topology.triangles().len();

        let mut out = Self {
            positions: topology.rest_positions(),
            loops: topology.loops().collect(),
            polygons: (0..num_triangles as u32)
                .map(|i| Polygon { loop_start: 3 * i, loop_count: 3 })
                .collect(),
            origin_index: vec![None; num_triangles],
            edges: vec![],
            normals: vec![],
            normals_dirty: true,
        };
        out.calc_edges();
        out
    }

    /// Geometry without any faces, e.g. a point cloud supplied by the host.
    pub fn from_positions(positions: Vec<Point3<f32>>) -> Self {
        Self {
            positions,
            normals_dirty: true,
            .. Self::empty()
        }
    }

    pub fn num_vertices(&self) -> hsize {
        self.positions.len() as hsize
    }

    pub fn num_polygons(&self) -> hsize {
        self.polygons.len() as hsize
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    /// Mutable access to the positions. Marks the normals as dirty.
    pub fn positions_mut(&mut self) -> &mut [Point3<f32>] {
        self.normals_dirty = true;
        &mut self.positions
    }

    pub fn loops(&self) -> &[VertexHandle] {
        &self.loops
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The polygon this polygon was derived from in some earlier mesh.
    /// Always `None` for freshly synthesized geometry.
    pub fn origin_index(&self) -> &[Option<FaceHandle>] {
        &self.origin_index
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertices of the given polygon, in loop order. Returns `None` if the
    /// polygon does not exist.
    pub fn polygon_vertices(&self, face: FaceHandle) -> Option<&[VertexHandle]> {
        self.polygons.get(face.to_usize()).map(|p| self.polygon_loop(p))
    }

    /// Iterates over the loop slices of all polygons.
    pub fn polygon_loops(&self) -> impl Iterator<Item = &[VertexHandle]> + '_ {
        self.polygons.iter().map(move |p| self.polygon_loop(p))
    }

    fn polygon_loop(&self, p: &Polygon) -> &[VertexHandle] {
        let start = p.loop_start as usize;
        &self.loops[start..start + p.loop_count as usize]
    }

    /// Sets the height of all vertices to 0.
    pub fn reset_heights(&mut self) {
        for p in self.positions_mut() {
            p.z = 0.0;
        }
    }

    /// Recomputes the unique undirected edges from the polygon loops. Edges
    /// are ordered by first appearance.
    pub fn calc_edges(&mut self) {
        let mut seen = FxHashSet::default();
        let mut edges = Vec::new();

        for vertices in self.polygon_loops() {
            for (i, &a) in vertices.iter().enumerate() {
                let b = vertices[(i + 1) % vertices.len()];
                let edge = if a < b { [a, b] } else { [b, a] };
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        }

        debug!("calculated {} edges", edges.len());
        self.edges = edges;
    }

    /// Returns `true` if positions changed since normals were last computed.
    pub fn normals_dirty(&self) -> bool {
        self.normals_dirty
    }

    /// Computes area weighted vertex normals. Vertices that are not part of
    /// any non-degenerate polygon get the normal `+z`.
    pub fn vertex_normals(&self) -> Vec<Vector3<f32>> {
        let mut normals = vec![Vector3::new(0.0, 0.0, 0.0); self.positions.len()];
        for vertices in self.polygon_loops() {
            if let [a, b, c] = *vertices {
                let pa = self.positions[a.to_usize()];
                let pb = self.positions[b.to_usize()];
                let pc = self.positions[c.to_usize()];
                let n = (pb - pa).cross(pc - pa);
                for v in &[a, b, c] {
                    normals[v.to_usize()] += n;
                }
            }
        }

        for n in &mut normals {
            *n = if n.magnitude2() > 0.0 {
                n.normalize()
            } else {
                Vector3::unit_z()
            };
        }
        normals
    }

    /// Returns the normals, recomputing them if they are dirty.
    pub fn recalc_normals(&mut self) -> &[Vector3<f32>] {
        if self.normals_dirty || self.normals.len() != self.positions.len() {
            self.normals = self.vertex_normals();
            self.normals_dirty = false;
        }
        &self.normals
    }
}

/// Reads the mesh file at `path` and builds geometry from it.
pub fn build(path: impl AsRef<Path>) -> Result<Geometry, io::Error> {
    build_with(&FsOpener, path)
}

/// Like [`build`], but opens the file via the given opener.
pub fn build_with(opener: &dyn Opener, path: impl AsRef<Path>) -> Result<Geometry, io::Error> {
    let topology = Reader::open_with(opener, path)?.read()?;
    Ok(Geometry::from_topology(&topology))
}


#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn square() -> Geometry {
        let topology = Reader::new(include_test_file!("square.mesh")).read().unwrap();
        Geometry::from_topology(&topology)
    }

    #[test]
    fn polygons_and_loops() {
        let g = square();
        assert_eq!(g.num_vertices(), 4);
        assert_eq!(g.num_polygons(), 2);
        assert_eq!(g.loops().len(), 6);
        for (i, p) in g.polygons().iter().enumerate() {
            assert_eq!(*p, Polygon { loop_start: 3 * i as u32, loop_count: 3 });
        }
        assert_eq!(g.origin_index(), &[None, None]);
        assert!(g.normals_dirty());

        let v = |i| VertexHandle::new(i);
        assert_eq!(g.polygon_vertices(FaceHandle::new(1)), Some(&[v(0), v(2), v(3)][..]));
    }

    #[test]
    fn polygon_vertices_out_of_range() {
        let g = square();
        assert_eq!(g.polygon_vertices(FaceHandle::new(2)), None);
        assert_eq!(Geometry::empty().polygon_vertices(FaceHandle::new(0)), None);
        assert_eq!(g.polygon_loops().count(), 2);
    }

    #[test]
    fn edges() {
        let g = square();
        let v = |i| VertexHandle::new(i);
        assert_eq!(g.edges(), &[
            [v(0), v(1)],
            [v(1), v(2)],
            [v(0), v(2)],
            [v(2), v(3)],
            [v(0), v(3)],
        ]);
    }

    #[test]
    fn normals_of_flat_mesh() {
        let mut g = square();
        assert!(g.recalc_normals().iter().all(|n| *n == Vector3::unit_z()));
        assert!(!g.normals_dirty());

        g.positions_mut()[2].z = 1.0;
        assert!(g.normals_dirty());
        let normals = g.recalc_normals().to_vec();
        assert!(normals.iter().all(|n| (n.magnitude() - 1.0).abs() < 1e-6));
        assert!(normals[2] != Vector3::unit_z());
    }

    #[test]
    fn reset_heights() {
        let mut g = square();
        for p in g.positions_mut() {
            p.z = 5.0;
        }
        g.reset_heights();
        assert!(g.positions().iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn isolated_vertex_gets_up_normal() {
        let topology = Reader::new(Cursor::new(
            &b"Vertices\n4\n0 0 0\n1 0 0\n0 1 0\n9 9 0\nTriangles\n1\n1 2 3 0\n"[..]
        )).read().unwrap();
        let g = Geometry::from_topology(&topology);
        assert_eq!(g.vertex_normals()[3], Vector3::unit_z());
        assert_eq!(g.edges().len(), 3);
    }

    #[test]
    fn build_from_opener() {
        let opener = io::MemOpener::new()
            .with_file("square.mesh", &include_bytes!("io/test_files/square.mesh")[..]);
        assert_eq!(build_with(&opener, "square.mesh").unwrap(), square());
        assert!(build_with(&opener, "other.mesh").unwrap_err().is_unavailable());
    }
}
