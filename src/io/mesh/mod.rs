//! Reading the sectioned mesh description format.
//!
//! ```text
//! Vertices
//! <count>
//! <x> <y> <boundaryId>        (count times)
//! Triangles
//! <count>
//! <v1> <v2> <v3> <domainId>   (count times, 1-based vertex indices)
//! ```
//!
//! Other lines and sections (e.g. `MeshVersionFormatted`, `Dimension` or
//! `End` as written by common mesh generators) are ignored. Every section is
//! searched from the start of the file, so the order of sections does not
//! matter.

use std::{
    io::{BufRead, Seek},
    path::Path,
};

use cgmath::Point2;
use log::debug;

use crate::{
    handle::{hsize, VertexHandle},
    mesh::{Empty, MeshTopology, Triangle, Vertex},
};
use super::{
    open_with, Error, FsOpener, Opener,
    parse::{initial_capacity, Lines},
};


#[cfg(test)]
mod tests;


/// Tag of the vertex section.
pub const VERTICES_TAG: &str = "Vertices";

/// Tag of the triangle section.
pub const TRIANGLES_TAG: &str = "Triangles";


/// The element counts declared in the headers of a mesh file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: hsize,
    pub triangles: hsize,
}

impl MeshCounts {
    /// Number of loop slots needed for all triangles.
    pub fn loops(&self) -> usize {
        3 * self.triangles as usize
    }
}

/// A reader for mesh description files.
///
/// The individual sections can be read with [`Reader::read_counts`],
/// [`Reader::read_vertices`] and [`Reader::read_triangles`]; usually you want
/// [`Reader::read`] which does all of that.
pub struct Reader<R> {
    lines: Lines<R>,
    counts: Option<MeshCounts>,
}

impl Reader<Box<dyn super::Source>> {
    /// Opens the file at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::open_with(&FsOpener, path)
    }

    /// Opens `path` via the given opener.
    pub fn open_with(opener: &dyn Opener, path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::new(open_with(opener, path.as_ref())?))
    }
}

impl<R: BufRead + Seek> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Lines::new(reader),
            counts: None,
        }
    }

    /// Rewinds the stream and moves to the line after `tag`.
    fn locate(&mut self, tag: &'static str) -> Result<(), Error> {
        self.lines.rewind()?;
        if !self.lines.goto_section(tag)? {
            return Err(Error::MissingSection(tag));
        }

        Ok(())
    }

    /// Reads the vertex and triangle counts from the section headers.
    pub fn read_counts(&mut self) -> Result<MeshCounts, Error> {
        self.locate(VERTICES_TAG)?;
        let vertices = self.lines.count()?;

        self.locate(TRIANGLES_TAG)?;
        let triangles = self.lines.count()?;

        let counts = MeshCounts { vertices, triangles };
        self.counts = Some(counts);
        Ok(counts)
    }

    /// Reads all vertices into `topology`, replacing the ones it had before.
    ///
    /// If counts were read before, the count in the vertex section has to
    /// match them.
    pub fn read_vertices(&mut self, topology: &mut MeshTopology) -> Result<(), Error> {
        self.locate(VERTICES_TAG)?;
        let count = self.lines.count()?;
        self.check_count(self.counts.map(|c| c.vertices), count)?;

        let mut vertices = Vec::with_capacity(initial_capacity(count as usize));
        for _ in 0..count {
            let mut record = self.lines.record()?;
            let x = record.next("x coordinate")?;
            let y = record.next("y coordinate")?;
            let boundary_id = record.next("boundary id")?;
            record.finish()?;

            vertices.push(Vertex::new(Point2::new(x, y), boundary_id));
        }

        topology.vertices = vertices;
        Ok(())
    }

    /// Reads all triangles into `topology`, replacing the ones it had before.
    ///
    /// Vertex indices are converted from 1-based to 0-based. Indices are
    /// checked against the vertices already in `topology`, or against the
    /// declared vertex count if no vertices were read yet.
    pub fn read_triangles(&mut self, topology: &mut MeshTopology) -> Result<(), Error> {
        self.locate(TRIANGLES_TAG)?;
        let count = self.lines.count()?;
        self.check_count(self.counts.map(|c| c.triangles), count)?;

        let num_vertices = match (topology.vertices.is_empty(), self.counts) {
            (true, Some(counts)) => counts.vertices,
            _ => topology.num_vertices(),
        };

        let mut triangles = Vec::with_capacity(initial_capacity(count as usize));
        for _ in 0..count {
            let mut record = self.lines.record()?;
            let line = record.line();
            let mut vertices = [VertexHandle::from(0); 3];
            for v in &mut vertices {
                let index: u32 = record.next("vertex index")?;
                if index == 0 || index > num_vertices {
                    return Err(Error::IndexOutOfBounds { line, index, num_vertices });
                }
                *v = VertexHandle::from(index - 1);
            }
            let domain_id = record.next("domain id")?;
            record.finish()?;

            triangles.push(Triangle { vertices, domain_id });
        }

        topology.triangles = triangles;
        Ok(())
    }

    fn check_count(&self, expected: Option<hsize>, found: hsize) -> Result<(), Error> {
        match expected {
            Some(expected) if expected != found => Err(Error::CountMismatch {
                expected: expected as usize,
                found: found as usize,
            }),
            _ => Ok(()),
        }
    }

    /// Reads the whole mesh. Either everything is read successfully or an
    /// error is returned.
    pub fn read(mut self) -> Result<MeshTopology, Error> {
        let counts = self.read_counts()?;
        debug!(
            "mesh declares {} vertices and {} triangles",
            counts.vertices,
            counts.triangles,
        );

        let mut topology = MeshTopology::empty();
        self.read_vertices(&mut topology)?;
        self.read_triangles(&mut topology)?;

        Ok(topology)
    }
}

/// Reads the mesh file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<MeshTopology, Error> {
    Reader::open(path)?.read()
}

/// Reads the mesh at `path` via the given opener.
pub fn load_with(opener: &dyn Opener, path: impl AsRef<Path>) -> Result<MeshTopology, Error> {
    Reader::open_with(opener, path)?.read()
}
