use std::io::Cursor;

use failure::Error as AnyError;

use crate::{
    handle::{Handle, FaceHandle},
    mesh::{loop_range, Empty, MeshTopology},
};
use super::*;


fn reader(s: &'static str) -> Reader<Cursor<&'static [u8]>> {
    Reader::new(Cursor::new(s.as_bytes()))
}

fn indices(topology: &MeshTopology) -> Vec<[u32; 3]> {
    topology.triangles()
        .iter()
        .map(|t| [t.vertices[0].idx(), t.vertices[1].idx(), t.vertices[2].idx()])
        .collect()
}

#[test]
fn square() -> Result<(), AnyError> {
    let topology = Reader::new(include_test_file!("square.mesh")).read()?;

    assert_eq!(topology.num_vertices(), 4);
    assert_eq!(topology.num_triangles(), 2);

    let positions = topology.vertices()
        .iter()
        .map(|v| (v.position.x, v.position.y, v.position.z))
        .collect::<Vec<_>>();
    assert_eq!(positions, [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 1.0, 0.0), (0.0, 1.0, 0.0)]);

    let boundary_ids = topology.vertices().iter().map(|v| v.boundary_id).collect::<Vec<_>>();
    assert_eq!(boundary_ids, [1, 1, 2, 2]);

    assert_eq!(indices(&topology), [[0, 1, 2], [0, 2, 3]]);
    assert!(topology.triangles().iter().all(|t| t.domain_id == 0));

    Ok(())
}

#[test]
fn counts() -> Result<(), AnyError> {
    let mut reader = Reader::new(include_test_file!("square.mesh"));
    let counts = reader.read_counts()?;
    assert_eq!(counts, MeshCounts { vertices: 4, triangles: 2 });
    assert_eq!(counts.loops(), 6);
    Ok(())
}

#[test]
fn one_based_to_zero_based() -> Result<(), AnyError> {
    let topology = reader("Vertices\n3\n0 0 0\n1 0 0\n0 1 0\nTriangles\n1\n1 2 3 0\n").read()?;
    assert_eq!(indices(&topology), [[0, 1, 2]]);
    Ok(())
}

#[test]
fn section_order_is_irrelevant() -> Result<(), AnyError> {
    let a = Reader::new(include_test_file!("square.mesh")).read()?;
    let b = Reader::new(include_test_file!("square_reordered.mesh")).read()?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn loop_slots_of_parsed_triangles() -> Result<(), AnyError> {
    let topology = Reader::new(include_test_file!("square.mesh")).read()?;
    let loops = topology.loops().collect::<Vec<_>>();
    assert_eq!(loops.len(), 3 * topology.triangles().len());

    for (i, t) in topology.triangles().iter().enumerate() {
        let range = loop_range(FaceHandle::from_usize(i));
        assert_eq!(range, 3 * i..3 * i + 3);
        assert_eq!(&loops[range], &t.vertices);
    }
    assert!(topology.indices_in_bounds());
    Ok(())
}

#[test]
fn truncated_vertex_section_fails() {
    let res = Reader::new(include_test_file!("truncated.mesh")).read();
    match res {
        Err(Error::MalformedRecord { .. }) => {}
        other => panic!("expected malformed record, got {:?}", other),
    }
}

#[test]
fn truncated_at_eof_fails() {
    let res = reader("Triangles\n0\nVertices\n5\n0 0 1\n1 0 1\n1 1 2\n").read();
    match res {
        Err(Error::UnexpectedEof { line: 7 }) => {}
        other => panic!("expected EOF error, got {:?}", other),
    }
}

#[test]
fn huge_declared_counts_fail_at_eof() {
    let vertices = "Triangles\n0\nVertices\n4294967295\n0 0 0\n";
    match reader(vertices).read() {
        Err(Error::UnexpectedEof { line: 5 }) => {}
        other => panic!("expected EOF error, got {:?}", other),
    }

    let triangles = "Vertices\n3\n0 0 0\n1 0 0\n0 1 0\nTriangles\n4294967295\n1 2 3 0\n";
    match reader(triangles).read() {
        Err(Error::UnexpectedEof { line: 8 }) => {}
        other => panic!("expected EOF error, got {:?}", other),
    }
}

#[test]
fn missing_sections() {
    match reader("Vertices\n0\n").read() {
        Err(Error::MissingSection(TRIANGLES_TAG)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    match reader("Triangles\n0\n").read() {
        Err(Error::MissingSection(VERTICES_TAG)) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn malformed_records() {
    let cases = [
        // Unparsable count
        "Vertices\nthree\n0 0 0\nTriangles\n0\n",
        // Missing boundary id
        "Vertices\n1\n0 0\nTriangles\n0\n",
        // Float where an integer is expected
        "Vertices\n1\n0 0 1.5\nTriangles\n0\n",
        // Additional token
        "Vertices\n1\n0 0 1 9\nTriangles\n0\n",
        // Missing domain id
        "Vertices\n3\n0 0 0\n1 0 0\n0 1 0\nTriangles\n1\n1 2 3\n",
        // Negative index
        "Vertices\n3\n0 0 0\n1 0 0\n0 1 0\nTriangles\n1\n1 -2 3 0\n",
    ];

    for case in &cases {
        match reader(case).read() {
            Err(Error::MalformedRecord { .. }) => {}
            other => panic!("unexpected result for {:?}: {:?}", case, other),
        }
    }
}

#[test]
fn index_out_of_bounds() {
    let zero = "Vertices\n3\n0 0 0\n1 0 0\n0 1 0\nTriangles\n1\n0 1 2 0\n";
    match reader(zero).read() {
        Err(Error::IndexOutOfBounds { line: 8, index: 0, num_vertices: 3 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    let too_large = "Vertices\n3\n0 0 0\n1 0 0\n0 1 0\nTriangles\n1\n1 2 4 0\n";
    match reader(too_large).read() {
        Err(Error::IndexOutOfBounds { index: 4, .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn single_sections_without_counts() -> Result<(), AnyError> {
    let mut r = Reader::new(include_test_file!("square.mesh"));
    let mut topology = MeshTopology::empty();

    r.read_vertices(&mut topology)?;
    r.read_triangles(&mut topology)?;
    assert_eq!(topology.num_vertices(), 4);
    assert_eq!(topology.num_triangles(), 2);

    // Reading again replaces the data instead of appending.
    r.read_vertices(&mut topology)?;
    assert_eq!(topology.num_vertices(), 4);
    Ok(())
}

#[test]
fn failure_leaves_topology_untouched() {
    let mut r = reader("Vertices\n2\n0 0 0\nx\nTriangles\n0\n");
    let mut topology = MeshTopology::empty();
    assert!(r.read_vertices(&mut topology).is_err());
    assert_eq!(topology.num_vertices(), 0);
}

#[test]
fn blank_lines_and_crlf() -> Result<(), AnyError> {
    let topology = reader("Vertices\r\n\r\n2\r\n0 0 0\r\n\r\n1 0 0\r\nTriangles\r\n0\r\n").read()?;
    assert_eq!(topology.num_vertices(), 2);
    assert_eq!(topology.num_triangles(), 0);
    Ok(())
}

#[test]
fn missing_file() {
    match load("/this/file/does/not/exist.mesh") {
        Err(e) => assert!(e.is_unavailable()),
        Ok(_) => panic!("loading a missing file succeeded"),
    }
}
