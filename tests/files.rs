//! Reading from the file system.

use std::fs;

use failure::Error;
use shoal::{
    DisplacementEvaluator, Outcome,
    geometry,
    io::{mesh, solution, FileFormat},
};


#[test]
fn load_mesh_and_solution_from_disk() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let mesh_path = dir.path().join("harbour.mesh");
    let sol_path = dir.path().join("harbour.sol");

    fs::write(&mesh_path, "Triangles\n1\n3 2 1 7\nVertices\n3\n0 0 1\n2 0 1\n0 2 1\n")?;
    fs::write(&sol_path, "0.1+0.2i\n0.3-0.4i\n0.5 0.6i\n")?;

    assert_eq!(FileFormat::from_extension(&mesh_path), Some(FileFormat::Mesh));
    assert_eq!(FileFormat::from_extension(&sol_path), Some(FileFormat::Solution));

    let topology = mesh::load(&mesh_path)?;
    assert_eq!(topology.num_vertices(), 3);
    assert_eq!(topology.triangles()[0].domain_id, 7);

    let field = solution::load(&sol_path, topology.num_vertices() as usize)?;
    assert_eq!(field.imag(), &[0.2, -0.4, 0.6]);

    let mut g = geometry::build(&mesh_path)?;
    let eval = DisplacementEvaluator::new(&sol_path);
    assert_eq!(eval.evaluate(g.positions_mut(), 0.0, 10.0), Outcome::Displaced);
    let heights = g.positions().iter().map(|p| p.z).collect::<Vec<_>>();
    assert_eq!(heights, [10.0 * 0.1, 10.0 * 0.3, 10.0 * 0.5]);

    Ok(())
}

#[test]
fn missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nothing.mesh");

    assert!(mesh::load(&path).unwrap_err().is_unavailable());
    assert!(solution::load(&path, 1).unwrap_err().is_unavailable());
    assert!(geometry::build(&path).unwrap_err().is_unavailable());

    let eval = DisplacementEvaluator::new(&path);
    let mut positions = [[0.0f32; 3]];
    assert_eq!(eval.evaluate(&mut positions, 0.0, 1.0), Outcome::NoField);
    assert!(eval.has_failed());
}

#[test]
fn solution_appearing_later_is_not_picked_up() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("late.sol");
    let eval = DisplacementEvaluator::new(&path);

    let mut positions = [[0.0f32; 3]];
    assert_eq!(eval.evaluate(&mut positions, 0.0, 1.0), Outcome::NoField);

    fs::write(&path, "1 0i\n")?;
    assert_eq!(eval.evaluate(&mut positions, 0.0, 1.0), Outcome::NoField);

    let mut fresh = eval.clone();
    fresh.reset();
    assert_eq!(fresh.evaluate(&mut positions, 0.0, 1.0), Outcome::Displaced);
    Ok(())
}
