use std::collections::BTreeSet;

use failure::{Error, ResultExt};
use term_painter::{Color, ToStyle};
use shoal::{
    Geometry, MeshTopology, WaveField,
    io::{mesh, solution, FileFormat},
};

use crate::{
    args::{GlobalArgs, InfoArgs},
    commands::check_extension,
    ui,
};


pub fn run(_global_args: &GlobalArgs, args: &InfoArgs) -> Result<(), Error> {
    check_extension(&args.mesh, FileFormat::Mesh);
    let topology = ui::progress(format!("Reading '{}'", args.mesh), || mesh::load(&args.mesh))
        .context(format!("failed to read mesh '{}'", args.mesh))?;
    let geometry = Geometry::from_topology(&topology);

    let field = match &args.solution {
        Some(path) => {
            check_extension(path, FileFormat::Solution);
            let field = ui::progress(format!("Reading '{}'", path), || {
                solution::load(path, topology.vertices().len())
            });
            Some(field.context(format!("failed to read solution '{}'", path))?)
        }
        None => None,
    };

    println!();
    print_mesh_info(&topology, &geometry);
    if let Some(field) = &field {
        print_solution_info(field);
    }

    Ok(())
}

fn print_line(label: &str, value: impl std::fmt::Display) {
    println!(
        "  {: <16} {}",
        Color::White.bold().paint(label),
        Color::BrightWhite.paint(value),
    );
}

fn print_mesh_info(topology: &MeshTopology, geometry: &Geometry) {
    let count = |n: usize| Color::Green.bold().paint(ui::fmt_with_thousand_sep(n as u64));

    print_line("vertices", count(topology.vertices().len()));
    print_line("triangles", count(topology.triangles().len()));
    print_line("edges", count(geometry.edges().len()));

    let positions = geometry.positions();
    if !positions.is_empty() {
        let (mut min_x, mut min_y) = (positions[0].x, positions[0].y);
        let (mut max_x, mut max_y) = (min_x, min_y);
        for p in positions {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        print_line("bounds x", format!("{} .. {}", min_x, max_x));
        print_line("bounds y", format!("{} .. {}", min_y, max_y));
    }

    let boundary_ids = topology.vertices().iter().map(|v| v.boundary_id).collect::<BTreeSet<_>>();
    let domain_ids = topology.triangles().iter().map(|t| t.domain_id).collect::<BTreeSet<_>>();
    print_line("boundary ids", id_list(&boundary_ids));
    print_line("domain ids", id_list(&domain_ids));
}

fn print_solution_info(field: &WaveField) {
    print_line("max amplitude", field.max_amplitude());
}

fn id_list(ids: &BTreeSet<i32>) -> String {
    if ids.is_empty() {
        return "-".into();
    }

    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}
