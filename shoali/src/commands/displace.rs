use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use failure::{Error, ResultExt};
use shoal::{
    Geometry, Handle, Phase,
    geometry,
    io::{solution, FileFormat},
};

use crate::{
    args::{DisplaceArgs, GlobalArgs},
    commands::{check_extension, check_target},
    ui,
};


pub fn run(_global_args: &GlobalArgs, args: &DisplaceArgs) -> Result<(), Error> {
    let targets = (0..args.frames)
        .map(|frame| target_path(&args.output, frame, args.frames))
        .collect::<Vec<_>>();
    for target in &targets {
        check_target(&target.to_string_lossy(), args.force)?;
    }

    check_extension(&args.mesh, FileFormat::Mesh);
    check_extension(&args.solution, FileFormat::Solution);

    let rest = ui::progress(format!("Reading '{}'", args.mesh), || geometry::build(&args.mesh))
        .context(format!("failed to read mesh '{}'", args.mesh))?;

    let field = ui::progress(format!("Reading '{}'", args.solution), || {
        solution::Reader::open(&args.solution)?
            .strict(!args.lenient)
            .read(rest.positions().len())
    }).context(format!("failed to read solution '{}'", args.solution))?;
    info!(
        "Largest height reached with amplitude {}: {}",
        args.amplitude,
        args.amplitude * field.max_amplitude(),
    );

    let before = Instant::now();
    for (frame, target) in targets.iter().enumerate() {
        let frame = frame as u32;
        let time = args.time + frame as f32 * args.time_step;

        let mut geometry = rest.clone();
        geometry.reset_heights();
        field.apply_phase(geometry.positions_mut(), Phase::new(time), args.amplitude)?;

        let msg = format!(
            "{}Writing '{}' (t = {})",
            ui::frame_label(frame, args.frames),
            target.display(),
            time,
        );
        ui::progress(msg, || write_ply(&geometry, target))
            .context(format!("failed to write '{}'", target.display()))?;
    }

    if args.frames > 1 {
        info!(
            "Wrote {} frames in {}",
            args.frames,
            ui::fmt_duration(before.elapsed()),
        );
    }

    Ok(())
}

/// With more than one frame, the frame number is appended to the file stem.
fn target_path(output: &str, frame: u32, frames: u32) -> PathBuf {
    let path = Path::new(output);
    if frames <= 1 {
        return path.to_owned();
    }

    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let mut name = format!("{}_{:04}", stem, frame);
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}

/// Writes the geometry as ASCII PLY file.
fn write_ply(geometry: &Geometry, path: &Path) -> Result<(), io::Error> {
    let mut w = BufWriter::new(File::create(path)?);
    write_ply_to(geometry, &mut w)?;
    w.flush()
}

fn write_ply_to(geometry: &Geometry, w: &mut impl Write) -> Result<(), io::Error> {
    writeln!(w, "ply")?;
    writeln!(w, "format ascii 1.0")?;
    writeln!(w, "comment written by shoali")?;
    writeln!(w, "element vertex {}", geometry.num_vertices())?;
    writeln!(w, "property float x")?;
    writeln!(w, "property float y")?;
    writeln!(w, "property float z")?;
    writeln!(w, "element face {}", geometry.num_polygons())?;
    writeln!(w, "property list uchar uint vertex_indices")?;
    writeln!(w, "end_header")?;

    for p in geometry.positions() {
        writeln!(w, "{} {} {}", p.x, p.y, p.z)?;
    }

    for vertices in geometry.polygon_loops() {
        write!(w, "{}", vertices.len())?;
        for v in vertices {
            write!(w, " {}", v.idx())?;
        }
        writeln!(w)?;
    }

    Ok(())
}
