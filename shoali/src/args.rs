//! Defines `Args` which is used to parse command line arguments.

use structopt::StructOpt;


#[derive(StructOpt, Debug)]
#[structopt(raw(setting = "structopt::clap::AppSettings::VersionlessSubcommands"))]
pub struct Args {
    #[structopt(flatten)]
    pub global: GlobalArgs,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub struct GlobalArgs {
    /// Show log messages of the library. Pass once for debug messages, twice
    /// for everything.
    #[structopt(
        short = "-v",
        long = "--verbose",
        parse(from_occurrences),
    )]
    pub verbose: u64,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Print information about a mesh file and optionally a matching
    /// solution file.
    #[structopt(name = "info")]
    Info {
        #[structopt(flatten)]
        args: InfoArgs,
    },

    /// Evaluates the wave displacement and writes the displaced mesh as PLY
    /// file(s).
    #[structopt(name = "displace")]
    Displace {
        #[structopt(flatten)]
        args: DisplaceArgs,
    },
}

#[derive(StructOpt, Debug)]
pub struct InfoArgs {
    /// Path to the mesh file.
    pub mesh: String,

    /// Path to a solution file. If given, it is read for the number of
    /// vertices in the mesh and checked.
    #[structopt(short = "-s", long = "--solution")]
    pub solution: Option<String>,
}

#[derive(StructOpt, Debug)]
pub struct DisplaceArgs {
    /// Path to the mesh file.
    pub mesh: String,

    /// Path to the solution file with one complex amplitude per vertex.
    pub solution: String,

    /// Path to the target PLY file. If more than one frame is written, the
    /// frame number is appended to the file stem (`out.ply` becomes
    /// `out_0000.ply`, `out_0001.ply`, ...).
    #[structopt(short = "-o", long = "--output")]
    pub output: String,

    /// The time (phase) of the first frame.
    #[structopt(short = "-t", long = "--time", default_value = "1.0")]
    pub time: f32,

    /// Multiplier for all displacements.
    #[structopt(short = "-a", long = "--amplitude", default_value = "1.0")]
    pub amplitude: f32,

    /// Number of frames to write.
    #[structopt(long = "--frames", default_value = "1")]
    pub frames: u32,

    /// Time difference between two frames.
    #[structopt(long = "--time-step", default_value = "0.1")]
    pub time_step: f32,

    /// Accept solution files with more records than the mesh has vertices.
    #[structopt(long = "--lenient")]
    pub lenient: bool,

    /// Overwrite existing target files.
    #[structopt(short = "-f", long = "--force")]
    pub force: bool,
}
