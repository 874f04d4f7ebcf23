use failure::Error;
use structopt::StructOpt;

#[macro_use]
mod ui;

mod args;
mod commands;

use crate::{
    args::{Args, Command},
};


/// Errors are only reported here, the actual work happens in `run()`.
fn main() {
    if let Err(e) = run() {
        ui::report_error(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let args = Args::from_args();
    let global_args = &args.global;
    ui::init_logger(global_args.verbose)?;

    match &args.command {
        Command::Info { args } => {
            commands::info::run(&global_args, args)?;
        }
        Command::Displace { args } => {
            commands::displace::run(&global_args, args)?;
        }
    }

    Ok(())
}
