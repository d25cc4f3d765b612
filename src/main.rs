mod args;
mod lookup;

use clap::Parser;
use log::{debug, warn};

use crate::args::Args;
use crate::lookup::io_common::describe_error;
use crate::lookup::{run_lookup, RunStatus};

fn main() {
    let args = Args::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
    debug!("args: {:?}", args);

    let code = match run_lookup(&args) {
        Ok(RunStatus::Done) => 0,
        Ok(RunStatus::LoadFailed) | Ok(RunStatus::NoRecords) => 1,
        Ok(RunStatus::MissingInput) => 2,
        Err(e) => {
            warn!("Error occured {:?}", e);
            eprintln!("An error occured: {}", describe_error(&e));
            1
        }
    };
    std::process::exit(code);
}
