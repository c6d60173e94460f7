use clap::Parser;
use log::{debug, info};
use std::error::Error;

mod args;
mod dash;

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let args = args::Args::parse();
    init_logging(args.verbose);
    debug!("args: {:?}", args);

    let res = dash::run_dashboard(&args);

    if let Err(e) = res {
        eprintln!("Data error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
    info!("Done");
}
