//! Interactive entry point for the `city-planner` tool.

use std::io;
use std::process;

use clap::Parser;

use city_planner::cli::{Options, Session};
use city_planner::CityPlanner;

#[derive(Parser)]
#[command(
    name = "city-planner",
    version,
    about = "Smart City Route Planner: locations, roads and a sorted location index"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// Do not print the menu and prompts, e.g. when input is piped
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut planner = CityPlanner::new();
    let options = Options { quiet: cli.quiet };
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock(), options);
    if let Err(err) = session.run(&mut planner) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
