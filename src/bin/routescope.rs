//! routescope: list the routes of a dumped router stack.
//!
//! Run with:
//!   RUST_LOG=debug routescope dump.json --prefix /api --protect requireAuth
//!
//! Pass `-` as the dump to read it from stdin.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use routescope::{DiscoverOptions, Error, Format, print_routes};
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "routescope", version)]
#[command(about = "List the HTTP routes registered in a dumped router stack", long_about = None)]
struct Cli {
    /// JSON dump of the application's router stack, or `-` for stdin
    dump: PathBuf,

    /// Keep routes with a path segment equal to TOKEN (repeatable)
    #[arg(short, long = "domain", value_name = "TOKEN")]
    domains: Vec<String>,

    /// Keep routes whose path starts with PREFIX
    #[arg(short, long)]
    prefix: Option<String>,

    /// Keep unprotected routes only
    #[arg(short, long)]
    unprotected_only: bool,

    /// Middleware name that marks a route as protected (repeatable)
    #[arg(long = "protect", value_name = "NAME")]
    protect: Vec<String>,

    /// JSON settings file; command-line flags extend it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Never colour the table, even on a terminal
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut options = match &cli.config {
        Some(path) => DiscoverOptions::from_reader(BufReader::new(File::open(path)?))?,
        None => DiscoverOptions::new(),
    };
    options.domain_filter.extend(cli.domains);
    options.protection_middleware_names.extend(cli.protect);
    if cli.prefix.is_some() {
        options.path_prefix = cli.prefix;
    }
    options.show_unprotected_only |= cli.unprotected_only;

    let app = read_dump(&cli.dump)?;
    let format = if cli.json {
        Format::Json
    } else if !cli.no_color && io::stdout().is_terminal() {
        Format::Colored
    } else {
        Format::Table
    };

    let count = print_routes(&app, &options, format, io::stdout().lock())?;
    info!(count, "listed routes");
    Ok(())
}

fn read_dump(path: &Path) -> Result<Value, Error> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(serde_json::from_str(&text)?);
    }
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}
