use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lsdeps::config::{InclusionMask, ListerConfig, Verbosity};
use lsdeps::lister::{self, ListError};
use lsdeps::logging;
use lsdeps::parser::DependencyType;

#[derive(Parser)]
#[command(name = "lsdeps")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "List the dependencies declared in a package.json", long_about = None)]
struct Cli {
    /// Package directory containing package.json (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Only list these categories: prod, dev, peer, optional, bundled
    #[arg(short, long, value_name = "CATEGORY", value_delimiter = ',')]
    include: Vec<DependencyType>,

    /// Leave out these categories
    #[arg(short, long, value_name = "CATEGORY", value_delimiter = ',')]
    omit: Vec<DependencyType>,

    /// Log each category as it is loaded
    #[arg(short, long)]
    verbose: bool,

    /// Print nothing but dependency names
    #[arg(short, long, conflicts_with_all = ["verbose", "debug"])]
    silent: bool,

    /// Trace-level logging and full error detail
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> ListerConfig {
        ListerConfig {
            include: InclusionMask::from_selection(&self.include, &self.omit),
            verbosity: Verbosity::from_flags(self.verbose, self.silent, self.debug),
            package_dir: self.path,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let config = Cli::parse().into_config();
    logging::init(config.verbosity)?;

    let stdout = io::stdout();
    match lister::list(&config, &mut stdout.lock()) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(ListError::Output(err)) => {
            tracing::debug!(error = %err, "output closed");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            lister::report_to_stderr(&err, config.verbosity);
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
