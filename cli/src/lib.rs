use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use minefield_core::{Frontend, GameSession, SeedError, SessionState, load_seed};

pub use terminal::*;

pub mod art;
mod terminal;

pub const USAGE: &str = "Usage: minefield SEED_FILE_PATH";

/// Exit status for a bad command line or a failure outside the game rules.
pub const EXIT_USAGE: u8 = 1;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed file describing the mine field
    #[arg(value_name = "SEED_FILE_PATH")]
    pub seed: PathBuf,

    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/// Routes `log` records from every crate to stderr at the requested level.
pub fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = verbose.tracing_level_filter();
    // a second game in the same process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .try_init();
}

/// Loads the seed and plays one game on `frontend`.
pub fn play<F: Frontend + ?Sized>(seed: &Path, frontend: &mut F) -> anyhow::Result<SessionState> {
    let config = load_seed(seed)?;
    let mut session = GameSession::new(&config);
    let state = session
        .run(frontend)
        .context("Lost contact with the terminal")?;
    Ok(state)
}

/// Prints `err` and picks the matching exit status.
pub fn report(err: &anyhow::Error, stderr: &mut impl Write) -> u8 {
    match err.downcast_ref::<SeedError>() {
        Some(seed_err) => {
            let _ = writeln!(stderr);
            let _ = writeln!(stderr, "{seed_err}");
            seed_err.exit_code()
        }
        None => {
            let _ = writeln!(stderr, "error: {err:#}");
            EXIT_USAGE
        }
    }
}

/// Whole program behind `main`, returning the process exit status.
pub fn run<I, T>(argv: I, input: impl BufRead, mut out: impl Write, mut err: impl Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(clap_err)
            if matches!(
                clap_err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = write!(out, "{}", clap_err.render());
            return 0;
        }
        Err(clap_err) => {
            let _ = write!(err, "{}", clap_err.render());
            let _ = writeln!(err, "{USAGE}");
            return EXIT_USAGE;
        }
    };

    init_logging(&args.verbose);
    log::debug!("Starting with seed {}", args.seed.display());

    let mut terminal = Terminal::new(input, out, &mut err);
    match play(&args.seed, &mut terminal) {
        Ok(state) => {
            log::debug!("Exiting after {state:?}");
            0
        }
        Err(run_err) => {
            drop(terminal);
            report(&run_err, &mut err)
        }
    }
}
