use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::{ArgAction, Parser};
use fast_password::{GenerateError, PasswordSpec};
use rand::rngs::OsRng;
use tracing::{debug, info, Level};

mod auto;

const DEFAULT_LENGTH: i64 = 8;

/// Generate a secure random password.
#[derive(Debug, Parser)]
#[command(name = "fast-pass", version, allow_negative_numbers = true)]
pub(crate) struct Args {
    /// Length of password. [default: 8]
    #[arg(short, long)]
    pub(crate) length: Option<i64>,
    /// Password can contain uppercase chars.
    #[arg(short, long)]
    pub(crate) upper: bool,
    /// Password can contain digits.
    #[arg(short, long)]
    pub(crate) nums: bool,
    /// Password can contain special chars.
    #[arg(short, long)]
    pub(crate) special: bool,
    /// Exclude chars from password.
    #[arg(short, long)]
    pub(crate) exclude: Option<String>,
    /// Randomly select the value of every option which is not specified.
    #[arg(short, long)]
    pub(crate) auto: bool,
    /// Log more about what is going on; repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    pub(crate) verbose: u8,
}

impl Args {
    /// The password spec given by the command line alone, with defaults for anything unset.
    fn to_spec(&self) -> PasswordSpec {
        PasswordSpec {
            length: self.length.unwrap_or(DEFAULT_LENGTH),
            include_upper: self.upper,
            include_digits: self.nums,
            include_special: self.special,
            exclude: self.exclude.clone().unwrap_or_default(),
        }
    }
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!(?args, "parsed arguments");

    let spec = if args.auto {
        let (spec, choices) = auto::fill_unspecified(&mut OsRng, &args);
        debug!(?choices, "auto mode filled in options");
        eprintln!("{choices}");
        spec
    } else {
        args.to_spec()
    };
    debug!(?spec, "generating password");

    let password = fast_password::generate_password(&mut OsRng, &spec).map_err(|err| {
        debug!(%err, "password generation failed");
        err
    })?;
    info!(length = password.len(), "generated password");

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{password}")
        .and_then(|()| stdout.flush())
        .context("failed to write the password to stdout")?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error(transparent)]
    Generate(GenerateError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<GenerateError> for ProgError {
    fn from(err: GenerateError) -> ProgError {
        ProgError::Generate(err)
    }
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}
