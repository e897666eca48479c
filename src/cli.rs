//! Command-line arguments and the interactive prompts used when no input
//! file is given on the command line.

use clap::Parser;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tracing::warn;

use crate::extremes::SortKey;

pub const DEFAULT_OUTPUT: &str = "state_zip_summary.csv";

/// Summarize the easternmost, westernmost, northernmost and southernmost
/// zip codes of every state in a zip code CSV file.
#[derive(Debug, Clone, Parser)]
#[command(name = "zip-extremes", version)]
pub struct Args {
    /// Input CSV (code,place,state,county,latitude,longitude). Prompts when omitted.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Sort records before aggregating: code, place name, state, latitude or longitude
    #[arg(short = 's', long = "sort", value_name = "FIELD")]
    pub sort: Option<String>,

    /// Output file for the state summary
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub sort: Option<SortKey>,
    pub output: PathBuf,
}

/// Builds the run configuration, asking on `prompt_out` and reading answers
/// from `answers` when no input file was passed.
pub fn resolve<R: BufRead, W: Write>(
    args: &Args,
    mut answers: R,
    mut prompt_out: W,
) -> io::Result<RunConfig> {
    if let Some(input) = &args.input {
        return Ok(RunConfig {
            input: input.clone(),
            sort: resolve_sort(args.sort.as_deref()),
            output: args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        });
    }

    let input = ask(&mut answers, &mut prompt_out, "Enter a zipcode csv file: ")?;
    let sort = ask(
        &mut answers,
        &mut prompt_out,
        &format!("Sort by ({}) or blank for none: ", SortKey::NAMES.join(", ")),
    )?;
    let output = ask(
        &mut answers,
        &mut prompt_out,
        &format!("Output file [{}]: ", DEFAULT_OUTPUT),
    )?;

    Ok(RunConfig {
        input: PathBuf::from(input),
        sort: resolve_sort(Some(&sort)),
        output: if output.is_empty() {
            args.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
        } else {
            PathBuf::from(output)
        },
    })
}

/// Blank means no sort. Anything unrecognized is reported and also means no sort.
pub fn resolve_sort(selector: Option<&str>) -> Option<SortKey> {
    let selector = selector.filter(|s| !s.is_empty())?;
    match selector.parse::<SortKey>() {
        Ok(key) => Some(key),
        Err(err) => {
            warn!("{}, aggregating without sorting", err);
            None
        }
    }
}

fn ask<R: BufRead, W: Write>(answers: &mut R, prompt_out: &mut W, question: &str) -> io::Result<String> {
    write!(prompt_out, "{}", question)?;
    prompt_out.flush()?;

    let mut line = String::new();
    answers.read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

/// Set up structured logging on stderr.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zip_extremes={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
