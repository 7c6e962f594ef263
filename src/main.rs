use std::{fs, io::Read};

use clap::Parser;
use textcalc::interpreter::evaluator::core::{Evaluator, Settings};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// textcalc evaluates blocks of calculator instructions.
///
/// Blocks are separated by blank lines and each block starts with no
/// variables. A line ending in `close` ends the input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat CONTENTS as a path to read instructions from.
    #[arg(short, long)]
    file: bool,

    /// Fractional digits written when converting to another base.
    #[arg(long, default_value_t = Settings::default().max_fraction_digits)]
    fraction_digits: usize,

    /// Largest denominator tried when looking for a terminating base.
    #[arg(long, default_value_t = Settings::default().max_denominator)]
    max_denominator: u32,

    /// Fractional digits shown for decimal results.
    #[arg(long, default_value_t = Settings::default().display_digits)]
    display_digits: usize,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Instructions, or a path with `--file`. Read from stdin when omitted.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let script = match read_script(&args) {
        Ok(script) => script,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        },
    };

    let settings = Settings { max_fraction_digits: args.fraction_digits,
                              max_denominator:     args.max_denominator,
                              display_digits:      args.display_digits, };
    let digits = settings.display_digits;

    for (index, block) in split_blocks(&script).into_iter().enumerate() {
        debug!(block = index + 1, lines = block.len(), "running block");
        let mut evaluator = Evaluator::with_settings(settings);
        match evaluator.process_block(&block) {
            Ok(outcomes) => {
                for outcome in outcomes {
                    println!("{outcome:.digits$}");
                }
            },
            Err(error) => eprintln!("Error: {error}"),
        }
        println!("Variables are reset.");
    }
}

fn read_script(args: &Args) -> Result<String, String> {
    match (&args.contents, args.file) {
        (Some(path), true) => fs::read_to_string(path).map_err(|_| {
                                  format!("Failed to read the input file '{path}'. Perhaps this file does not exist?")
                              }),
        (Some(contents), false) => Ok(contents.clone()),
        (None, _) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)
                            .map_err(|e| format!("Failed to read standard input: {e}"))?;
            Ok(buffer)
        },
    }
}

/// Splits input into blocks on blank lines, stopping after a line that ends
/// in `close`.
fn split_blocks(script: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in script.lines() {
        let closing = strip_close(line);
        let line = closing.unwrap_or(line);

        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }

        if closing.is_some() {
            break;
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// The line without its trailing `close` keyword, if it has one.
fn strip_close(line: &str) -> Option<&str> {
    let trimmed = line.trim_end();
    let cut = trimmed.len().checked_sub("close".len())?;
    trimmed.get(cut..)
           .filter(|tail| tail.eq_ignore_ascii_case("close"))
           .map(|_| &trimmed[..cut])
}
