mod cli;

use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// The positional inputs, or the non-blank lines of stdin when there are none.
fn collect_inputs(inputs: Vec<String>) -> Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    tracing::debug!(count = lines.len(), "read inputs from stdin");
    Ok(lines)
}

fn parse(input: &str) -> Result<edtf_grammar::Edtf> {
    edtf_grammar::parse(input).with_context(|| format!("invalid EDTF string {:?}", input))
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Parse { inputs, json } => {
            for input in collect_inputs(inputs)? {
                let value = parse(&input)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&value)?);
                } else {
                    println!("{:#?}", value);
                }
            }
        }
        Command::Validate { inputs } => {
            let mut all_valid = true;
            for input in collect_inputs(inputs)? {
                match edtf_grammar::parse(&input) {
                    Ok(_) => println!("{}\tvalid", input),
                    Err(e) => {
                        all_valid = false;
                        println!("{}\tinvalid: {}", input, e);
                    }
                }
            }
            if !all_valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Canonicalize { inputs } => {
            for input in collect_inputs(inputs)? {
                println!("{}", parse(&input)?);
            }
        }
        Command::Classify { inputs } => {
            for input in collect_inputs(inputs)? {
                let level = edtf_grammar::classify(&input)
                    .with_context(|| format!("invalid EDTF string {:?}", input))?;
                println!("{}\t{}", input, level);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
