use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "edtf")]
#[command(
    author,
    version,
    about = "Parse, validate and canonicalize EDTF strings",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Print the parsed structure of each input")]
    Parse {
        /// EDTF strings; read one per line from stdin when omitted
        inputs: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Report whether each input is valid EDTF")]
    Validate { inputs: Vec<String> },

    #[command(about = "Print the canonical form of each input")]
    Canonicalize { inputs: Vec<String> },

    #[command(about = "Print the conformance level of each input")]
    Classify { inputs: Vec<String> },
}
