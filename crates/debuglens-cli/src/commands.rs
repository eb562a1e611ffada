//! Subcommand definitions.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Listen port
        #[arg(short, long, env = "DEBUGLENS_PORT")]
        port: Option<u16>,
    },

    /// Analyze one screenshot and print the result
    Analyze {
        /// Screenshot of the error
        image: PathBuf,

        /// File containing the related source code
        #[arg(long)]
        code: Option<PathBuf>,

        /// Language hint ("auto" for none)
        #[arg(short, long)]
        language: Option<String>,

        /// Print the JSON response instead of the analysis text
        #[arg(long)]
        json: bool,
    },

    /// Report free memory and whether the OCR and inference tools resolve
    Check,

    /// Print the effective configuration
    Config,
}
