//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Screenshot-driven debugging assistant.
///
/// Configuration is read from `DEBUGLENS_*` environment variables (a `.env`
/// file in the working directory is loaded first).
#[derive(Parser)]
#[command(name = "debuglens")]
#[command(about = "Analyze error screenshots with a local multimodal model")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_args() {
        let cli = Cli::parse_from([
            "debuglens",
            "--verbose",
            "analyze",
            "shot.png",
            "--language",
            "python",
            "--code",
            "main.py",
            "--json",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Analyze {
                image,
                code,
                language,
                json,
            }) => {
                assert_eq!(image, PathBuf::from("shot.png"));
                assert_eq!(code, Some(PathBuf::from("main.py")));
                assert_eq!(language.as_deref(), Some("python"));
                assert!(json);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::parse_from(["debuglens", "serve", "--port", "9001"]);
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(9001) })));
    }

    #[test]
    fn test_serve_port_reads_environment() {
        let cmd = Cli::command();
        let serve = cmd
            .get_subcommands()
            .find(|c| c.get_name() == "serve")
            .unwrap();
        let port = serve
            .get_arguments()
            .find(|a| a.get_id() == "port")
            .unwrap();
        assert_eq!(
            port.get_env().and_then(|v| v.to_str()),
            Some("DEBUGLENS_PORT")
        );
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["debuglens", "check", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
