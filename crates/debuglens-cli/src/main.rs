//! CLI entry point - the composition root.
//!
//! Logging and configuration are initialised here; command dispatch routes
//! to handlers. Errors are printed and mapped to sysexits-style exit codes.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use debuglens_cli::handlers::analyze::AnalyzeArgs;
use debuglens_cli::{Cli, CliError, Commands, bootstrap, handlers, load_config};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> Result<(), CliError> {
    let config = load_config()?;

    match command {
        Commands::Serve { port } => handlers::serve::execute(config, port).await,
        Commands::Analyze {
            image,
            code,
            language,
            json,
        } => {
            let ctx = bootstrap(config).await?;
            let args = AnalyzeArgs {
                image,
                code,
                language,
                json,
            };
            handlers::analyze::execute(&ctx, args).await
        }
        Commands::Check => handlers::check::execute(&config).await,
        Commands::Config => {
            handlers::config::execute(&config);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(err) = run(command).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
