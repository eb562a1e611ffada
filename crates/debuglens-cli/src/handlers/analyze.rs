//! Analyze command handler.
//!
//! Runs the pipeline once against a local screenshot. The image is copied
//! into the upload directory and a record is written, exactly as for an
//! HTTP request.

use std::path::{Path, PathBuf};

use debuglens_core::{AnalysisOutcome, AnalysisRequest};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Arguments for one analysis.
#[derive(Debug)]
pub struct AnalyzeArgs {
    pub image: PathBuf,
    pub code: Option<PathBuf>,
    pub language: Option<String>,
    pub json: bool,
}

pub async fn execute(ctx: &CliContext, args: AnalyzeArgs) -> Result<(), CliError> {
    let request = build_request(&args).await?;

    eprintln!("Analyzing {} with {}...", args.image.display(), ctx.config.model);

    match ctx.analysis.analyze(request).await? {
        AnalysisOutcome::Completed(response) => {
            if args.json {
                let rendered = serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::Core(e.to_string()))?;
                println!("{rendered}");
            } else {
                println!("{}", response.analysis);
                match response.record_id {
                    Some(id) => eprintln!("\nRecord: {id}"),
                    None => eprintln!("\nRecord: not saved (record store unavailable)"),
                }
            }
            Ok(())
        }
        AnalysisOutcome::Rejected { advisory } => Err(CliError::Unavailable(advisory)),
    }
}

async fn build_request(args: &AnalyzeArgs) -> Result<AnalysisRequest, CliError> {
    let data = tokio::fs::read(&args.image)
        .await
        .map_err(|e| CliError::Io(format!("{}: {e}", args.image.display())))?;

    let code = match &args.code {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?,
        ),
        None => None,
    };

    Ok(AnalysisRequest::new(upload_name(&args.image)?, data)
        .with_code(code)
        .with_language(args.language.clone()))
}

fn upload_name(image: &Path) -> Result<String, CliError> {
    image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::Arguments(format!("{} is not a file", image.display())))
}
