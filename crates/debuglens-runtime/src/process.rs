//! Bounded subprocess execution shared by the OCR and inference adapters.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Why a subprocess produced no usable output.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The deadline passed; the child has been killed.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("failed to collect output: {0}")]
    Wait(#[source] io::Error),
}

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub(crate) struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `command` to completion, capturing both output streams.
///
/// stdin is closed. If `timeout` elapses first, the wait is abandoned and the
/// child is killed when its handle drops.
pub(crate) async fn run_captured(
    mut command: Command,
    timeout: Duration,
) -> Result<CapturedOutput, ProcessError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let program = command
        .as_std()
        .get_program()
        .to_string_lossy()
        .into_owned();
    let child = command
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: program.clone(),
            source,
        })?;
    debug!(target: "debuglens.process", %program, pid = ?child.id(), "Spawned");

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ProcessError::TimedOut(timeout))?
        .map_err(ProcessError::Wait)?;

    Ok(CapturedOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
