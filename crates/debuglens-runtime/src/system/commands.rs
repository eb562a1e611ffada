//! Generic command existence and version extraction.
//!
//! Used to report whether the OCR and inference binaries resolve.

use std::process::Command;

/// Get the version of a command by running it with `version_flag`.
///
/// Returns the first non-empty output line, or `None` if the command cannot
/// be launched or exits unsuccessfully.
pub fn get_command_version(cmd: &str, version_flag: &str) -> Option<String> {
    let output = Command::new(cmd).arg(version_flag).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Try stdout first, fall back to stderr (tesseract 4 prints to stderr)
    let text = if stdout.trim().is_empty() {
        stderr
    } else {
        stdout
    };

    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Extract a version number from a tool's `--version` banner.
///
/// "tesseract 5.3.0" -> "5.3.0", "ollama version is 0.5.7" -> "0.5.7".
/// Falls back to the whole banner when no dotted number is present.
pub fn tool_version(cmd: &str) -> Option<String> {
    let banner = get_command_version(cmd, "--version")?;
    let version = banner
        .split_whitespace()
        .map(|word| word.trim_start_matches('v'))
        .find(|word| word.starts_with(|c: char| c.is_ascii_digit()) && word.contains('.'))
        .map_or_else(|| banner.clone(), str::to_string);
    Some(version)
}
