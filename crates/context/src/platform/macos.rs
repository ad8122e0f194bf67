//! macOS window titles via System Events.
//!
//! Needs the Accessibility (System Events) permission for the terminal or
//! app running the binary.

use crate::error::EnumerationError;
use crate::provider::WindowTitleSource;
use std::process::Command;

const OSASCRIPT: &str = "osascript";

/// One title per line, from every foreground process.
const LIST_WINDOWS_SCRIPT: &str = r#"
    set windowTitles to {}
    tell application "System Events"
        repeat with proc in (every process whose background only is false)
            try
                repeat with win in (every window of proc)
                    set end of windowTitles to (name of win as text)
                end repeat
            end try
        end repeat
    end tell
    set AppleScript's text item delimiters to linefeed
    return windowTitles as text
"#;

#[derive(Debug, Default)]
pub struct SystemEventsSource;

impl SystemEventsSource {
    pub fn new() -> Self {
        Self
    }
}

impl WindowTitleSource for SystemEventsSource {
    fn list_window_titles(&self) -> Result<Vec<String>, EnumerationError> {
        let output = Command::new(OSASCRIPT)
            .args(["-e", LIST_WINDOWS_SCRIPT])
            .output()
            .map_err(|e| EnumerationError::Spawn {
                program: OSASCRIPT.to_string(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(EnumerationError::Helper {
                program: OSASCRIPT.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(split_titles(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// osascript terminates its output with a newline.
fn split_titles(stdout: &str) -> Vec<String> {
    let stdout = stdout.strip_suffix('\n').unwrap_or(stdout);
    if stdout.is_empty() {
        return Vec::new();
    }
    stdout.split('\n').map(str::to_string).collect()
}
