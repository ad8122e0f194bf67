//! Platform-specific window title sources.

use crate::error::EnumerationError;
use crate::provider::WindowTitleSource;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "linux")]
pub use linux::X11Source;

#[cfg(target_os = "macos")]
pub use macos::SystemEventsSource;

#[cfg(target_os = "windows")]
pub use win32::Win32Source;

/// Host platforms with a window title source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOS,
    Windows,
}

impl Platform {
    /// The platform this binary was built for, if supported.
    pub fn current() -> Option<Self> {
        match std::env::consts::OS {
            "linux" => Some(Platform::Linux),
            "macos" => Some(Platform::MacOS),
            "windows" => Some(Platform::Windows),
            _ => None,
        }
    }
}

/// Pick and construct the title source for the host platform.
pub fn detect() -> Result<Box<dyn WindowTitleSource>, EnumerationError> {
    let platform = Platform::current().ok_or(EnumerationError::Unsupported {
        platform: std::env::consts::OS,
    })?;

    tracing::debug!(?platform, "selecting window title source");
    source_for(platform)
}

#[cfg(target_os = "linux")]
fn source_for(_platform: Platform) -> Result<Box<dyn WindowTitleSource>, EnumerationError> {
    Ok(Box::new(X11Source::connect()?))
}

#[cfg(target_os = "macos")]
fn source_for(_platform: Platform) -> Result<Box<dyn WindowTitleSource>, EnumerationError> {
    Ok(Box::new(SystemEventsSource::new()))
}

#[cfg(target_os = "windows")]
fn source_for(_platform: Platform) -> Result<Box<dyn WindowTitleSource>, EnumerationError> {
    Ok(Box::new(Win32Source::new()))
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn source_for(_platform: Platform) -> Result<Box<dyn WindowTitleSource>, EnumerationError> {
    Err(EnumerationError::Unsupported {
        platform: std::env::consts::OS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_platform() {
        let expected = if cfg!(target_os = "linux") {
            Some(Platform::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Platform::MacOS)
        } else if cfg!(target_os = "windows") {
            Some(Platform::Windows)
        } else {
            None
        };
        assert_eq!(Platform::current(), expected);
    }

    #[test]
    #[ignore] // Requires a desktop session
    fn test_detect_lists_windows() {
        let source = detect().unwrap();
        for title in source.list_window_titles().unwrap() {
            println!("{title}");
        }
    }
}
