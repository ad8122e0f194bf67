//! Windows window titles via `EnumWindows`.

use crate::error::EnumerationError;
use crate::provider::WindowTitleSource;
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible,
};

/// Titles of all visible top-level windows.
#[derive(Debug, Default)]
pub struct Win32Source;

impl Win32Source {
    pub fn new() -> Self {
        Self
    }
}

impl WindowTitleSource for Win32Source {
    fn list_window_titles(&self) -> Result<Vec<String>, EnumerationError> {
        let mut titles: Vec<String> = Vec::new();

        // SAFETY: the callback only runs during EnumWindows, while `titles`
        // is alive and exclusively borrowed.
        unsafe {
            EnumWindows(
                Some(collect_title),
                LPARAM(&mut titles as *mut Vec<String> as isize),
            )
        }
        .map_err(|e| EnumerationError::Query(e.to_string()))?;

        Ok(titles)
    }
}

unsafe extern "system" fn collect_title(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let titles = &mut *(lparam.0 as *mut Vec<String>);

    if IsWindowVisible(hwnd).as_bool() {
        let len = GetWindowTextLengthW(hwnd).max(0) as usize;
        let mut buf = vec![0u16; len + 1];
        let copied = GetWindowTextW(hwnd, &mut buf).max(0) as usize;
        titles.push(String::from_utf16_lossy(&buf[..copied]));
    }

    TRUE
}
