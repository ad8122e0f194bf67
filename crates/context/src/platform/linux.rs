//! X11 window titles via the EWMH client list.

use crate::error::EnumerationError;
use crate::provider::WindowTitleSource;
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt, Window};
use x11rb::rust_connection::RustConnection;

/// Longest title fetched, in 32-bit units.
const MAX_TITLE_WORDS: u32 = 1024;

/// Reads `_NET_WM_NAME` of every window in the root `_NET_CLIENT_LIST`.
pub struct X11Source {
    conn: RustConnection,
    root: Window,
    client_list: Atom,
    wm_name: Atom,
    utf8_string: Atom,
}

impl X11Source {
    /// Connect to the display named by `$DISPLAY`.
    pub fn connect() -> Result<Self, EnumerationError> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(|e| EnumerationError::Display(e.to_string()))?;

        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| EnumerationError::Display(format!("screen {screen_num} not found")))?;

        let client_list = intern_atom(&conn, "_NET_CLIENT_LIST")?;
        let wm_name = intern_atom(&conn, "_NET_WM_NAME")?;
        let utf8_string = intern_atom(&conn, "UTF8_STRING")?;

        tracing::debug!(screen = screen_num, "connected to X server");

        Ok(Self {
            conn,
            root,
            client_list,
            wm_name,
            utf8_string,
        })
    }

    fn client_windows(&self) -> Result<Vec<Window>, EnumerationError> {
        let reply = self
            .conn
            .get_property(false, self.root, self.client_list, AtomEnum::WINDOW, 0, u32::MAX)
            .map_err(query_failed)?
            .reply()
            .map_err(query_failed)?;

        let windows = reply.value32().ok_or_else(|| {
            EnumerationError::Query("window manager does not publish _NET_CLIENT_LIST".to_string())
        })?;

        Ok(windows.collect())
    }
}

impl WindowTitleSource for X11Source {
    fn list_window_titles(&self) -> Result<Vec<String>, EnumerationError> {
        let windows = self.client_windows()?;

        // Send every request before waiting on the first reply.
        let cookies = windows
            .iter()
            .map(|&window| {
                self.conn.get_property(
                    false,
                    window,
                    self.wm_name,
                    self.utf8_string,
                    0,
                    MAX_TITLE_WORDS,
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(query_failed)?;

        let mut titles = Vec::with_capacity(cookies.len());
        for cookie in cookies {
            match cookie.reply() {
                Ok(reply) if !reply.value.is_empty() => {
                    titles.push(String::from_utf8_lossy(&reply.value).into_owned());
                }
                // Unnamed window.
                Ok(_) => {}
                // Window closed between the list and the query.
                Err(ReplyError::X11Error(err)) => {
                    tracing::trace!(error = ?err, "skipping vanished window");
                }
                Err(err) => return Err(query_failed(err)),
            }
        }

        Ok(titles)
    }
}

fn intern_atom(conn: &RustConnection, name: &str) -> Result<Atom, EnumerationError> {
    Ok(conn
        .intern_atom(false, name.as_bytes())
        .map_err(query_failed)?
        .reply()
        .map_err(query_failed)?
        .atom)
}

fn query_failed(err: impl std::fmt::Display) -> EnumerationError {
    EnumerationError::Query(err.to_string())
}
