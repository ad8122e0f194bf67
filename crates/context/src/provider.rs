//! Collaborator traits for window listing and presence publishing.
//!
//! These abstract platform and service specifics so the resolver and the
//! poller stay testable.

use crate::error::{EnumerationError, PublishError};
use crate::state::PresenceState;

/// Source of the currently open top-level window titles.
pub trait WindowTitleSource {
    /// All visible window titles, in OS enumeration order.
    ///
    /// A failing platform call must surface as an error, never as an empty
    /// list, so it is not mistaken for KiCad having closed.
    fn list_window_titles(&self) -> Result<Vec<String>, EnumerationError>;
}

impl<T: WindowTitleSource + ?Sized> WindowTitleSource for Box<T> {
    fn list_window_titles(&self) -> Result<Vec<String>, EnumerationError> {
        (**self).list_window_titles()
    }
}

/// Remote status service holding a connected session.
///
/// Implementations are created connected and close the session on drop.
pub trait PresencePublisher {
    /// Replace the displayed status.
    fn update(&mut self, state: &PresenceState) -> Result<(), PublishError>;

    /// Remove the displayed status.
    fn clear(&mut self) -> Result<(), PublishError>;
}

/// Fixed title list, for diagnostics and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    titles: Vec<String>,
}

impl StaticSource {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }
}

impl WindowTitleSource for StaticSource {
    fn list_window_titles(&self) -> Result<Vec<String>, EnumerationError> {
        Ok(self.titles.clone())
    }
}
