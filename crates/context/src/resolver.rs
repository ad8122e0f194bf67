//! Per-tick presence resolution and the absence policy.
//!
//! Pure business logic - the poller feeds it title snapshots.

use crate::mode::{classify, find_window, ApplicationMode};
use crate::state::{PollOutcome, PresenceState};
use crate::title::parse_title;
use chrono::{DateTime, Utc};

/// Result of the re-check after the grace interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceVerdict {
    /// The project manager is back; keep polling.
    Reappeared,
    /// Still nothing; KiCad is closed.
    Closed,
}

/// Turns window snapshots into presence states.
///
/// Only `session_start` and the absent counter live across ticks.
#[derive(Debug, Clone)]
pub struct PresenceResolver {
    session_start: DateTime<Utc>,
    absent_checks: u32,
}

impl PresenceResolver {
    pub fn new(session_start: DateTime<Utc>) -> Self {
        Self {
            session_start,
            absent_checks: 0,
        }
    }

    pub fn session_start(&self) -> DateTime<Utc> {
        self.session_start
    }

    /// Consecutive snapshots without a KiCad window.
    pub fn absent_checks(&self) -> u32 {
        self.absent_checks
    }

    /// Resolve one snapshot. The highest-priority window wins.
    pub fn resolve<S: AsRef<str>>(&mut self, titles: &[S]) -> PollOutcome {
        let matches = classify(titles);

        let Some((mode, title)) = matches.winner() else {
            self.absent_checks += 1;
            tracing::debug!(absent = self.absent_checks, "no KiCad window found");
            return PollOutcome::Absent(self.absent_checks);
        };

        self.absent_checks = 0;

        let context = match parse_title(title, mode.grammar()) {
            Ok(context) => context,
            Err(err) => {
                tracing::warn!(%mode, error = %err, "could not read project from window title");
                return PollOutcome::Idle;
            }
        };

        tracing::debug!(
            %mode,
            project = %context.project,
            sheet = %context.sheet,
            "resolved KiCad window"
        );

        match PresenceState::for_mode(mode, &context, self.session_start) {
            Some(state) => PollOutcome::Active(state),
            None => PollOutcome::Idle,
        }
    }

    /// Re-check after the grace interval. Only the project manager window
    /// counts here.
    pub fn confirm_absence<S: AsRef<str>>(&mut self, titles: &[S]) -> AbsenceVerdict {
        if find_window(titles, ApplicationMode::ProjectManager).is_some() {
            self.absent_checks = 0;
            return AbsenceVerdict::Reappeared;
        }

        self.absent_checks += 1;
        AbsenceVerdict::Closed
    }
}
