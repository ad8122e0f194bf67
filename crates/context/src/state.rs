//! Presence payload and per-tick outcome.

use crate::mode::ApplicationMode;
use crate::title::ProjectContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discord asset keys uploaded for the KiCad application.
const PCBNEW_IMAGE: &str = "pcbnew";
const EESCHEMA_IMAGE: &str = "eeschema";
const KICAD_IMAGE: &str = "kicad";
const KICAD_TEXT: &str = "KiCad EDA";

/// What gets shown on the user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceState {
    pub mode: ApplicationMode,

    /// First line, e.g. "Working on MyBoard".
    pub details: String,

    /// Second line, e.g. "Editing Power Supply".
    pub state_text: String,

    pub large_image: String,
    pub large_text: String,

    #[serde(default)]
    pub small_image: Option<String>,

    #[serde(default)]
    pub small_text: Option<String>,

    /// Process start. Shown downstream as total elapsed time.
    pub session_start: DateTime<Utc>,
}

impl PresenceState {
    /// Build the payload for a recognized mode. Returns `None` for
    /// [`ApplicationMode::None`].
    pub fn for_mode(
        mode: ApplicationMode,
        context: &ProjectContext,
        session_start: DateTime<Utc>,
    ) -> Option<Self> {
        let details = format!("Working on {}", context.project);

        let (state_text, large_image, large_text, small) = match mode {
            ApplicationMode::PcbEditor => (
                "In the PCB Editor".to_string(),
                PCBNEW_IMAGE,
                "PCB Editor",
                true,
            ),
            ApplicationMode::SchematicEditor => (
                format!("Editing {}", context.sheet),
                EESCHEMA_IMAGE,
                "Schematic Editor",
                true,
            ),
            ApplicationMode::ProjectManager => {
                ("Idling".to_string(), KICAD_IMAGE, KICAD_TEXT, false)
            }
            ApplicationMode::None => return None,
        };

        Some(Self {
            mode,
            details,
            state_text,
            large_image: large_image.to_string(),
            large_text: large_text.to_string(),
            small_image: small.then(|| KICAD_IMAGE.to_string()),
            small_text: small.then(|| KICAD_TEXT.to_string()),
            session_start,
        })
    }
}

/// Result of resolving one window snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Publish this state.
    Active(PresenceState),

    /// A KiCad window exists but nothing publishable came out of it.
    Idle,

    /// No KiCad window; carries the consecutive absent count.
    Absent(u32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::title::ROOT_SHEET;

    fn context(project: &str, sheet: &str) -> ProjectContext {
        ProjectContext {
            project: project.to_string(),
            sheet: sheet.to_string(),
        }
    }

    #[test]
    fn test_pcb_editor_state() {
        let start = Utc::now();
        let state =
            PresenceState::for_mode(ApplicationMode::PcbEditor, &context("amp", ROOT_SHEET), start)
                .unwrap();

        assert_eq!(state.details, "Working on amp");
        assert_eq!(state.state_text, "In the PCB Editor");
        assert_eq!(state.large_image, "pcbnew");
        assert_eq!(state.small_image.as_deref(), Some("kicad"));
        assert_eq!(state.small_text.as_deref(), Some("KiCad EDA"));
        assert_eq!(state.session_start, start);
    }

    #[test]
    fn test_schematic_state_names_sheet() {
        let state = PresenceState::for_mode(
            ApplicationMode::SchematicEditor,
            &context("amp", "Power Supply"),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(state.state_text, "Editing Power Supply");
        assert_eq!(state.large_image, "eeschema");
        assert_eq!(state.large_text, "Schematic Editor");
    }

    #[test]
    fn test_project_manager_has_no_small_image() {
        let state = PresenceState::for_mode(
            ApplicationMode::ProjectManager,
            &context("amp", ROOT_SHEET),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(state.state_text, "Idling");
        assert_eq!(state.large_image, "kicad");
        assert_eq!(state.small_image, None);
        assert_eq!(state.small_text, None);
    }

    #[test]
    fn test_none_mode_has_no_state() {
        let state =
            PresenceState::for_mode(ApplicationMode::None, &context("amp", ROOT_SHEET), Utc::now());
        assert!(state.is_none());
    }
}
