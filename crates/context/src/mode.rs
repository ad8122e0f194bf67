//! Application modes and title classification.
//!
//! Pure domain logic - no I/O, no platform dependencies.

use crate::title::TitleGrammar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which KiCad tool a window belongs to.
///
/// Variants are declared in priority order, so the derived `Ord` ranks
/// `PcbEditor` highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationMode {
    /// Pcbnew. Wins over every other window when open.
    PcbEditor,

    /// Eeschema.
    SchematicEditor,

    /// The KiCad project manager (main window).
    ProjectManager,

    /// No KiCad window recognized.
    #[default]
    None,
}

/// How a mode recognizes its window title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Title ends with the marker.
    Suffix(&'static str),
    /// Title contains the marker anywhere.
    Contains(&'static str),
}

impl MatchRule {
    /// Case-sensitive, exact marker match.
    pub fn matches(&self, title: &str) -> bool {
        match self {
            MatchRule::Suffix(marker) => title.ends_with(marker),
            MatchRule::Contains(marker) => title.contains(marker),
        }
    }
}

impl ApplicationMode {
    /// Recognized modes, highest priority first.
    pub const PRIORITY: [ApplicationMode; 3] = [
        ApplicationMode::PcbEditor,
        ApplicationMode::SchematicEditor,
        ApplicationMode::ProjectManager,
    ];

    /// The title rule for this mode. `None` matches nothing.
    pub fn rule(&self) -> Option<MatchRule> {
        match self {
            ApplicationMode::PcbEditor => Some(MatchRule::Suffix("PCB Editor")),
            ApplicationMode::SchematicEditor => Some(MatchRule::Suffix("Schematic Editor")),
            ApplicationMode::ProjectManager => Some(MatchRule::Contains(" — KiCad")),
            ApplicationMode::None => None,
        }
    }

    /// Grammar used to read this mode's window title. PCB and project
    /// manager titles never carry brackets.
    pub fn grammar(&self) -> TitleGrammar {
        match self {
            ApplicationMode::SchematicEditor => TitleGrammar::Hierarchical,
            _ => TitleGrammar::EmDash,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationMode::PcbEditor => "PCB Editor",
            ApplicationMode::SchematicEditor => "Schematic Editor",
            ApplicationMode::ProjectManager => "Project Manager",
            ApplicationMode::None => "None",
        }
    }
}

impl std::fmt::Display for ApplicationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// First window per mode, borrowed from the title snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowMatches<'a> {
    windows: BTreeMap<ApplicationMode, &'a str>,
}

impl<'a> WindowMatches<'a> {
    pub fn get(&self, mode: ApplicationMode) -> Option<&'a str> {
        self.windows.get(&mode).copied()
    }

    /// The highest-priority matched window.
    pub fn winner(&self) -> Option<(ApplicationMode, &'a str)> {
        self.windows
            .iter()
            .next()
            .map(|(mode, title)| (*mode, *title))
    }

    /// No KiCad window at all.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }
}

/// Find the first title matching `mode`'s rule.
pub fn find_window<S: AsRef<str>>(titles: &[S], mode: ApplicationMode) -> Option<&str> {
    let rule = mode.rule()?;
    titles
        .iter()
        .map(|title| title.as_ref())
        .find(|title| rule.matches(title))
}

/// Map every recognized mode to the first window that matches it.
pub fn classify<S: AsRef<str>>(titles: &[S]) -> WindowMatches<'_> {
    let windows = ApplicationMode::PRIORITY
        .iter()
        .filter_map(|&mode| find_window(titles, mode).map(|title| (mode, title)))
        .collect();

    WindowMatches { windows }
}
