//! Window title grammars.
//!
//! KiCad titles come in two shapes:
//! - `Project — Tool` (every tool, and the root schematic sheet)
//! - `Tool [Project/Sheet] — Tool` (hierarchical or unsaved schematic sheets)

use crate::error::TitleParseError;
use serde::{Deserialize, Serialize};

/// U+2014. KiCad separates project and tool with this, never a hyphen.
pub const EM_DASH: char = '—';

/// Sheet name used when the title names no sub-sheet.
pub const ROOT_SHEET: &str = "Root";

/// Project and sheet read from a window title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Never empty.
    pub project: String,
    pub sheet: String,
}

impl ProjectContext {
    fn new(project: &str, sheet: Option<&str>) -> Self {
        let sheet = sheet
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(ROOT_SHEET);

        Self {
            project: project.to_string(),
            sheet: sheet.to_string(),
        }
    }
}

/// Which title shapes to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleGrammar {
    /// `Project — Tool` only. Used for PCB editor and project manager titles.
    EmDash,
    /// Bracketed `[Project/Sheet]` first, falling back to `EmDash`.
    Hierarchical,
}

/// Parse the project (and sheet) out of a KiCad window title.
pub fn parse_title(title: &str, grammar: TitleGrammar) -> Result<ProjectContext, TitleParseError> {
    if grammar == TitleGrammar::Hierarchical {
        if let Some(inner) = bracket_segment(title) {
            return parse_bracketed(title, inner);
        }
    }

    parse_em_dash(title)
}

/// Text between the first `[` and the next `]` after it.
fn bracket_segment(title: &str) -> Option<&str> {
    let (_, after_open) = title.split_once('[')?;
    let (inner, _) = after_open.split_once(']')?;
    Some(inner)
}

fn parse_bracketed(title: &str, inner: &str) -> Result<ProjectContext, TitleParseError> {
    let (project, sheet) = match inner.split_once('/') {
        Some((project, sheet)) => (project, Some(sheet)),
        None => (inner, None),
    };

    let project = non_empty_project(title, project)?;
    Ok(ProjectContext::new(project, sheet))
}

fn parse_em_dash(title: &str) -> Result<ProjectContext, TitleParseError> {
    let (project, _) =
        title
            .split_once(EM_DASH)
            .ok_or_else(|| TitleParseError::NoDelimiter {
                title: title.to_string(),
            })?;

    let project = non_empty_project(title, project)?;
    Ok(ProjectContext::new(project, None))
}

fn non_empty_project<'a>(title: &str, project: &'a str) -> Result<&'a str, TitleParseError> {
    let project = project.trim();
    if project.is_empty() {
        return Err(TitleParseError::EmptyProject {
            title: title.to_string(),
        });
    }
    Ok(project)
}
