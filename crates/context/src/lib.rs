//! KiCad context detection for kicad-presence.
//!
//! This crate turns the list of open window titles into a Discord-ready presence.
//! It tracks:
//! - Which KiCad tool is open (PCB editor, schematic editor, project manager)
//! - The project and schematic sheet being edited, read from the window title
//! - Whether KiCad is still running at all
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  mode.rs     - ApplicationMode enum and title classifier     │
//! │  title.rs    - Title grammars and project/sheet parser       │
//! │  state.rs    - PresenceState, PollOutcome                    │
//! │  resolver.rs - Tick resolution and absence policy (pure)     │
//! │  provider.rs - Traits for window listing and publishing      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/linux.rs   - X11 client list                       │
//! │  platform/macos.rs   - System Events via osascript           │
//! │  platform/win32.rs   - EnumWindows                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  poller.rs - Poll loop, grace wait and shutdown              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use kicad_presence_context::{platform, PresenceConfig, PresencePoller};
//! use tokio_util::sync::CancellationToken;
//!
//! let source = platform::detect()?;
//! let mut poller = PresencePoller::new(source, publisher, PresenceConfig::default());
//! let reason = poller.run(CancellationToken::new()).await;
//! ```

mod config;
mod error;
mod mode;
mod poller;
mod provider;
mod resolver;
mod state;
mod title;

pub mod platform;

pub use config::{
    PresenceConfig, CLIENT_ID_ENV, DEFAULT_CLIENT_ID, DEFAULT_GRACE_INTERVAL_SECS,
    DEFAULT_POLL_INTERVAL_SECS, GRACE_SECS_ENV, POLL_SECS_ENV,
};
pub use error::{ConfigError, EnumerationError, PublishError, TitleParseError};
pub use mode::{classify, find_window, ApplicationMode, MatchRule, WindowMatches};
pub use poller::{ExitReason, Phase, PresencePoller};
pub use provider::{PresencePublisher, StaticSource, WindowTitleSource};
pub use resolver::{AbsenceVerdict, PresenceResolver};
pub use state::{PollOutcome, PresenceState};
pub use title::{parse_title, ProjectContext, TitleGrammar, EM_DASH, ROOT_SHEET};
