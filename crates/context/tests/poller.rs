//! Integration tests for the presence poller.
//!
//! Time is paused, so the 15s poll and 5s grace sleeps advance instantly.

use kicad_presence_context::{
    ApplicationMode, EnumerationError, ExitReason, Phase, PresenceConfig, PresencePoller,
    PresencePublisher, PresenceState, PublishError, WindowTitleSource,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const PCB: &str = "amp — PCB Editor";
const SCH: &str = "Schematic Editor [amp/Power Supply] — Schematic Editor";
const KICAD: &str = "amp — KiCad 8.0";

type Snapshot = Result<Vec<String>, EnumerationError>;

/// Replays scripted snapshots, then repeats `fallback` forever.
struct ScriptedSource {
    snapshots: RefCell<VecDeque<Snapshot>>,
    fallback: Vec<String>,
}

impl ScriptedSource {
    fn new(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots: RefCell::new(snapshots.into()),
            fallback: Vec::new(),
        }
    }

    fn with_fallback(mut self, titles: &[&str]) -> Self {
        self.fallback = titles.iter().map(|t| t.to_string()).collect();
        self
    }
}

impl WindowTitleSource for ScriptedSource {
    fn list_window_titles(&self) -> Result<Vec<String>, EnumerationError> {
        self.snapshots
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

#[derive(Default)]
struct RecordingPublisher {
    published: Vec<PresenceState>,
    attempts: usize,
    clears: usize,
    fail_updates: bool,
}

impl PresencePublisher for RecordingPublisher {
    fn update(&mut self, state: &PresenceState) -> Result<(), PublishError> {
        self.attempts += 1;
        if self.fail_updates {
            return Err(PublishError::Update("pipe closed".to_string()));
        }
        self.published.push(state.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PublishError> {
        self.clears += 1;
        Ok(())
    }
}

fn titles(titles: &[&str]) -> Snapshot {
    Ok(titles.iter().map(|t| t.to_string()).collect())
}

fn enumeration_failure() -> Snapshot {
    Err(EnumerationError::Helper {
        program: "osascript".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "System Events got an error".to_string(),
    })
}

fn poller(
    source: ScriptedSource,
    publisher: RecordingPublisher,
) -> PresencePoller<ScriptedSource, RecordingPublisher> {
    PresencePoller::new(source, publisher, PresenceConfig::default())
}

// =============================================================================
// Publishing
// =============================================================================

mod publishing {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_publishes_then_exits_when_kicad_closes() {
        let source = ScriptedSource::new(vec![titles(&["Firefox", PCB, KICAD])]);
        let mut poller = poller(source, RecordingPublisher::default());
        let start = tokio::time::Instant::now();

        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, ExitReason::HostClosed);
        assert_eq!(poller.phase(), Phase::ShuttingDown);
        // One poll interval, then the grace wait.
        assert_eq!(start.elapsed(), Duration::from_secs(20));

        let publisher = poller.publisher();
        assert_eq!(publisher.published.len(), 1);
        assert_eq!(publisher.published[0].mode, ApplicationMode::PcbEditor);
        assert_eq!(publisher.published[0].details, "Working on amp");
        assert_eq!(publisher.clears, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mode_follows_open_windows() {
        let source = ScriptedSource::new(vec![
            titles(&[KICAD]),
            titles(&[KICAD, SCH]),
            titles(&[SCH, PCB]),
        ]);
        let mut poller = poller(source, RecordingPublisher::default());

        poller.run(CancellationToken::new()).await;

        let states: Vec<_> = poller
            .publisher()
            .published
            .iter()
            .map(|s| (s.mode, s.state_text.as_str()))
            .collect();
        assert_eq!(
            states,
            vec![
                (ApplicationMode::ProjectManager, "Idling"),
                (ApplicationMode::SchematicEditor, "Editing Power Supply"),
                (ApplicationMode::PcbEditor, "In the PCB Editor"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_start_survives_mode_changes() {
        let source = ScriptedSource::new(vec![titles(&[PCB]), titles(&[KICAD])]);
        let mut poller = poller(source, RecordingPublisher::default());
        let session_start = poller.resolver().session_start();

        poller.run(CancellationToken::new()).await;

        let published = &poller.publisher().published;
        assert_eq!(published.len(), 2);
        assert!(published.iter().all(|s| s.session_start == session_start));
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_failure_keeps_polling() {
        let source = ScriptedSource::new(vec![titles(&[PCB]), titles(&[PCB])]);
        let publisher = RecordingPublisher {
            fail_updates: true,
            ..Default::default()
        };
        let mut poller = poller(source, publisher);

        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, ExitReason::HostClosed);
        assert_eq!(poller.publisher().attempts, 2);
        assert!(poller.publisher().published.is_empty());
    }
}

// =============================================================================
// Absence policy
// =============================================================================

mod absence {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_reappearing_within_grace_keeps_running() {
        let source = ScriptedSource::new(vec![
            titles(&[]),
            // Grace re-check sees the project manager again.
            titles(&[KICAD]),
            titles(&[SCH]),
        ]);
        let mut poller = poller(source, RecordingPublisher::default());

        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, ExitReason::HostClosed);
        let published = &poller.publisher().published;
        // Nothing is published on the tick that found KiCad during the grace wait.
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].mode, ApplicationMode::SchematicEditor);
    }

    #[tokio::test(start_paused = true)]
    async fn test_grace_recheck_only_counts_project_manager() {
        let source = ScriptedSource::new(vec![titles(&["Firefox"]), titles(&[PCB])]);
        let mut poller = poller(source, RecordingPublisher::default());

        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, ExitReason::HostClosed);
        assert!(poller.publisher().published.is_empty());
        assert_eq!(poller.resolver().absent_checks(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_tick_waits_then_shuts_down() {
        let source = ScriptedSource::new(vec![titles(&[]), titles(&[])]);
        let mut poller = poller(source, RecordingPublisher::default());

        assert_eq!(poller.tick().await, Phase::ShuttingDown);
        assert_eq!(poller.resolver().absent_checks(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_tick_reappeared_is_waiting() {
        let source = ScriptedSource::new(vec![titles(&[]), titles(&[KICAD])]);
        let mut poller = poller(source, RecordingPublisher::default());

        assert_eq!(poller.tick().await, Phase::Waiting);
        assert_eq!(poller.resolver().absent_checks(), 0);
        assert!(poller.publisher().published.is_empty());
    }
}

// =============================================================================
// Failure isolation
// =============================================================================

mod failures {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_enumeration_failure_is_not_absence() {
        let source = ScriptedSource::new(vec![
            enumeration_failure(),
            enumeration_failure(),
            titles(&[KICAD]),
        ]);
        let mut poller = poller(source, RecordingPublisher::default());

        let reason = poller.run(CancellationToken::new()).await;

        assert_eq!(reason, ExitReason::HostClosed);
        assert_eq!(poller.publisher().published.len(), 1);
        assert_eq!(poller.publisher().published[0].mode, ApplicationMode::ProjectManager);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enumeration_failure_during_grace_does_not_exit() {
        let source = ScriptedSource::new(vec![
            titles(&[]),
            enumeration_failure(),
            titles(&[PCB]),
        ]);
        let mut poller = poller(source, RecordingPublisher::default());

        assert_eq!(poller.tick().await, Phase::Waiting);
        assert_eq!(poller.tick().await, Phase::Publishing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_title_skips_tick() {
        let source = ScriptedSource::new(vec![titles(&["PCB Editor"]), titles(&[KICAD])]);
        let mut poller = poller(source, RecordingPublisher::default());

        assert_eq!(poller.tick().await, Phase::Polling);
        assert!(poller.publisher().published.is_empty());
        assert_eq!(poller.tick().await, Phase::Publishing);
        assert_eq!(poller.publisher().published.len(), 1);
    }
}

// =============================================================================
// Stop requests
// =============================================================================

mod stopping {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start() {
        let source = ScriptedSource::new(vec![]).with_fallback(&[PCB]);
        let mut poller = poller(source, RecordingPublisher::default());
        let token = CancellationToken::new();
        token.cancel();

        let reason = poller.run(token).await;

        assert_eq!(reason, ExitReason::Stopped);
        assert!(poller.publisher().published.is_empty());
        assert_eq!(poller.publisher().clears, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_interrupts_poll_sleep() {
        let source = ScriptedSource::new(vec![]).with_fallback(&[KICAD]);
        let mut poller = poller(source, RecordingPublisher::default());
        let token = CancellationToken::new();

        let stopper = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(40)).await;
            stopper.cancel();
        });

        let start = tokio::time::Instant::now();
        let reason = poller.run(token).await;

        assert_eq!(reason, ExitReason::Stopped);
        assert_eq!(start.elapsed(), Duration::from_secs(40));
        // Ticks at 0s, 15s and 30s.
        assert_eq!(poller.publisher().published.len(), 3);
        assert_eq!(poller.publisher().clears, 1);
    }
}
