//! Presence poller - the single loop that drives detection and publishing.

use crate::config::PresenceConfig;
use crate::provider::{PresencePublisher, WindowTitleSource};
use crate::resolver::{AbsenceVerdict, PresenceResolver};
use crate::state::PollOutcome;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

/// Where the loop is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Polling,
    Publishing,
    Waiting,
    ShuttingDown,
}

/// Why [`PresencePoller::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// No KiCad window for the whole grace interval.
    HostClosed,
    /// Stop was requested through the cancellation token.
    Stopped,
}

impl std::fmt::Display for ExitReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitReason::HostClosed => write!(f, "KiCad closed"),
            ExitReason::Stopped => write!(f, "stop requested"),
        }
    }
}

/// Owns the title source, the connected publisher and the resolver.
pub struct PresencePoller<S, P> {
    source: S,
    publisher: P,
    resolver: PresenceResolver,
    config: PresenceConfig,
    phase: Phase,
}

impl<S, P> PresencePoller<S, P>
where
    S: WindowTitleSource,
    P: PresencePublisher,
{
    /// The session clock starts here.
    pub fn new(source: S, publisher: P, config: PresenceConfig) -> Self {
        Self {
            source,
            publisher,
            resolver: PresenceResolver::new(Utc::now()),
            config,
            phase: Phase::Starting,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn resolver(&self) -> &PresenceResolver {
        &self.resolver
    }

    /// Poll until KiCad closes or `shutdown` is cancelled. The published
    /// presence is cleared before returning.
    pub async fn run(&mut self, shutdown: CancellationToken) -> ExitReason {
        tracing::info!(
            poll_interval = ?self.config.poll_interval(),
            grace_interval = ?self.config.grace_interval(),
            "presence poller started"
        );

        let reason = loop {
            let phase = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break ExitReason::Stopped,
                phase = self.tick() => phase,
            };

            if phase == Phase::ShuttingDown {
                break ExitReason::HostClosed;
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break ExitReason::Stopped,
                _ = tokio::time::sleep(self.config.poll_interval()) => {}
            }
        };

        self.set_phase(Phase::ShuttingDown);

        if let Err(err) = self.publisher.clear() {
            tracing::warn!(error = %err, "failed to clear presence");
        }

        tracing::info!(%reason, "presence poller stopped");
        reason
    }

    /// Run one poll cycle and return the phase it ended in.
    pub async fn tick(&mut self) -> Phase {
        self.set_phase(Phase::Polling);

        let titles = match self.source.list_window_titles() {
            Ok(titles) => titles,
            Err(err) => {
                tracing::warn!(error = %err, "window enumeration failed, skipping tick");
                return self.phase;
            }
        };

        match self.resolver.resolve(&titles) {
            PollOutcome::Active(state) => {
                match self.publisher.update(&state) {
                    Ok(()) => tracing::debug!(
                        mode = %state.mode,
                        details = %state.details,
                        state = %state.state_text,
                        "presence updated"
                    ),
                    Err(err) => tracing::warn!(error = %err, "failed to publish presence"),
                }
                self.set_phase(Phase::Publishing)
            }
            PollOutcome::Idle => self.phase,
            PollOutcome::Absent(absent) => self.wait_for_host(absent).await,
        }
    }

    async fn wait_for_host(&mut self, absent: u32) -> Phase {
        self.set_phase(Phase::Waiting);
        tracing::info!(
            absent,
            grace_interval = ?self.config.grace_interval(),
            "no KiCad window found, waiting before shutdown"
        );

        tokio::time::sleep(self.config.grace_interval()).await;

        let titles = match self.source.list_window_titles() {
            Ok(titles) => titles,
            Err(err) => {
                tracing::warn!(error = %err, "window enumeration failed during grace re-check");
                return self.phase;
            }
        };

        match self.resolver.confirm_absence(&titles) {
            AbsenceVerdict::Reappeared => {
                tracing::info!("KiCad project manager is back, resuming");
                self.phase
            }
            AbsenceVerdict::Closed => self.set_phase(Phase::ShuttingDown),
        }
    }

    fn set_phase(&mut self, phase: Phase) -> Phase {
        if self.phase != phase {
            tracing::trace!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
        phase
    }
}
