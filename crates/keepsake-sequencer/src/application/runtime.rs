//! The narrative runtime.
//!
//! Wires the sequencer aggregate to the mounted scene controller, the media
//! controller and the shared scheduler. Everything runs on the caller's
//! thread: input arrives through [`Narrative::handle_input`], due timers are
//! dispatched by [`Narrative::run_due_timers`].

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use keepsake_core::aggregate::AggregateRoot;
use keepsake_core::clock::Clock;
use keepsake_core::error::DomainError;
use keepsake_core::scene::Scene;
use keepsake_core::scheduler::{Scheduler, TimerHandle};
use keepsake_media::{MediaController, MediaState};
use keepsake_scenes::application::controller::{SceneController, SceneFrame};
use keepsake_scenes::domain::signals::{SceneSignal, SceneTimer};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::aggregates::{AdvanceOutcome, HANDOFF_MS, Sequencer, SequencerState};
use crate::domain::boundary::BoundaryEffect;
use crate::domain::commands::HandleInput;
use crate::domain::events::SequencerEvent;

/// Payloads on the shared scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Completes the handoff into `to`.
    Handoff {
        /// The scene being entered.
        to: Scene,
    },
    /// A timer owned by the mounted scene.
    Scene(SceneTimer),
}

impl From<SceneTimer> for Timer {
    fn from(timer: SceneTimer) -> Self {
        Timer::Scene(timer)
    }
}

/// Extension hook notified of every signal a scene emits, before the
/// sequencer acts on it.
pub trait SignalObserver {
    /// Called once per signal with the scene that emitted it.
    fn on_signal(&mut self, scene: Scene, signal: &SceneSignal);
}

/// One run of the narrative, from invitation to finale.
pub struct Narrative {
    sequencer: Sequencer,
    scene: Option<SceneController>,
    media: MediaController,
    timers: Scheduler<Timer>,
    clock: Arc<dyn Clock>,
    observers: Vec<Box<dyn SignalObserver>>,
    correlation_id: Uuid,
}

impl std::fmt::Debug for Narrative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrative")
            .field("sequencer", &self.sequencer)
            .field("scene", &self.scene)
            .field("media", &self.media)
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl Narrative {
    /// Mounts the first scene.
    #[must_use]
    pub fn new(media: MediaController, clock: Arc<dyn Clock>) -> Self {
        Self::with_id(Uuid::new_v4(), media, clock)
    }

    /// Mounts the first scene under a known sequencer ID.
    #[must_use]
    pub fn with_id(id: Uuid, media: MediaController, clock: Arc<dyn Clock>) -> Self {
        let mut timers = Scheduler::new();
        let scene = SceneController::mount(Scene::FIRST, &mut timers, clock.as_ref());
        info!(sequencer_id = %id, scene = %Scene::FIRST, "narrative mounted");
        Self {
            sequencer: Sequencer::new(id),
            scene: Some(scene),
            media,
            timers,
            clock,
            observers: Vec::new(),
            correlation_id: Uuid::nil(),
        }
    }

    /// Registers a signal observer.
    pub fn add_observer(&mut self, observer: Box<dyn SignalObserver>) {
        self.observers.push(observer);
    }

    /// The sequencer aggregate.
    #[must_use]
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    /// Current sequencer state.
    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Current media request state.
    #[must_use]
    pub fn media_state(&self) -> MediaState {
        self.media.state()
    }

    /// Projection of the mounted scene, or `Handoff` between scenes.
    #[must_use]
    pub fn frame(&self) -> SceneFrame {
        self.scene
            .as_ref()
            .map_or(SceneFrame::Handoff, SceneController::frame)
    }

    /// When the next timer becomes due, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_deadline()
    }

    /// Number of timers still pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` after [`Narrative::teardown`].
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.sequencer.is_torn_down()
    }

    /// Delivers one input to the active scene and relays what it emits.
    /// Input is dropped during a handoff and after teardown.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if a relayed advance is rejected.
    #[instrument(skip(self, command), fields(correlation_id = %command.correlation_id))]
    pub fn handle_input(&mut self, command: &HandleInput) -> Result<(), DomainError> {
        if self.sequencer.is_torn_down() {
            debug!("input after teardown dropped");
            return Ok(());
        }
        if self.sequencer.state().transitioning {
            debug!(input = ?command.input, "input suppressed during handoff");
            return Ok(());
        }
        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };
        self.correlation_id = command.correlation_id;
        let signals = scene.handle_input(&command.input, &mut self.timers, self.clock.as_ref());
        self.relay(signals)
    }

    /// Dispatches every timer due now, in due order. Returns how many fired.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if a relayed advance is rejected.
    pub fn run_due_timers(&mut self) -> Result<usize, DomainError> {
        if self.sequencer.is_torn_down() {
            return Ok(0);
        }
        let now = self.clock.now();
        let mut fired = 0;
        while let Some((handle, timer)) = self.timers.pop_due(now) {
            fired += 1;
            debug!(%handle, ?timer, "timer fired");
            match timer {
                Timer::Handoff { to } => self.complete_handoff(handle, to),
                Timer::Scene(timer) => {
                    let Some(scene) = self.scene.as_mut() else {
                        continue;
                    };
                    let signals = scene.on_timer(timer, &mut self.timers, self.clock.as_ref());
                    self.relay(signals)?;
                }
            }
        }
        Ok(fired)
    }

    /// Cancels every pending timer, unmounts the scene and pauses all
    /// media. Afterwards input and timers are no-ops. Idempotent.
    pub fn teardown(&mut self) {
        if self.sequencer.is_torn_down() {
            return;
        }
        if let Some(mut scene) = self.scene.take() {
            scene.teardown(&mut self.timers);
        }
        let dropped = self.timers.cancel_all();
        self.media.shutdown();
        self.sequencer.tear_down(self.correlation_id, self.clock.as_ref());
        info!(dropped, "narrative torn down");
    }

    /// Takes every journal event recorded since the last drain.
    pub fn drain_journal(&mut self) -> Vec<SequencerEvent> {
        let events = self.sequencer.uncommitted_events().to_vec();
        self.sequencer.clear_uncommitted_events();
        events
    }

    /// Runs the transition protocol towards `next`.
    pub(crate) fn advance_to(&mut self, next: Scene) -> Result<AdvanceOutcome, DomainError> {
        let outcome =
            self.sequencer.begin_transition(next, self.correlation_id, self.clock.as_ref())?;
        let AdvanceOutcome::Started { from, to, effect } = outcome else {
            debug!(%next, "advance ignored, handoff already in flight");
            return Ok(outcome);
        };

        match effect {
            BoundaryEffect::StartAmbient => self.media.start_ambient(),
            BoundaryEffect::StopAmbientPlayClimax => {
                self.media.stop_ambient();
                self.media.play_climax();
            }
            BoundaryEffect::None => {}
        }

        if let Some(mut outgoing) = self.scene.take() {
            outgoing.teardown(&mut self.timers);
            if outgoing.scene() == Scene::Reveal {
                self.media.stop_video();
            }
        }

        let handle = self.timers.schedule(
            TimeDelta::milliseconds(HANDOFF_MS),
            Timer::Handoff { to },
            self.clock.as_ref(),
        );
        self.sequencer.set_handoff(handle);
        info!(%from, %to, ?effect, "transition started");
        Ok(outcome)
    }

    fn complete_handoff(&mut self, handle: TimerHandle, to: Scene) {
        if self.sequencer.handoff() != Some(handle)
            || !self.sequencer.complete_handoff(to, self.correlation_id, self.clock.as_ref())
        {
            warn!(%handle, %to, "stale handoff ignored");
            return;
        }
        self.scene = Some(SceneController::mount(to, &mut self.timers, self.clock.as_ref()));
        info!(scene = %to, "scene entered");
    }

    fn relay(&mut self, signals: Vec<SceneSignal>) -> Result<(), DomainError> {
        let scene = self.sequencer.state().current_scene;
        for signal in signals {
            for observer in &mut self.observers {
                observer.on_signal(scene, &signal);
            }
            match signal {
                SceneSignal::Advance => {
                    let next = scene.next().ok_or_else(|| {
                        DomainError::Validation(format!("{scene} has no following scene"))
                    })?;
                    self.advance_to(next)?;
                }
                SceneSignal::MediaRevealed => {
                    self.sequencer
                        .record_media_revealed(self.correlation_id, self.clock.as_ref());
                    self.media.play_video();
                }
                SceneSignal::CelebrationStarted { duration_ms } => {
                    self.sequencer.record_celebration(
                        duration_ms,
                        self.correlation_id,
                        self.clock.as_ref(),
                    );
                }
            }
        }
        Ok(())
    }
}

impl Drop for Narrative {
    fn drop(&mut self) {
        self.teardown();
    }
}
