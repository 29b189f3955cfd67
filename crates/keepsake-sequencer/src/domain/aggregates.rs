//! The sequencer aggregate.

use keepsake_core::aggregate::AggregateRoot;
use keepsake_core::clock::Clock;
use keepsake_core::error::DomainError;
use keepsake_core::event::EventMetadata;
use keepsake_core::scene::Scene;
use keepsake_core::scheduler::TimerHandle;
use serde::Serialize;
use uuid::Uuid;

use super::boundary::{BoundaryEffect, boundary_effect};
use super::events::{
    BoundaryEffectApplied, CelebrationStarted, MediaRevealed, SceneEntered, SequencerEvent,
    SequencerEventKind, TornDown, TransitionStarted,
};

/// Length of the visual handoff between two scenes.
pub const HANDOFF_MS: i64 = 500;

/// Which scene is current and whether a handoff is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequencerState {
    /// The scene being shown (or being left, during a handoff).
    pub current_scene: Scene,
    /// `true` only during the handoff window.
    pub transitioning: bool,
}

/// Result of asking the sequencer to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A handoff was already in flight; nothing changed.
    Ignored,
    /// A handoff began.
    Started {
        /// The scene being left.
        from: Scene,
        /// The scene being entered.
        to: Scene,
        /// The media cue the caller must apply.
        effect: BoundaryEffect,
    },
}

/// The aggregate root for one run of the narrative.
#[derive(Debug)]
pub struct Sequencer {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    state: SequencerState,
    handoff: Option<TimerHandle>,
    torn_down: bool,
    /// Applied events not yet drained into the journal.
    uncommitted_events: Vec<SequencerEvent>,
}

impl Sequencer {
    /// Creates a sequencer on the first scene.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            state: SequencerState {
                current_scene: Scene::FIRST,
                transitioning: false,
            },
            handoff: None,
            torn_down: false,
            uncommitted_events: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Returns `true` after teardown.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The pending handoff timer, if a transition is in flight.
    #[must_use]
    pub fn handoff(&self) -> Option<TimerHandle> {
        self.handoff
    }

    /// Starts a handoff to `next`.
    ///
    /// Ignored while another handoff is in flight. The caller applies the
    /// returned boundary effect and schedules the handoff completion.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` unless `next` is the
    /// immediate successor of the current scene.
    pub fn begin_transition(
        &mut self,
        next: Scene,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<AdvanceOutcome, DomainError> {
        if self.state.transitioning {
            return Ok(AdvanceOutcome::Ignored);
        }
        let from = self.state.current_scene;
        if from.next() != Some(next) {
            return Err(DomainError::InvalidTransition { from, to: next });
        }

        self.record(
            SequencerEventKind::TransitionStarted(TransitionStarted { from, to: next }),
            correlation_id,
            clock,
        );
        let effect = boundary_effect(from, next);
        if effect != BoundaryEffect::None {
            self.record(
                SequencerEventKind::BoundaryEffectApplied(BoundaryEffectApplied { effect }),
                correlation_id,
                clock,
            );
        }
        Ok(AdvanceOutcome::Started {
            from,
            to: next,
            effect,
        })
    }

    /// Remembers the timer that will complete the current handoff.
    pub fn set_handoff(&mut self, handle: TimerHandle) {
        self.handoff = Some(handle);
    }

    /// Completes the handoff to `to`. Returns `false` (and changes nothing)
    /// if no matching handoff is in flight.
    pub fn complete_handoff(&mut self, to: Scene, correlation_id: Uuid, clock: &dyn Clock) -> bool {
        if !self.state.transitioning || self.state.current_scene.next() != Some(to) {
            return false;
        }
        self.handoff = None;
        self.record(
            SequencerEventKind::SceneEntered(SceneEntered { scene: to }),
            correlation_id,
            clock,
        );
        true
    }

    /// Journals that the current scene revealed its media.
    pub fn record_media_revealed(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let scene = self.state.current_scene;
        self.record(
            SequencerEventKind::MediaRevealed(MediaRevealed { scene }),
            correlation_id,
            clock,
        );
    }

    /// Journals that the celebration started.
    pub fn record_celebration(
        &mut self,
        duration_ms: i64,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        self.record(
            SequencerEventKind::CelebrationStarted(CelebrationStarted { duration_ms }),
            correlation_id,
            clock,
        );
    }

    /// Marks the sequencer as torn down. Idempotent.
    pub fn tear_down(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        if self.torn_down {
            return;
        }
        self.handoff = None;
        let scene = self.state.current_scene;
        self.record(
            SequencerEventKind::TornDown(TornDown { scene }),
            correlation_id,
            clock,
        );
    }

    fn record(&mut self, kind: SequencerEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        let event = SequencerEvent {
            metadata: EventMetadata::stamp(
                kind.type_name(),
                self.id,
                self.version + 1,
                correlation_id,
                clock,
            ),
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl AggregateRoot for Sequencer {
    type Event = SequencerEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            SequencerEventKind::TransitionStarted(_) => {
                self.state.transitioning = true;
            }
            SequencerEventKind::SceneEntered(payload) => {
                self.state.current_scene = payload.scene;
                self.state.transitioning = false;
            }
            SequencerEventKind::TornDown(_) => {
                self.torn_down = true;
            }
            SequencerEventKind::BoundaryEffectApplied(_)
            | SequencerEventKind::MediaRevealed(_)
            | SequencerEventKind::CelebrationStarted(_) => {}
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
