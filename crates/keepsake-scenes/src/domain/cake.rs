//! The interactive cake.
//!
//! `Whole --tap/swipe--> Slicing --800ms--> Sliced --2000ms--> advance`.
//! A manual control advances from any phase; the scene advances at most
//! once per activation.

use chrono::TimeDelta;
use keepsake_core::clock::Clock;
use keepsake_core::scheduler::{Scheduler, TimerHandle};
use serde::Serialize;
use tracing::{debug, info};

use super::gesture::is_slice_swipe;
use super::signals::{SceneInput, SceneSignal, SceneTimer};

/// How long the knife takes to cut.
pub const SLICE_WINDOW_MS: i64 = 800;
/// How long the confetti runs before the scene advances.
pub const CELEBRATION_MS: i64 = 2_000;

/// Local state of the cake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CakePhase {
    /// Waiting for the cut.
    Whole,
    /// The knife is moving.
    Slicing,
    /// Cut; confetti is falling.
    Sliced,
}

/// Controller for the cake scene.
#[derive(Debug)]
pub struct Cake {
    phase: CakePhase,
    pending: Option<TimerHandle>,
    advanced: bool,
}

impl Default for Cake {
    fn default() -> Self {
        Self::new()
    }
}

impl Cake {
    /// Creates a whole cake.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: CakePhase::Whole,
            pending: None,
            advanced: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CakePhase {
        self.phase
    }

    /// Returns `true` once the scene has asked to advance.
    #[must_use]
    pub fn has_advanced(&self) -> bool {
        self.advanced
    }

    /// Handles the cut gesture and the manual advance control.
    pub fn handle_input<T: From<SceneTimer>>(
        &mut self,
        input: &SceneInput,
        timers: &mut Scheduler<T>,
        clock: &dyn Clock,
    ) -> Vec<SceneSignal> {
        if self.advanced {
            debug!(?input, "cake already advanced");
            return Vec::new();
        }
        match input {
            SceneInput::ManualAdvance => {
                self.cancel_pending(timers);
                self.advanced = true;
                info!(phase = ?self.phase, "cake advanced manually");
                vec![SceneSignal::Advance]
            }
            SceneInput::Tap if self.phase == CakePhase::Whole => self.start_slicing(timers, clock),
            SceneInput::Swipe { dx, dy } if self.phase == CakePhase::Whole => {
                if is_slice_swipe(*dx, *dy) {
                    self.start_slicing(timers, clock)
                } else {
                    debug!(dx, dy, "swipe too short or too vertical");
                    Vec::new()
                }
            }
            _ => {
                debug!(?input, phase = ?self.phase, "cake ignored input");
                Vec::new()
            }
        }
    }

    /// Advances the cut and the celebration. Stale timers are inert.
    pub fn on_timer<T: From<SceneTimer>>(
        &mut self,
        timer: SceneTimer,
        timers: &mut Scheduler<T>,
        clock: &dyn Clock,
    ) -> Vec<SceneSignal> {
        if self.advanced {
            return Vec::new();
        }
        match (self.phase, timer) {
            (CakePhase::Slicing, SceneTimer::SliceComplete) => {
                self.phase = CakePhase::Sliced;
                self.pending = Some(timers.schedule(
                    TimeDelta::milliseconds(CELEBRATION_MS),
                    SceneTimer::CelebrationComplete.into(),
                    clock,
                ));
                info!("cake sliced");
                vec![SceneSignal::CelebrationStarted {
                    duration_ms: CELEBRATION_MS,
                }]
            }
            (CakePhase::Sliced, SceneTimer::CelebrationComplete) => {
                self.pending = None;
                self.advanced = true;
                vec![SceneSignal::Advance]
            }
            _ => Vec::new(),
        }
    }

    /// Cancels whichever timer is pending.
    pub fn teardown<T>(&mut self, timers: &mut Scheduler<T>) {
        self.cancel_pending(timers);
    }

    fn start_slicing<T: From<SceneTimer>>(
        &mut self,
        timers: &mut Scheduler<T>,
        clock: &dyn Clock,
    ) -> Vec<SceneSignal> {
        self.phase = CakePhase::Slicing;
        self.pending = Some(timers.schedule(
            TimeDelta::milliseconds(SLICE_WINDOW_MS),
            SceneTimer::SliceComplete.into(),
            clock,
        ));
        Vec::new()
    }

    fn cancel_pending<T>(&mut self, timers: &mut Scheduler<T>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use keepsake_test_support::ManualClock;

    use super::*;

    struct Harness {
        clock: ManualClock,
        timers: Scheduler<SceneTimer>,
        cake: Cake,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                clock: ManualClock::new(),
                timers: Scheduler::new(),
                cake: Cake::new(),
            }
        }

        fn input(&mut self, input: SceneInput) -> Vec<SceneSignal> {
            self.cake.handle_input(&input, &mut self.timers, &self.clock)
        }

        fn elapse(&mut self, ms: i64) -> Vec<SceneSignal> {
            self.clock.advance_ms(ms);
            let mut signals = Vec::new();
            while let Some((_, timer)) = self.timers.pop_due(self.clock.now()) {
                signals.extend(self.cake.on_timer(timer, &mut self.timers, &self.clock));
            }
            signals
        }
    }

    #[test]
    fn test_swipe_slices_then_celebrates_then_advances() {
        // Arrange
        let mut h = Harness::new();

        // Act
        let on_swipe = h.input(SceneInput::Swipe { dx: 120.0, dy: 10.0 });
        let after_slice = h.elapse(SLICE_WINDOW_MS);
        let before_end = h.elapse(CELEBRATION_MS - 1);
        let at_end = h.elapse(1);

        // Assert
        assert!(on_swipe.is_empty());
        assert_eq!(
            after_slice,
            vec![SceneSignal::CelebrationStarted {
                duration_ms: CELEBRATION_MS
            }]
        );
        assert!(before_end.is_empty());
        assert_eq!(at_end, vec![SceneSignal::Advance]);
        assert_eq!(h.cake.phase(), CakePhase::Sliced);
    }

    #[test]
    fn test_vertical_swipe_does_not_slice() {
        let mut h = Harness::new();

        h.input(SceneInput::Swipe { dx: 5.0, dy: 90.0 });

        assert_eq!(h.cake.phase(), CakePhase::Whole);
        assert!(h.timers.is_empty());
    }

    #[test]
    fn test_repeated_taps_while_slicing_are_ignored() {
        let mut h = Harness::new();
        h.input(SceneInput::Tap);

        h.input(SceneInput::Tap);
        h.input(SceneInput::Swipe { dx: 200.0, dy: 0.0 });

        assert_eq!(h.timers.len(), 1);
        assert_eq!(h.cake.phase(), CakePhase::Slicing);
    }

    #[test]
    fn test_manual_advance_in_every_phase_advances_exactly_once() {
        for taps_and_waits in [0, 1, 2] {
            // Arrange
            let mut h = Harness::new();
            if taps_and_waits >= 1 {
                h.input(SceneInput::Tap);
            }
            if taps_and_waits >= 2 {
                h.elapse(SLICE_WINDOW_MS);
            }

            // Act
            let mut signals = h.input(SceneInput::ManualAdvance);
            signals.extend(h.input(SceneInput::ManualAdvance));
            signals.extend(h.elapse(CELEBRATION_MS * 5));

            // Assert
            let advances = signals
                .iter()
                .filter(|s| **s == SceneSignal::Advance)
                .count();
            assert_eq!(advances, 1, "phase index {taps_and_waits}");
            assert!(h.timers.is_empty());
        }
    }

    #[test]
    fn test_input_after_natural_advance_is_ignored() {
        let mut h = Harness::new();
        h.input(SceneInput::Tap);
        h.elapse(SLICE_WINDOW_MS + CELEBRATION_MS);

        let signals = h.input(SceneInput::ManualAdvance);

        assert!(signals.is_empty());
        assert!(h.cake.has_advanced());
    }
}
