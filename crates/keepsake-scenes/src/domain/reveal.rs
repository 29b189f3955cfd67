//! The flower surprise.
//!
//! `Idle --tap--> Blooming --2500ms--> Revealed --video end/dismiss--> advance`

use chrono::TimeDelta;
use keepsake_core::clock::Clock;
use keepsake_core::scheduler::{Scheduler, TimerHandle};
use serde::Serialize;
use tracing::{debug, info};

use super::signals::{SceneInput, SceneSignal, SceneTimer};

/// How long the flower blooms before the video appears.
pub const BLOOM_WINDOW_MS: i64 = 2_500;

/// Local state of the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealPhase {
    /// The bud is waiting for a tap.
    Idle,
    /// The flower is opening.
    Blooming,
    /// The video is showing.
    Revealed,
}

/// Controller for the reveal scene.
#[derive(Debug)]
pub struct Reveal {
    phase: RevealPhase,
    bloom: Option<TimerHandle>,
    advanced: bool,
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}

impl Reveal {
    /// Creates an idle reveal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: RevealPhase::Idle,
            bloom: None,
            advanced: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// Handles taps on the bud and the end of the video.
    pub fn handle_input<T: From<SceneTimer>>(
        &mut self,
        input: &SceneInput,
        timers: &mut Scheduler<T>,
        clock: &dyn Clock,
    ) -> Vec<SceneSignal> {
        match (self.phase, input) {
            (RevealPhase::Idle, SceneInput::Tap) => {
                self.phase = RevealPhase::Blooming;
                self.bloom = Some(timers.schedule(
                    TimeDelta::milliseconds(BLOOM_WINDOW_MS),
                    SceneTimer::BloomComplete.into(),
                    clock,
                ));
                info!("flower blooming");
                Vec::new()
            }
            (RevealPhase::Revealed, SceneInput::VideoEnded | SceneInput::DismissVideo)
                if !self.advanced =>
            {
                self.advanced = true;
                vec![SceneSignal::Advance]
            }
            _ => {
                debug!(?input, phase = ?self.phase, "reveal ignored input");
                Vec::new()
            }
        }
    }

    /// Completes the bloom. Timers that arrive in any other phase are inert.
    pub fn on_timer(&mut self, timer: SceneTimer) -> Vec<SceneSignal> {
        if timer != SceneTimer::BloomComplete || self.phase != RevealPhase::Blooming {
            return Vec::new();
        }
        self.phase = RevealPhase::Revealed;
        self.bloom = None;
        vec![SceneSignal::MediaRevealed]
    }

    /// Cancels the pending bloom, if any.
    pub fn teardown<T>(&mut self, timers: &mut Scheduler<T>) {
        if let Some(handle) = self.bloom.take() {
            timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use keepsake_test_support::ManualClock;

    use super::*;

    fn fire_due(
        reveal: &mut Reveal,
        timers: &mut Scheduler<SceneTimer>,
        clock: &ManualClock,
    ) -> Vec<SceneSignal> {
        let mut signals = Vec::new();
        while let Some((_, timer)) = timers.pop_due(clock.now()) {
            signals.extend(reveal.on_timer(timer));
        }
        signals
    }

    #[test]
    fn test_tap_blooms_then_reveals_after_window() {
        // Arrange
        let clock = ManualClock::new();
        let mut timers = Scheduler::new();
        let mut reveal = Reveal::new();

        // Act
        reveal.handle_input(&SceneInput::Tap, &mut timers, &clock);
        clock.advance_ms(BLOOM_WINDOW_MS - 1);
        let early = fire_due(&mut reveal, &mut timers, &clock);
        clock.advance_ms(1);
        let on_time = fire_due(&mut reveal, &mut timers, &clock);

        // Assert
        assert!(early.is_empty());
        assert_eq!(on_time, vec![SceneSignal::MediaRevealed]);
        assert_eq!(reveal.phase(), RevealPhase::Revealed);
    }

    #[test]
    fn test_retap_while_blooming_schedules_nothing_new() {
        // Arrange
        let clock = ManualClock::new();
        let mut timers = Scheduler::new();
        let mut reveal = Reveal::new();
        reveal.handle_input(&SceneInput::Tap, &mut timers, &clock);

        // Act
        clock.advance_ms(1_000);
        reveal.handle_input(&SceneInput::Tap, &mut timers, &clock);
        reveal.handle_input(&SceneInput::Tap, &mut timers, &clock);
        clock.advance_ms(10_000);
        let signals = fire_due(&mut reveal, &mut timers, &clock);

        // Assert
        assert_eq!(signals, vec![SceneSignal::MediaRevealed]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_video_end_and_dismiss_advance_once() {
        let clock = ManualClock::new();
        let mut timers = Scheduler::new();
        let mut reveal = Reveal::new();
        reveal.handle_input(&SceneInput::Tap, &mut timers, &clock);
        clock.advance_ms(BLOOM_WINDOW_MS);
        fire_due(&mut reveal, &mut timers, &clock);

        let dismissed = reveal.handle_input(&SceneInput::DismissVideo, &mut timers, &clock);
        let ended = reveal.handle_input(&SceneInput::VideoEnded, &mut timers, &clock);

        assert_eq!(dismissed, vec![SceneSignal::Advance]);
        assert!(ended.is_empty());
    }

    #[test]
    fn test_video_end_before_reveal_is_ignored() {
        let clock = ManualClock::new();
        let mut timers: Scheduler<SceneTimer> = Scheduler::new();
        let mut reveal = Reveal::new();

        let signals = reveal.handle_input(&SceneInput::VideoEnded, &mut timers, &clock);

        assert!(signals.is_empty());
        assert_eq!(reveal.phase(), RevealPhase::Idle);
    }

    #[test]
    fn test_teardown_cancels_pending_bloom() {
        // Arrange
        let clock = ManualClock::new();
        let mut timers: Scheduler<SceneTimer> = Scheduler::new();
        let mut reveal = Reveal::new();
        reveal.handle_input(&SceneInput::Tap, &mut timers, &clock);

        // Act
        reveal.teardown(&mut timers);
        clock.advance_ms(BLOOM_WINDOW_MS * 2);

        // Assert
        assert!(timers.pop_due(clock.now()).is_none());
        assert_eq!(reveal.phase(), RevealPhase::Blooming);
    }
}
