//! The closing greeting. The finale never advances.

use chrono::TimeDelta;
use keepsake_core::clock::Clock;
use keepsake_core::scheduler::{Scheduler, TimerHandle};
use serde::Serialize;

use super::signals::{SceneSignal, SceneTimer};

/// Delay between the greeting and the personal message.
pub const MESSAGE_DELAY_MS: i64 = 3_000;

/// Local state of the finale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalePhase {
    /// Only the headline greeting is shown.
    Greeting,
    /// The personal message has unfolded.
    Message,
}

/// Controller for the finale scene.
#[derive(Debug)]
pub struct Finale {
    phase: FinalePhase,
    message: Option<TimerHandle>,
}

impl Finale {
    /// Mounts the finale and schedules the personal message.
    pub fn mount<T: From<SceneTimer>>(timers: &mut Scheduler<T>, clock: &dyn Clock) -> Self {
        let message = timers.schedule(
            TimeDelta::milliseconds(MESSAGE_DELAY_MS),
            SceneTimer::MessageReveal.into(),
            clock,
        );
        Self {
            phase: FinalePhase::Greeting,
            message: Some(message),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FinalePhase {
        self.phase
    }

    /// Unfolds the message. Emits nothing.
    pub fn on_timer(&mut self, timer: SceneTimer) -> Vec<SceneSignal> {
        if timer == SceneTimer::MessageReveal && self.phase == FinalePhase::Greeting {
            self.phase = FinalePhase::Message;
            self.message = None;
        }
        Vec::new()
    }

    /// Cancels the pending message, if any.
    pub fn teardown<T>(&mut self, timers: &mut Scheduler<T>) {
        if let Some(handle) = self.message.take() {
            timers.cancel(handle);
        }
    }
}
