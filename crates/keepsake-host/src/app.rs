//! The host loop.
//!
//! Waits on whichever comes first: the next timer deadline or the next
//! input line. Due timers always run before input is delivered. After each
//! step the journal is flushed to the log and the
//! frame is redrawn if it changed.

use std::io::Write;
use std::sync::Arc;

use keepsake_core::clock::{Clock, SystemClock};
use keepsake_core::event::DomainEvent;
use keepsake_core::rng::DeterministicRng;
use keepsake_core::scene::Scene;
use keepsake_media::MediaController;
use keepsake_scenes::application::controller::SceneFrame;
use keepsake_scenes::application::presentation::render_or_fallback;
use keepsake_scenes::domain::signals::SceneSignal;
use keepsake_sequencer::application::query_handlers::{get_view, progress_indicator};
use keepsake_sequencer::application::runtime::{Narrative, SignalObserver};
use keepsake_sequencer::domain::commands::HandleInput;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use crate::backend::FileMediaBackend;
use crate::config::HostConfig;
use crate::console::{ConsoleCommand, parse_command};
use crate::error::AppError;
use crate::render::{TextRenderer, indicator_line};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// The scene on screen when the host stopped.
    pub final_scene: Scene,
    /// Input lines accepted by the parser.
    pub inputs_handled: usize,
}

struct SignalLogger;

impl SignalObserver for SignalLogger {
    fn on_signal(&mut self, scene: Scene, signal: &SceneSignal) {
        debug!(%scene, ?signal, "scene signal");
    }
}

struct Screen<W> {
    out: W,
    renderer: TextRenderer,
    last: Option<SceneFrame>,
}

impl<W: Write> Screen<W> {
    fn present(&mut self, narrative: &Narrative) -> Result<(), AppError> {
        let frame = narrative.frame();
        if self.last == Some(frame) {
            return Ok(());
        }
        self.last = Some(frame);
        let text = render_or_fallback(&mut self.renderer, &frame);
        let dots = indicator_line(&progress_indicator(narrative.state().current_scene));
        writeln!(self.out, "\n{text}\n\n{dots}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Runs the narrative against the real clock and the file-backed media
/// backend until `quit`, end of input with no pending timers, or ctrl-c.
///
/// # Errors
///
/// Returns `AppError` if reading input or writing output fails.
pub async fn run<R, W>(
    config: &HostConfig,
    rng: Box<dyn DeterministicRng>,
    input: R,
    out: W,
) -> Result<RunSummary, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let media = MediaController::new(Box::new(FileMediaBackend::new()), config.assets.clone());
    let mut narrative = Narrative::new(media, clock.clone());
    narrative.add_observer(Box::new(SignalLogger));

    let mut screen = Screen {
        out,
        renderer: TextRenderer::new(config.render_width, rng),
        last: None,
    };
    let mut lines = input.lines();
    let mut input_open = true;
    let mut inputs_handled = 0;

    screen.present(&narrative)?;
    loop {
        if !input_open && narrative.pending_timers() == 0 {
            info!("input closed and no timers pending");
            break;
        }
        let wait = narrative
            .next_deadline()
            .map(|deadline| (deadline - clock.now()).to_std().unwrap_or_default());

        tokio::select! {
            biased;

            () = sleep_for(wait) => {
                if let Err(e) = narrative.run_due_timers() {
                    warn!(error = %e, "timer dispatch failed");
                }
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Ok(ConsoleCommand::Input(scene_input)) => {
                        inputs_handled += 1;
                        // A handoff that is already overdue completes before the input lands.
                        if let Err(e) = narrative.run_due_timers() {
                            warn!(error = %e, "timer dispatch failed");
                        }
                        if let Err(e) = narrative.handle_input(&HandleInput::new(scene_input)) {
                            warn!(error = %e, "input rejected");
                        }
                    }
                    Ok(ConsoleCommand::Status) => {
                        writeln!(screen.out, "{}", serde_json::to_string(&get_view(&narrative))?)?;
                    }
                    Ok(ConsoleCommand::Quit) => break,
                    Err(e) => writeln!(screen.out, "{e}")?,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }

        flush_journal(&mut narrative);
        screen.present(&narrative)?;
    }

    narrative.teardown();
    flush_journal(&mut narrative);
    Ok(RunSummary {
        final_scene: narrative.state().current_scene,
        inputs_handled,
    })
}

async fn sleep_for(wait: Option<std::time::Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

fn flush_journal(narrative: &mut Narrative) {
    for event in narrative.drain_journal() {
        info!(
            event_type = event.event_type(),
            sequence = event.sequence_number(),
            correlation_id = %event.metadata().correlation_id,
            payload = %event.to_payload(),
            "journal"
        );
    }
}
