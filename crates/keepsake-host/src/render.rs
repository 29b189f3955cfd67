//! Plain-text scene renderer.

use keepsake_core::rng::DeterministicRng;
use keepsake_scenes::application::controller::SceneFrame;
use keepsake_scenes::application::decor::{
    CONFETTI_PIECES, FINALE_SPARKLES, confetti_burst, sparkle_field,
};
use keepsake_scenes::application::presentation::{HANDOFF_TEXT, RenderError, SceneRenderer};
use keepsake_scenes::domain::cake::CakePhase;
use keepsake_scenes::domain::finale::FinalePhase;
use keepsake_scenes::domain::invitation::InvitationPhase;
use keepsake_scenes::domain::reveal::RevealPhase;
use keepsake_sequencer::application::query_handlers::IndicatorMark;

/// Narrowest surface the decorated layout fits on.
pub const MIN_RENDER_WIDTH: usize = 24;

const BIRTHDAY_TEXT: &str = "Happy Birthday, Somya!";
const PERSONAL_MESSAGE: &str =
    "May your special day be filled with endless joy and beautiful memories! ❤️";
const SIGNATURE: &str = "With all my love and wishes ❤️ Nischal";
const CONFETTI_GLYPHS: [char; 4] = ['*', '+', '~', '.'];

/// Renders frames as centred lines of text.
pub struct TextRenderer {
    width: usize,
    rng: Box<dyn DeterministicRng>,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl TextRenderer {
    /// Creates a renderer for a surface `width` columns wide.
    #[must_use]
    pub fn new(width: usize, rng: Box<dyn DeterministicRng>) -> Self {
        Self { width, rng }
    }

    fn centred(&self, text: &str) -> String {
        let len = text.chars().count();
        let pad = self.width.saturating_sub(len) / 2;
        format!("{}{text}", " ".repeat(pad))
    }

    fn wrapped(&self, text: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let needed = current.chars().count() + word.chars().count() + 1;
            if !current.is_empty() && needed > self.width {
                lines.push(self.centred(&current));
                current.clear();
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            lines.push(self.centred(&current));
        }
        lines
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn column(&self, x: f64) -> usize {
        ((x * self.width as f64) as usize).min(self.width - 1)
    }

    fn sparkle_row(&mut self) -> String {
        let mut row = vec![' '; self.width];
        for sparkle in sparkle_field(self.rng.as_mut(), FINALE_SPARKLES) {
            row[self.column(sparkle.x)] = '✦';
        }
        row.into_iter().collect::<String>().trim_end().to_owned()
    }

    fn confetti_row(&mut self) -> String {
        let mut row = vec![' '; self.width];
        for piece in confetti_burst(self.rng.as_mut(), CONFETTI_PIECES) {
            let glyph = CONFETTI_GLYPHS
                .get(piece.color as usize)
                .copied()
                .unwrap_or('*');
            row[self.column(piece.x)] = glyph;
        }
        row.into_iter().collect()
    }
}

impl SceneRenderer for TextRenderer {
    fn render(&mut self, frame: &SceneFrame) -> Result<String, RenderError> {
        if matches!(frame, SceneFrame::Handoff) {
            return Ok(self.centred(HANDOFF_TEXT));
        }
        if self.width < MIN_RENDER_WIDTH {
            return Err(RenderError::Layout(format!(
                "{} columns is narrower than the minimum of {MIN_RENDER_WIDTH}",
                self.width
            )));
        }

        let mut lines = Vec::new();
        match *frame {
            SceneFrame::Invitation { phase } => {
                lines.push(self.centred("For my dearest, Behli"));
                lines.push(String::new());
                match phase {
                    InvitationPhase::Closed => {
                        lines.push(self.centred("[ gift box ]"));
                        lines.push(self.centred("Tap to unwrap your surprise"));
                    }
                    InvitationPhase::Opening => lines.push(self.centred("[ the lid lifts ]")),
                }
            }
            SceneFrame::Gallery { photos, lightbox } => {
                lines.push(self.centred("Our Beautiful Journey"));
                lines.push(String::new());
                if let Some(photo) = lightbox {
                    lines.push(self.centred(&format!("[ {} ]", photo.source)));
                    lines.extend(self.wrapped(photo.caption));
                    lines.push(self.centred("(close)"));
                } else {
                    for photo in photos {
                        lines.push(format!("  {}. {}", photo.id, photo.caption));
                    }
                    lines.push(String::new());
                    lines.push(self.centred("Continue the Journey"));
                }
            }
            SceneFrame::Reveal { phase } => {
                lines.push(self.centred("A little surprise for you..."));
                lines.push(String::new());
                lines.push(self.centred(match phase {
                    RevealPhase::Idle => "Tap to bloom",
                    RevealPhase::Blooming => "[ the flower opens ]",
                    RevealPhase::Revealed => "[ video playing, muted ]",
                }));
            }
            SceneFrame::Cake { phase } => {
                lines.push(self.centred("Make a Wish!"));
                lines.push(String::new());
                match phase {
                    CakePhase::Whole => {
                        lines.push(self.centred("Tap or swipe the cake to slice it!"));
                    }
                    CakePhase::Slicing => lines.push(self.centred("[ slicing ]")),
                    CakePhase::Sliced => {
                        lines.push(self.confetti_row());
                        lines.push(self.centred("[ a perfect slice ]"));
                    }
                }
                lines.push(String::new());
                lines.push(self.centred("Continue to Finale (skip)"));
            }
            SceneFrame::Finale { phase } => {
                lines.push(self.sparkle_row());
                lines.push(self.centred(BIRTHDAY_TEXT));
                if phase == FinalePhase::Message {
                    lines.push(String::new());
                    lines.extend(self.wrapped(PERSONAL_MESSAGE));
                    lines.push(String::new());
                    lines.push(format!(
                        "{}{SIGNATURE}",
                        " ".repeat(self.width.saturating_sub(SIGNATURE.chars().count()))
                    ));
                }
                lines.push(self.sparkle_row());
            }
            SceneFrame::Handoff => {}
        }
        Ok(lines.join("\n"))
    }
}

/// Draws the progress dots, one per scene, with the current one filled.
#[must_use]
pub fn indicator_line(marks: &[IndicatorMark]) -> String {
    marks
        .iter()
        .map(|mark| if mark.active { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use keepsake_scenes::application::presentation::render_or_fallback;
    use keepsake_scenes::domain::gallery::{PHOTOS, photo};
    use keepsake_sequencer::application::query_handlers::progress_indicator;
    use keepsake_test_support::{MockRng, SequenceRng};

    use keepsake_core::scene::Scene;

    use super::*;

    fn renderer(width: usize) -> TextRenderer {
        TextRenderer::new(width, Box::new(MockRng))
    }

    #[test]
    fn test_gallery_lists_every_caption() {
        let mut r = renderer(48);
        let frame = SceneFrame::Gallery {
            photos: &PHOTOS,
            lightbox: None,
        };

        let text = r.render(&frame).unwrap();

        for p in &PHOTOS {
            assert!(text.contains(p.caption));
        }
        assert!(text.contains("Continue the Journey"));
    }

    #[test]
    fn test_gallery_lightbox_shows_one_photo() {
        let mut r = renderer(48);
        let frame = SceneFrame::Gallery {
            photos: &PHOTOS,
            lightbox: photo(4),
        };

        let text = r.render(&frame).unwrap();

        assert!(text.contains("images/Photo4.svg"));
        assert!(text.contains("Adventures and fun times"));
        assert!(!text.contains("As always with you"));
    }

    #[test]
    fn test_finale_message_appears_only_after_unfolding() {
        let mut r = TextRenderer::new(48, Box::new(SequenceRng::new(vec![5, 40, 75, 90])));

        let greeting = r
            .render(&SceneFrame::Finale {
                phase: FinalePhase::Greeting,
            })
            .unwrap();
        let message = r
            .render(&SceneFrame::Finale {
                phase: FinalePhase::Message,
            })
            .unwrap();

        assert!(greeting.contains(BIRTHDAY_TEXT));
        assert!(!greeting.contains("Nischal"));
        assert!(message.contains("endless joy"));
        assert!(message.contains("Nischal"));
        assert!(message.lines().next().unwrap().contains('✦'));
    }

    #[test]
    fn test_sliced_cake_draws_confetti() {
        let mut r = TextRenderer::new(32, Box::new(SequenceRng::new(vec![0, 1, 50, 99])));

        let text = r
            .render(&SceneFrame::Cake {
                phase: CakePhase::Sliced,
            })
            .unwrap();

        assert!(text.contains("a perfect slice"));
        assert!(text.lines().any(|l| l.chars().any(|c| CONFETTI_GLYPHS.contains(&c))));
    }

    #[test]
    fn test_narrow_surface_is_a_layout_error_and_falls_back() {
        let mut r = renderer(MIN_RENDER_WIDTH - 1);
        let frame = SceneFrame::Cake {
            phase: CakePhase::Whole,
        };

        let direct = r.render(&frame);
        let shown = render_or_fallback(&mut r, &frame);

        assert!(matches!(direct, Err(RenderError::Layout(_))));
        assert_eq!(shown, "Make a Wish! Tap or swipe the cake to slice it.");
    }

    #[test]
    fn test_handoff_renders_on_any_width() {
        let mut r = renderer(4);

        let text = r.render(&SceneFrame::Handoff).unwrap();

        assert_eq!(text.trim(), HANDOFF_TEXT);
    }

    #[test]
    fn test_indicator_line_fills_the_current_scene() {
        let line = indicator_line(&progress_indicator(Scene::Reveal));

        assert_eq!(line, "○ ○ ● ○ ○");
    }
}
