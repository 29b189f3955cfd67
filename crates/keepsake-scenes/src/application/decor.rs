//! Decorative layout.
//!
//! Sparkle fields and confetti bursts are regenerated from the RNG on every
//! render and never stored in scene state.

use keepsake_core::rng::DeterministicRng;

/// Sparkles floating around the finale greeting.
pub const FINALE_SPARKLES: usize = 8;
/// Confetti pieces in the cake celebration.
pub const CONFETTI_PIECES: usize = 200;

/// One sparkle, positioned in unit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    /// Horizontal position in `[0, 1)`.
    pub x: f64,
    /// Vertical position in `[0, 1)`.
    pub y: f64,
    /// Delay before the sparkle first twinkles, in seconds.
    pub delay_secs: f64,
}

/// One piece of confetti.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal launch position in `[0, 1)`.
    pub x: f64,
    /// Palette index.
    pub color: u32,
    /// Spin in degrees per second.
    pub spin: u32,
}

/// Palette used by the confetti burst.
pub const CONFETTI_COLORS: [&str; 4] = ["dusty-rose", "soft-gold", "sage", "cream"];

/// Lays out `count` sparkles.
pub fn sparkle_field(rng: &mut dyn DeterministicRng, count: usize) -> Vec<Sparkle> {
    (0..count)
        .map(|_| Sparkle {
            x: rng.next_f64(),
            y: rng.next_f64(),
            delay_secs: rng.next_f64() * 4.0,
        })
        .collect()
}

/// Lays out `count` confetti pieces.
pub fn confetti_burst(rng: &mut dyn DeterministicRng, count: usize) -> Vec<ConfettiPiece> {
    #[allow(clippy::cast_possible_truncation)]
    let last_color = (CONFETTI_COLORS.len() - 1) as u32;
    (0..count)
        .map(|_| ConfettiPiece {
            x: rng.next_f64(),
            color: rng.next_u32_range(0, last_color),
            spin: rng.next_u32_range(90, 720),
        })
        .collect()
}
