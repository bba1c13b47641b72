//! Shared game record mutated by the scheduler's tasks.

use crate::alignment::{Placement, Span};
use log::debug;

/// Height of one layer's row band, including the gap to the next.
pub const ROW_HEIGHT: u8 = 13;
pub const WIN_LEVEL: u8 = 10;
pub const INITIAL_SPEED: u8 = 7;
pub const MIN_SPEED: u8 = 1;
/// Levels at which a placement makes the block faster.
pub const SPEEDUP_LEVELS: core::ops::RangeInclusive<u8> = 4..=8;

pub const START_BLOCK: Span = Span::new(92, 127);
pub const BASE_LAYER: Span = Span::new(48, 83);
pub const FIRST_BAND: Band = Band::new(0, 12);

/// Inclusive vertical extent of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Band {
    pub start: u8,
    pub end: u8,
}

impl Band {
    pub const fn new(start: u8, end: u8) -> Self {
        Band { start, end }
    }

    /// The band one row further up the stack. Wraps, since the motion task
    /// keeps advancing it while idle until the menu resets it.
    pub fn next(self) -> Self {
        Band {
            start: self.start.wrapping_add(ROW_HEIGHT),
            end: self.end.wrapping_add(ROW_HEIGHT),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    pub playing: bool,
    pub over: bool,
    /// Moving block extent.
    pub block: Span,
    /// Row band of the moving block.
    pub band: Band,
    /// Width of the stack in sub-blocks, 3 down to 1.
    pub width: u8,
    pub level: u8,
    /// Extent of the most recently placed layer.
    pub prev: Span,
    /// Ticks a wait state lasts before the block moves one pixel.
    pub speed: u8,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub const fn new() -> Self {
        GameState {
            playing: false,
            over: false,
            block: START_BLOCK,
            band: FIRST_BAND,
            width: 3,
            level: 1,
            prev: BASE_LAYER,
            speed: INITIAL_SPEED,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Puts the moving block back at its starting position on the first row.
    pub fn restart_block(&mut self) {
        self.block = START_BLOCK;
        self.band = FIRST_BAND;
    }

    pub fn has_won(&self) -> bool {
        self.level >= WIN_LEVEL
    }

    /// Commits a successful drop: the stack grows by one row, the reference
    /// layer becomes the placed one and the block speeds up in the speed-up
    /// band.
    pub fn apply(&mut self, placement: &Placement) {
        self.block.start = self.block.start.saturating_add(placement.shift);
        self.band = self.band.next();
        self.prev = placement.layer;
        self.width = placement.width;
        self.level = self.level.saturating_add(1);
        if SPEEDUP_LEVELS.contains(&self.level) {
            self.speed = self.speed.saturating_sub(1).max(MIN_SPEED);
        }
        debug!(
            "Placed {}..={} width {} level {} speed {}",
            placement.layer.start, placement.layer.end, self.width, self.level, self.speed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perfect() -> Placement {
        Placement {
            layer: BASE_LAYER,
            width: 3,
            shift: 0,
        }
    }

    #[test]
    fn test_initial_vector() {
        let game = GameState::new();
        assert!(!game.playing);
        assert!(!game.over);
        assert_eq!(game.block, Span::new(92, 127));
        assert_eq!(game.band, Band::new(0, 12));
        assert_eq!(game.width, 3);
        assert_eq!(game.level, 1);
        assert_eq!(game.prev, Span::new(48, 83));
        assert_eq!(game.speed, 7);
    }

    #[test]
    fn test_speed_band() {
        let mut game = GameState::new();
        for _ in 0..3 {
            game.apply(&perfect());
        }
        assert_eq!(game.level, 4);
        assert_eq!(game.speed, 6);

        for _ in 0..5 {
            game.apply(&perfect());
        }
        assert_eq!(game.level, 9);
        assert_eq!(game.speed, 2);

        game.apply(&perfect());
        assert_eq!(game.level, 10);
        assert_eq!(game.speed, 2);
        assert!(game.has_won());
    }

    #[test]
    fn test_speed_floor() {
        let mut game = GameState::new();
        game.speed = 1;
        game.level = 3;
        game.apply(&perfect());
        assert_eq!(game.speed, MIN_SPEED);
    }

    #[test]
    fn test_apply_shift_and_band() {
        let mut game = GameState::new();
        game.block = Span::new(38, 80);
        game.band = Band::new(13, 25);
        game.apply(&Placement {
            layer: Span::new(48, 71),
            width: 2,
            shift: 12,
        });
        assert_eq!(game.block, Span::new(50, 80));
        assert_eq!(game.band, Band::new(26, 38));
        assert_eq!(game.prev, Span::new(48, 71));
        assert_eq!(game.width, 2);
        assert_eq!(game.level, 2);
    }

    #[test]
    fn test_band_wraps() {
        assert_eq!(Band::new(247, 3).next().start, 4);
    }

    #[test]
    fn test_reset() {
        let mut game = GameState::new();
        game.playing = true;
        game.over = true;
        game.level = 7;
        game.speed = 3;
        game.prev = Span::new(72, 83);
        game.reset();
        assert_eq!(game, GameState::new());
    }
}
