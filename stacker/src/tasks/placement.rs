//! Watches the drop button and settles the block when it is released.

use super::{Context, Ticked};
use crate::alignment::{self, Outcome};
use crate::draw;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;
use log::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputState {
    WaitPress,
    ButtonPressed,
    /// Drop is held; the block is judged on release.
    CheckAlign,
}

impl InputState {
    pub fn tick<D>(self, ctx: &mut Context<'_, D>) -> Ticked<Self, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let held = ctx.buttons.drop;
        let mut drawn = Ok(());
        let next = match self {
            InputState::WaitPress if held && ctx.game.playing => InputState::ButtonPressed,
            InputState::WaitPress => InputState::WaitPress,
            InputState::ButtonPressed if held => InputState::CheckAlign,
            InputState::ButtonPressed => InputState::ButtonPressed,
            InputState::CheckAlign if held => InputState::CheckAlign,
            InputState::CheckAlign => {
                drawn = settle(ctx);
                InputState::WaitPress
            }
        };
        (next, drawn)
    }
}

/// Judges the block where it was released and records the outcome. The
/// outcome is recorded even when the layer cannot be drawn.
fn settle<D>(ctx: &mut Context<'_, D>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let game = &mut *ctx.game;
    match alignment::resolve(game.width, game.prev, game.block) {
        Outcome::Placed(placement) => {
            let drawn = draw::layer(ctx.display, placement.layer, game.band);
            game.apply(&placement);
            return drawn;
        }
        Outcome::Missed => {
            info!(
                "Missed at {}..={} on level {}",
                game.block.start, game.block.end, game.level
            );
            game.over = true;
        }
        Outcome::Unknown => warn!(
            "No placement rule for width {} over {}..={}",
            game.width, game.prev.start, game.prev.end
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Span;
    use crate::display::Framebuffer;
    use crate::draw::{BACKGROUND, BLOCK_BORDER};
    use crate::game::{Band, GameState};
    use crate::input::Buttons;
    use crate::tasks::tests::ClearOnly;

    fn run(state: InputState, game: &mut GameState, fb: &mut Framebuffer, drop: bool) -> InputState {
        let buttons = Buttons { drop, start: false };
        let mut ctx = Context::new(game, fb, buttons);
        let (next, drawn) = state.tick(&mut ctx);
        drawn.unwrap();
        next
    }

    fn playing() -> GameState {
        let mut game = GameState::new();
        game.playing = true;
        game
    }

    #[test]
    fn test_ignores_drop_when_idle() {
        let mut game = GameState::new();
        let mut fb = Framebuffer::new();
        assert_eq!(run(InputState::WaitPress, &mut game, &mut fb, true), InputState::WaitPress);
    }

    #[test]
    fn test_press_sequence() {
        let mut game = playing();
        let mut fb = Framebuffer::new();
        let state = run(InputState::WaitPress, &mut game, &mut fb, true);
        assert_eq!(state, InputState::ButtonPressed);
        let state = run(state, &mut game, &mut fb, true);
        assert_eq!(state, InputState::CheckAlign);
        let state = run(state, &mut game, &mut fb, true);
        assert_eq!(state, InputState::CheckAlign);
        assert_eq!(game.level, 1);
    }

    #[test]
    fn test_short_tap_is_swallowed() {
        // Released before the second sample: no drop is judged.
        let mut game = playing();
        let mut fb = Framebuffer::new();
        let state = run(InputState::WaitPress, &mut game, &mut fb, true);
        let state = run(state, &mut game, &mut fb, false);
        assert_eq!(state, InputState::ButtonPressed);
        assert_eq!(game.level, 1);
    }

    #[test]
    fn test_release_places_layer() {
        let mut game = playing();
        game.block = Span::new(50, 80);
        game.band = Band::new(13, 25);
        let mut fb = Framebuffer::new();

        let state = run(InputState::CheckAlign, &mut game, &mut fb, false);
        assert_eq!(state, InputState::WaitPress);
        assert_eq!(game.level, 2);
        assert_eq!(game.width, 3);
        assert_eq!(game.prev, Span::new(48, 83));
        assert_eq!(game.band, Band::new(26, 38));
        assert_eq!(fb.pixel(0, 13), Some(BACKGROUND));
        assert_eq!(fb.pixel(48, 13), Some(BLOCK_BORDER));
        assert_eq!(fb.pixel(127, 25), Some(BACKGROUND));
    }

    #[test]
    fn test_release_narrows_stack() {
        let mut game = playing();
        game.block = Span::new(38, 80);
        game.band = Band::new(13, 25);
        let mut fb = Framebuffer::new();

        run(InputState::CheckAlign, &mut game, &mut fb, false);
        assert_eq!(game.width, 2);
        assert_eq!(game.prev, Span::new(48, 71));
        assert_eq!(game.block.start, 50);
        assert_eq!(fb.pixel(72, 13), Some(BACKGROUND));
    }

    #[test]
    fn test_release_misses() {
        let mut game = playing();
        game.block = Span::new(10, 20);
        let mut fb = Framebuffer::new();

        let state = run(InputState::CheckAlign, &mut game, &mut fb, false);
        assert_eq!(state, InputState::WaitPress);
        assert!(game.over);
        assert_eq!(game.level, 1);
        assert!(fb.raw().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_unknown_entry_changes_nothing() {
        let mut game = playing();
        game.width = 1;
        game.prev = Span::new(0, 11);
        let before = game;
        let mut fb = Framebuffer::new();

        let state = run(InputState::CheckAlign, &mut game, &mut fb, false);
        assert_eq!(state, InputState::WaitPress);
        assert_eq!(game, before);
    }

    #[test]
    fn test_failed_layer_draw_still_places() {
        let mut game = playing();
        game.block = Span::new(50, 80);
        game.band = Band::new(13, 25);
        let mut panel = ClearOnly::default();

        let buttons = Buttons { drop: false, start: false };
        let mut ctx = Context::new(&mut game, &mut panel, buttons);
        let (state, drawn) = InputState::CheckAlign.tick(&mut ctx);
        assert_eq!(state, InputState::WaitPress);
        assert_eq!(drawn, Err(()));
        assert_eq!(game.level, 2);
        assert_eq!(game.band, Band::new(26, 38));
    }
}
