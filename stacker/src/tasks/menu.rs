//! Title, start, game-over and win screens, and the reset flow.

use super::{Context, Ticked};
use crate::draw;
use crate::game::{BASE_LAYER, FIRST_BAND};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    /// Title screen, waiting for start.
    MenuIdle,
    StartPressed,
    /// A game is running.
    StartGame,
    /// Waits for both buttons to be released before going back to the title.
    ResetPressed,
    LoseGame,
    WinGame,
}

impl MenuState {
    pub fn tick<D>(self, ctx: &mut Context<'_, D>) -> Ticked<Self, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let (next, cleared) = self.transition(ctx);
        let shown = next.show(ctx);
        (next, cleared.and(shown))
    }

    fn transition<D>(self, ctx: &mut Context<'_, D>) -> Ticked<Self, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let buttons = ctx.buttons;
        let game = &mut *ctx.game;
        let mut cleared = Ok(());
        let next = match self {
            MenuState::MenuIdle if buttons.start => MenuState::StartPressed,
            MenuState::MenuIdle => MenuState::MenuIdle,
            MenuState::StartPressed if buttons.start => MenuState::StartPressed,
            MenuState::StartPressed => {
                game.playing = true;
                cleared = draw::clear_screen(ctx.display);
                game.restart_block();
                info!("Game started");
                MenuState::StartGame
            }
            MenuState::StartGame => {
                // Later checks take precedence.
                let mut next = if buttons.start {
                    MenuState::ResetPressed
                } else {
                    MenuState::StartGame
                };
                if game.over {
                    game.playing = false;
                    info!("Game over on level {}", game.level);
                    next = MenuState::LoseGame;
                }
                if game.has_won() {
                    game.playing = false;
                    info!("Stack complete, you win");
                    next = MenuState::WinGame;
                }
                next
            }
            MenuState::ResetPressed if buttons.any_held() => MenuState::ResetPressed,
            MenuState::ResetPressed => {
                cleared = draw::clear_screen(ctx.display);
                game.reset();
                info!("Game reset");
                MenuState::MenuIdle
            }
            MenuState::LoseGame | MenuState::WinGame if buttons.drop => MenuState::ResetPressed,
            state @ (MenuState::LoseGame | MenuState::WinGame) => state,
        };
        (next, cleared)
    }

    fn show<D>(self, ctx: &mut Context<'_, D>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            MenuState::MenuIdle => {
                ctx.game.playing = false;
                draw::title(ctx.display)
            }
            MenuState::StartGame => draw::block(ctx.display, BASE_LAYER, FIRST_BAND),
            MenuState::LoseGame => draw::game_over(ctx.display),
            MenuState::WinGame => draw::celebration(ctx.display),
            MenuState::StartPressed | MenuState::ResetPressed => Ok(()),
        }
    }
}
