//! Slides the active block back and forth across its row band.

use super::{Context, Ticked};
use crate::draw;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

/// Rightmost panel column.
const RIGHT_WALL: u8 = 127;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveState {
    Init,
    /// Steps toward column 0.
    MoveRight,
    /// Steps toward the right wall.
    MoveLeft,
    /// Ticks waited so far before the next `MoveRight` step.
    WaitMoveRight(u8),
    /// Ticks waited so far before the next `MoveLeft` step.
    WaitMoveLeft(u8),
}

impl MoveState {
    pub fn tick<D>(self, ctx: &mut Context<'_, D>) -> Ticked<Self, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let (next, cleared) = self.transition(ctx);
        let stepped = next.step(ctx);
        (next, cleared.and(stepped))
    }

    fn transition<D>(self, ctx: &mut Context<'_, D>) -> Ticked<Self, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let game = &mut *ctx.game;
        let mut cleared = Ok(());
        let next = match self {
            MoveState::Init => {
                game.band = game.band.next();
                game.block.end = RIGHT_WALL + 1;
                if game.playing {
                    MoveState::MoveRight
                } else {
                    MoveState::Init
                }
            }
            MoveState::MoveRight | MoveState::MoveLeft if !game.playing => {
                cleared = draw::clear_screen(ctx.display);
                MoveState::Init
            }
            MoveState::MoveRight => {
                if game.block.start == 0 {
                    MoveState::MoveLeft
                } else {
                    MoveState::WaitMoveRight(0)
                }
            }
            MoveState::MoveLeft => {
                if game.block.end >= RIGHT_WALL {
                    MoveState::MoveRight
                } else {
                    MoveState::WaitMoveLeft(0)
                }
            }
            MoveState::WaitMoveRight(timer) => {
                let timer = timer.saturating_add(1);
                if timer >= game.speed {
                    MoveState::MoveRight
                } else {
                    MoveState::WaitMoveRight(timer)
                }
            }
            MoveState::WaitMoveLeft(timer) => {
                let timer = timer.saturating_add(1);
                if timer >= game.speed {
                    MoveState::MoveLeft
                } else {
                    MoveState::WaitMoveLeft(timer)
                }
            }
        };
        (next, cleared)
    }

    /// Effect of entering or staying in a state: the moving states redraw
    /// the block where it is, wipe the column it just left and then advance
    /// it by one pixel. The block advances even if drawing fails.
    fn step<D>(self, ctx: &mut Context<'_, D>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let game = &mut *ctx.game;
        match self {
            MoveState::Init => {
                game.block.end = RIGHT_WALL;
                Ok(())
            }
            MoveState::MoveRight => {
                let erased = draw::erase_column(ctx.display, game.block.end as i32 + 1, game.band);
                let drawn = draw::block(ctx.display, game.block, game.band);
                game.block.start = game.block.start.saturating_sub(1);
                game.block.end = game.block.end.saturating_sub(1);
                erased.and(drawn)
            }
            MoveState::MoveLeft => {
                let erased = draw::erase_column(ctx.display, game.block.start as i32 - 1, game.band);
                let drawn = draw::block(ctx.display, game.block, game.band);
                game.block.start = game.block.start.saturating_add(1);
                game.block.end = game.block.end.saturating_add(1);
                erased.and(drawn)
            }
            MoveState::WaitMoveRight(_) | MoveState::WaitMoveLeft(_) => Ok(()),
        }
    }
}
