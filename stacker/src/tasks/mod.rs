//! The three cooperative state machines driven by the scheduler.
//!
//! Each task is a small state enum whose `tick` consumes the current state,
//! reads and updates the shared [`GameState`], may draw, and returns the
//! next state. Ticks never block, so the scheduler runs at most one of them
//! at a time and the shared record needs no locking.
//!
//! A tick always yields its next state. Drawing failures are reported next
//! to it and never undo a transition that already touched the game record.

pub mod menu;
pub mod motion;
pub mod placement;

use crate::game::GameState;
use crate::input::Buttons;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;

pub use menu::MenuState;
pub use motion::MoveState;
pub use placement::InputState;

/// Everything a task tick may touch during one scheduler pass.
pub struct Context<'a, D> {
    pub game: &'a mut GameState,
    pub display: &'a mut D,
    pub buttons: Buttons,
}

impl<'a, D> Context<'a, D> {
    pub fn new(game: &'a mut GameState, display: &'a mut D, buttons: Buttons) -> Self {
        Context {
            game,
            display,
            buttons,
        }
    }
}

/// Next state of a tick and the first drawing error hit on the way there.
pub type Ticked<S, E> = (S, Result<(), E>);

fn wrap<S, E>((next, drawn): Ticked<S, E>, variant: fn(S) -> TaskState) -> Ticked<TaskState, E> {
    (variant(next), drawn)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Menu(MenuState),
    Move(MoveState),
    Input(InputState),
}

impl TaskState {
    pub fn tick<D>(self, ctx: &mut Context<'_, D>) -> Ticked<Self, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self {
            TaskState::Menu(state) => wrap(state.tick(ctx), TaskState::Menu),
            TaskState::Move(state) => wrap(state.tick(ctx), TaskState::Move),
            TaskState::Input(state) => wrap(state.tick(ctx), TaskState::Input),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskState::Menu(_) => "menu",
            TaskState::Move(_) => "move",
            TaskState::Input(_) => "input",
        }
    }
}
