//! Fixed-period cooperative scheduler.
//!
//! Every pass visits the tasks in order and ticks those whose period has
//! elapsed, then advances all of them by one tick period and blocks on the
//! ticker.

use crate::game::GameState;
use crate::input::Buttons;
use crate::tasks::{Context, InputState, MenuState, MoveState, TaskState};
use core::fmt::Debug;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::Rgb565;
use log::{trace, warn};

pub const TICK_PERIOD_MS: u32 = 1;
pub const MENU_PERIOD_MS: u32 = 100;
pub const MOVE_PERIOD_MS: u32 = 1;
pub const INPUT_PERIOD_MS: u32 = 10;

/// Source of the scheduler's periodic tick.
pub trait Ticker {
    /// Blocks until the next tick fires.
    fn wait_for_tick(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Task {
    pub state: TaskState,
    pub period: u32,
    pub elapsed: u32,
}

impl Task {
    /// A task that is due on the first pass.
    pub const fn new(state: TaskState, period: u32) -> Self {
        Task {
            state,
            period,
            elapsed: period,
        }
    }
}

pub struct Scheduler {
    tasks: [Task; 3],
    tick_period: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub const fn new() -> Self {
        Scheduler {
            tasks: [
                Task::new(TaskState::Menu(MenuState::MenuIdle), MENU_PERIOD_MS),
                Task::new(TaskState::Move(MoveState::Init), MOVE_PERIOD_MS),
                Task::new(TaskState::Input(InputState::WaitPress), INPUT_PERIOD_MS),
            ],
            tick_period: TICK_PERIOD_MS,
        }
    }

    pub fn tasks(&self) -> &[Task; 3] {
        &self.tasks
    }

    /// Runs one pass. Every due task moves to its next state even when its
    /// drawing fails; the pass completes and the first failure is returned.
    pub fn tick<D>(&mut self, game: &mut GameState, display: &mut D, buttons: Buttons) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut ctx = Context::new(game, display, buttons);
        let mut result = Ok(());
        for task in self.tasks.iter_mut() {
            if task.elapsed >= task.period {
                let (next, drawn) = task.state.tick(&mut ctx);
                if next != task.state {
                    trace!("{}: {:?} -> {:?}", task.state.name(), task.state, next);
                }
                task.state = next;
                result = result.and(drawn);
                task.elapsed = 0;
            }
        }
        for task in self.tasks.iter_mut() {
            task.elapsed += self.tick_period;
        }
        result
    }

    /// Drives the game forever, sampling the buttons once per pass.
    pub fn run<D, T, F>(&mut self, game: &mut GameState, display: &mut D, ticker: &mut T, mut sample: F) -> !
    where
        D: DrawTarget<Color = Rgb565>,
        D::Error: Debug,
        T: Ticker,
        F: FnMut() -> Buttons,
    {
        loop {
            if let Err(e) = self.tick(game, display, sample()) {
                warn!("Display error: {:?}", e);
            }
            ticker.wait_for_tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Framebuffer;
    use embedded_graphics::prelude::*;

    const NONE: Buttons = Buttons { drop: false, start: false };
    const START: Buttons = Buttons { drop: false, start: true };

    struct BrokenDisplay;

    impl OriginDimensions for BrokenDisplay {
        fn size(&self) -> Size {
            Size::new(128, 128)
        }
    }

    impl DrawTarget for BrokenDisplay {
        type Color = Rgb565;
        type Error = ();

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Err(())
        }
    }

    fn menu(scheduler: &Scheduler) -> MenuState {
        match scheduler.tasks()[0].state {
            TaskState::Menu(state) => state,
            other => panic!("menu slot holds {:?}", other),
        }
    }

    #[test]
    fn test_initial_tasks() {
        let scheduler = Scheduler::new();
        let tasks = scheduler.tasks();
        assert_eq!(tasks[0], Task::new(TaskState::Menu(MenuState::MenuIdle), 100));
        assert_eq!(tasks[1], Task::new(TaskState::Move(MoveState::Init), 1));
        assert_eq!(tasks[2], Task::new(TaskState::Input(InputState::WaitPress), 10));
        assert!(tasks.iter().all(|t| t.elapsed == t.period));
    }

    #[test]
    fn test_all_tasks_due_on_first_pass() {
        let mut scheduler = Scheduler::new();
        let mut game = GameState::new();
        let mut fb = Framebuffer::new();
        scheduler.tick(&mut game, &mut fb, START).unwrap();
        assert_eq!(menu(&scheduler), MenuState::StartPressed);
        assert!(scheduler.tasks().iter().all(|t| t.elapsed == 1));
    }

    #[test]
    fn test_menu_period() {
        let mut scheduler = Scheduler::new();
        let mut game = GameState::new();
        let mut fb = Framebuffer::new();
        scheduler.tick(&mut game, &mut fb, START).unwrap();

        // Start released right away, but the menu only looks every 100 ticks.
        for _ in 1..100 {
            scheduler.tick(&mut game, &mut fb, NONE).unwrap();
            assert_eq!(menu(&scheduler), MenuState::StartPressed);
        }
        scheduler.tick(&mut game, &mut fb, NONE).unwrap();
        assert_eq!(menu(&scheduler), MenuState::StartGame);
        assert!(game.playing);
    }

    #[test]
    fn test_elapsed_wraps_at_period() {
        let mut scheduler = Scheduler::new();
        let mut game = GameState::new();
        let mut fb = Framebuffer::new();
        for pass in 1..=25u32 {
            scheduler.tick(&mut game, &mut fb, NONE).unwrap();
            let tasks = scheduler.tasks();
            assert_eq!(tasks[0].elapsed, pass);
            assert_eq!(tasks[1].elapsed, 1);
            assert_eq!(tasks[2].elapsed, (pass - 1) % 10 + 1);
        }
    }

    #[test]
    fn test_failed_draw_completes_pass() {
        let mut scheduler = Scheduler::new();
        let mut game = GameState::new();
        let mut display = BrokenDisplay;

        // The title screen cannot be drawn.
        assert_eq!(scheduler.tick(&mut game, &mut display, NONE), Err(()));
        assert_eq!(menu(&scheduler), MenuState::MenuIdle);
        assert!(scheduler.tasks().iter().all(|t| t.elapsed == 1));

        // A pass that draws nothing succeeds.
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.tick(&mut game, &mut display, START), Ok(()));
        assert_eq!(menu(&scheduler), MenuState::StartPressed);
    }

    #[test]
    fn test_failed_draw_still_commits_transitions() {
        let mut scheduler = Scheduler::new();
        let mut game = GameState::new();
        let mut display = BrokenDisplay;
        assert_eq!(scheduler.tick(&mut game, &mut display, START), Ok(()));
        for _ in 1..100 {
            assert_eq!(scheduler.tick(&mut game, &mut display, NONE), Ok(()));
        }

        // Start released: the game starts although nothing can be drawn.
        assert_eq!(scheduler.tick(&mut game, &mut display, NONE), Err(()));
        assert_eq!(menu(&scheduler), MenuState::StartGame);
        assert_eq!(scheduler.tasks()[1].state, TaskState::Move(MoveState::MoveRight));
        assert!(game.playing);
        let band = game.band;

        assert_eq!(scheduler.tick(&mut game, &mut display, NONE), Ok(()));
        assert_eq!(scheduler.tasks()[1].state, TaskState::Move(MoveState::WaitMoveRight(0)));
        assert_eq!(game.band, band);
    }
}
