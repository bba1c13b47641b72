//! 1 ms system tick from timer alarm 0.
//!
//! The alarm interrupt re-arms itself, raises the tick flag and advances the
//! uptime counter. The game loop consumes the flag in `wait_for_tick`.

use core::cell::{Cell, RefCell};
use critical_section::Mutex;
use fugit::MicrosDurationU32;
use pico::hal::pac;
use pico::hal::pac::interrupt;
use pico::hal::timer::{Alarm, Alarm0};
use stacker::scheduler::{self, TICK_PERIOD_MS};

const TICK: MicrosDurationU32 = MicrosDurationU32::millis(TICK_PERIOD_MS);

static ALARM: Mutex<RefCell<Option<Alarm0>>> = Mutex::new(RefCell::new(None));
static TICKED: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));
static UPTIME_MS: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

pub struct Ticker;

impl Ticker {
    pub fn new(mut alarm: Alarm0) -> Self {
        alarm.enable_interrupt();
        critical_section::with(|cs| ALARM.borrow(cs).replace(Some(alarm)));
        Ticker
    }

    pub fn start(&mut self) {
        critical_section::with(|cs| {
            TICKED.borrow(cs).set(false);
            if let Some(alarm) = ALARM.borrow(cs).borrow_mut().as_mut() {
                if alarm.schedule(TICK).is_err() {
                    log::warn!("Failed to arm tick alarm");
                }
            }
        });
        unsafe {
            pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
        }
    }

    /// Masks the tick interrupt. Takes no receiver so the panic handler can
    /// call it without the instance owned by the game loop.
    pub fn stop() {
        pac::NVIC::mask(pac::Interrupt::TIMER_IRQ_0);
    }
}

impl scheduler::Ticker for Ticker {
    fn wait_for_tick(&mut self) {
        while !critical_section::with(|cs| TICKED.borrow(cs).replace(false)) {
            core::hint::spin_loop();
        }
    }
}

/// Milliseconds since the ticker was first started.
pub fn uptime_ms() -> u32 {
    critical_section::with(|cs| UPTIME_MS.borrow(cs).get())
}

#[allow(non_snake_case)]
#[interrupt]
fn TIMER_IRQ_0() {
    critical_section::with(|cs| {
        if let Some(alarm) = ALARM.borrow(cs).borrow_mut().as_mut() {
            alarm.clear_interrupt();
            // Cannot fail: 1 ms is well inside the alarm's range.
            let _ = alarm.schedule(TICK);
        }
        TICKED.borrow(cs).set(true);
        let uptime = UPTIME_MS.borrow(cs);
        uptime.set(uptime.get().wrapping_add(TICK_PERIOD_MS));
    });
}
