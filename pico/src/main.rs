#![no_std]
#![no_main]

mod hardware;
mod panic;
mod ticker;
mod usb_logger;

use cortex_m_rt::entry;
use embedded_hal::digital::v2::OutputPin;
use log::info;
use stacker::game::GameState;
use stacker::scheduler::Scheduler;

#[link_section = ".boot2"]
#[used]
pub static BOOT_LOADER: [u8; 256] = rp2040_boot2::BOOT_LOADER_W25Q080;

#[entry]
fn main() -> ! {
    let hw = match hardware::Hardware::new() {
        Ok(hw) => hw,
        Err(e) => panic!("Hardware init failed: {}", e),
    };
    info!("Finished initialization");

    let hardware::Hardware {
        mut display,
        lcd_reset_pin: _lcd_reset_pin,
        mut led_pin,
        input,
        mut ticker,
    } = hw;
    let mut game = GameState::new();
    let mut scheduler = Scheduler::new();

    // Infallible on this chip.
    let _ = led_pin.set_high();
    ticker.start();
    scheduler.run(&mut game, &mut display, &mut ticker, || input.sample())
}
