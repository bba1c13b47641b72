use crate::ticker::Ticker;
use core::panic::PanicInfo;
use pico::hal::pac;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    Ticker::stop();
    log::error!("{}", info);
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::USBCTRL_IRQ);
    }
    loop {
        cortex_m::asm::nop();
    }
}
