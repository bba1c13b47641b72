// Based on https://github.com/rp-rs/rp-hal/blob/c8bb2e43c792dd3975a255d7eba479547411aec6/boards/pico/examples/pico_usb_serial_interrupt.rs
use crate::ticker;
use core::cell::RefCell;
use core::fmt;
use core::fmt::Write;
use critical_section::Mutex;
use log::LevelFilter;
use log::{Level, Metadata, Record};
use pico::hal;
use pico::hal::pac;
use pico::hal::pac::interrupt;
use static_cell::StaticCell;
use usb_device::{class_prelude::*, prelude::*};
use usbd_serial::SerialPort;

/// The USB Bus Driver, borrowed by the device and the serial class.
static USB_BUS: StaticCell<UsbBusAllocator<hal::usb::UsbBus>> = StaticCell::new();

/// The USB device and serial class (shared with the interrupt).
static USB: Mutex<RefCell<Option<Usb>>> = Mutex::new(RefCell::new(None));

static LOGGER: UsbSerialLogger = UsbSerialLogger;

struct Usb {
    device: UsbDevice<'static, hal::usb::UsbBus>,
    serial: SerialPort<'static, hal::usb::UsbBus>,
}

pub fn init(
    regs: pac::USBCTRL_REGS,
    dpram: pac::USBCTRL_DPRAM,
    resets: &mut pac::RESETS,
    clock: hal::clocks::UsbClock,
) -> Result<(), log::SetLoggerError> {
    let usb_bus: &'static _ =
        USB_BUS.init(UsbBusAllocator::new(hal::usb::UsbBus::new(regs, dpram, clock, true, resets)));

    let serial = SerialPort::new(usb_bus);

    // Create a USB device with a fake VID and PID
    let device = UsbDeviceBuilder::new(usb_bus, UsbVidPid(0x16c0, 0x27dd))
        .manufacturer("Fake company")
        .product("Stacker")
        .serial_number("TEST")
        .device_class(2) // from: https://www.usb.org/defined-class-codes
        .build();

    critical_section::with(|cs| USB.borrow(cs).replace(Some(Usb { device, serial })));

    unsafe {
        log::set_logger_racy(&LOGGER).map(|()| log::set_max_level(LevelFilter::Info))?;
    }

    // Enable the USB interrupt
    unsafe {
        pac::NVIC::unmask(hal::pac::Interrupt::USBCTRL_IRQ);
    };
    Ok(())
}

/// Whether a host has configured the serial device.
#[cfg(feature = "wait-for-serial")]
pub fn connected() -> bool {
    critical_section::with(|cs| {
        USB.borrow(cs)
            .borrow()
            .as_ref()
            .map_or(false, |usb| usb.device.state() == UsbDeviceState::Configured)
    })
}

#[allow(non_snake_case)]
#[interrupt]
fn USBCTRL_IRQ() {
    let flash_requested = critical_section::with(|cs| {
        let mut usb = USB.borrow(cs).borrow_mut();
        let Some(Usb { device, serial }) = usb.as_mut() else {
            return false;
        };
        if !device.poll(&mut [serial]) {
            return false;
        }
        let mut buf = [0u8; 64];
        match serial.read(&mut buf) {
            Ok(count) => buf.iter().take(count).any(|&b| b == 0),
            Err(_) => false,
        }
    });

    if flash_requested {
        log::info!("Entering flash mode");
        hal::rom_data::reset_to_usb_boot(0, 0);
    }
}

struct UsbSerialLogger;

impl log::Log for UsbSerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            critical_section::with(|cs| {
                if let Some(usb) = USB.borrow(cs).borrow_mut().as_mut() {
                    let mut writer = UsbSerialWriter(&mut usb.serial);
                    let _ = write!(
                        &mut writer,
                        "{} {} - {}\r\n",
                        ticker::uptime_ms(),
                        record.level(),
                        record.args()
                    );
                }
            });
        }
    }

    fn flush(&self) {}
}

struct UsbSerialWriter<'a>(&'a mut SerialPort<'static, hal::usb::UsbBus>);

impl fmt::Write for UsbSerialWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Dropped when the host is not draining the port.
        let _ = self.0.write(s.as_bytes());
        Ok(())
    }
}
