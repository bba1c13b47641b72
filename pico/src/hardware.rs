use crate::ticker::Ticker;
use crate::usb_logger;
use core::fmt;
use display_interface::DisplayError;
use display_interface_spi::SPIInterface;
use embedded_graphics::draw_target::DrawTarget;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::spi::MODE_0;
use fugit::RateExtU32;
use pico::hal;
use pico::hal::pac;
use pico::hal::Clock;
use stacker::display::St7735;
use stacker::draw::BACKGROUND;
use stacker::input::Input;

use hal::gpio::bank0::{Gpio14, Gpio15, Gpio17, Gpio18, Gpio19, Gpio20, Gpio21, Gpio25};
use hal::gpio::{FunctionSioInput, FunctionSioOutput, FunctionSpi, Pin, Pins, PullDown};

type OutputPinOf<I> = Pin<I, FunctionSioOutput, PullDown>;
type InputPinOf<I> = Pin<I, FunctionSioInput, PullDown>;
type SpiPinOf<I> = Pin<I, FunctionSpi, PullDown>;

type LcdSpi = hal::spi::Spi<hal::spi::Enabled, pac::SPI0, (SpiPinOf<Gpio19>, SpiPinOf<Gpio18>), 8>;

pub type Display = St7735<SPIInterface<LcdSpi, OutputPinOf<Gpio20>, OutputPinOf<Gpio17>>>;
pub type ButtonInput = Input<InputPinOf<Gpio14>, InputPinOf<Gpio15>>;

const SPI_BAUD_HZ: u32 = 16_000_000;

#[derive(Debug)]
pub enum Error {
    Peripherals,
    Clocks,
    Logger,
    Alarm,
    Display(DisplayError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Peripherals => write!(f, "peripherals already taken"),
            Error::Clocks => write!(f, "clock setup failed"),
            Error::Logger => write!(f, "logger already installed"),
            Error::Alarm => write!(f, "timer alarm 0 unavailable"),
            Error::Display(e) => write!(f, "display error {:?}", e),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Display(e)
    }
}

pub struct Hardware {
    pub display: Display,
    pub lcd_reset_pin: OutputPinOf<Gpio21>,
    pub led_pin: OutputPinOf<Gpio25>,
    pub input: ButtonInput,
    pub ticker: Ticker,
}

impl Hardware {
    pub fn new() -> Result<Self, Error> {
        let mut pac = pac::Peripherals::take().ok_or(Error::Peripherals)?;
        let core = pac::CorePeripherals::take().ok_or(Error::Peripherals)?;
        let mut watchdog = hal::watchdog::Watchdog::new(pac.WATCHDOG);

        // The default is to generate a 125 MHz system clock
        let clocks = hal::clocks::init_clocks_and_plls(
            pico::XOSC_CRYSTAL_FREQ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .map_err(|_| Error::Clocks)?;

        let mut delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

        let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let ticker = Ticker::new(timer.alarm_0().ok_or(Error::Alarm)?);

        usb_logger::init(
            pac.USBCTRL_REGS,
            pac.USBCTRL_DPRAM,
            &mut pac.RESETS,
            clocks.usb_clock,
        )
        .map_err(|_| Error::Logger)?;

        #[cfg(feature = "wait-for-serial")]
        {
            // Wait for USB to be ready.
            delay.delay_ms(500);
            if usb_logger::connected() {
                // Wait for serial logger.
                delay.delay_ms(1000);
            }
        }

        log::info!("Logging initialized");

        log::info!("System clock: {}", clocks.system_clock.freq());

        let sio = hal::sio::Sio::new(pac.SIO);
        let pins = Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let mut led_pin = pins.gpio25.into_push_pull_output();
        // Infallible on this chip.
        let _ = led_pin.set_low();

        let lcd_sck_pin = pins.gpio18.into_function::<FunctionSpi>();
        let lcd_mosi_pin = pins.gpio19.into_function::<FunctionSpi>();
        let lcd_cs_pin = pins.gpio17.into_push_pull_output();
        let lcd_dc_pin = pins.gpio20.into_push_pull_output();
        let mut lcd_reset_pin = pins.gpio21.into_push_pull_output();

        let spi = hal::spi::Spi::<_, _, _, 8>::new(pac.SPI0, (lcd_mosi_pin, lcd_sck_pin)).init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            SPI_BAUD_HZ.Hz(),
            &MODE_0,
        );
        let mut display = St7735::new(SPIInterface::new(spi, lcd_dc_pin, lcd_cs_pin));
        display.init(&mut lcd_reset_pin, &mut delay)?;
        display.clear(BACKGROUND)?;

        let input = Input::new(
            /*drop_pin=*/ pins.gpio14.into_pull_down_input(),
            /*start_pin=*/ pins.gpio15.into_pull_down_input(),
        );

        Ok(Hardware {
            display,
            lcd_reset_pin,
            led_pin,
            input,
            ticker,
        })
    }
}
