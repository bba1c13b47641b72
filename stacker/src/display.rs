use core::convert::TryInto;
use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::{PointsIter, Rectangle},
};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use log::info;

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 128;

/// Controller instructions issued by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Instruction {
    SwReset = 0x01,
    SleepOut = 0x11,
    DisplayOn = 0x29,
    ColumnAddress = 0x2a,
    RowAddress = 0x2b,
    MemoryWrite = 0x2c,
    PixelFormat = 0x3a,
}

const PIXEL_FORMAT_16BIT: u8 = 0x05;

/// ST7735-class panel controller speaking the command/data protocol over a
/// display interface.
///
/// Every drawing request is turned into an addressing window followed by a
/// row-major stream of big-endian RGB565 pixels. Geometry outside the panel
/// is clipped before anything is sent.
pub struct St7735<DI> {
    di: DI,
}

impl<DI> St7735<DI>
where
    DI: WriteOnlyDataCommand,
{
    pub fn new(di: DI) -> Self {
        St7735 { di }
    }

    pub fn release(self) -> DI {
        self.di
    }

    /// Runs the bring-up sequence: hardware reset pulse, software reset,
    /// sleep out, 16-bit pixel format and display on.
    pub fn init<RST, DELAY>(&mut self, reset_pin: &mut RST, delay: &mut DELAY) -> Result<(), DisplayError>
    where
        RST: OutputPin,
        DELAY: DelayMs<u32>,
    {
        info!("Initializing display");
        self.hard_reset(reset_pin, delay)?;
        self.command(Instruction::SwReset, &[])?;
        delay.delay_ms(150);
        self.command(Instruction::SleepOut, &[])?;
        delay.delay_ms(200);
        self.command(Instruction::PixelFormat, &[PIXEL_FORMAT_16BIT])?;
        delay.delay_ms(10);
        self.command(Instruction::DisplayOn, &[])?;
        delay.delay_ms(200);
        Ok(())
    }

    pub fn hard_reset<RST, DELAY>(&mut self, reset_pin: &mut RST, delay: &mut DELAY) -> Result<(), DisplayError>
    where
        RST: OutputPin,
        DELAY: DelayMs<u32>,
    {
        reset_pin.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(200);
        reset_pin.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(200);
        Ok(())
    }

    /// Sends one command frame, followed by a data frame if `params` is not
    /// empty.
    pub fn command(&mut self, instruction: Instruction, params: &[u8]) -> Result<(), DisplayError> {
        self.di.send_commands(DataFormat::U8(&[instruction as u8]))?;
        if !params.is_empty() {
            self.di.send_data(DataFormat::U8(params))?;
        }
        Ok(())
    }

    /// Selects the inclusive rectangle `(sx, sy)..=(ex, ey)` and opens it
    /// for pixel writes.
    pub fn set_address_window(&mut self, sx: u16, sy: u16, ex: u16, ey: u16) -> Result<(), DisplayError> {
        let [sx_hi, sx_lo] = sx.to_be_bytes();
        let [ex_hi, ex_lo] = ex.to_be_bytes();
        self.command(Instruction::ColumnAddress, &[sx_hi, sx_lo, ex_hi, ex_lo])?;
        let [sy_hi, sy_lo] = sy.to_be_bytes();
        let [ey_hi, ey_lo] = ey.to_be_bytes();
        self.command(Instruction::RowAddress, &[sy_hi, sy_lo, ey_hi, ey_lo])?;
        self.command(Instruction::MemoryWrite, &[])
    }

    /// Streams raw RGB565 values into the current window. The controller
    /// infers the end of the stream from the window size.
    pub fn write_pixels<T>(&mut self, colors: T) -> Result<(), DisplayError>
    where
        T: IntoIterator<Item = u16>,
    {
        let mut colors = colors.into_iter();
        self.di.send_data(DataFormat::U16BEIter(&mut colors))
    }

    pub fn set_pixels<T>(&mut self, sx: u16, sy: u16, ex: u16, ey: u16, colors: T) -> Result<(), DisplayError>
    where
        T: IntoIterator<Item = u16>,
    {
        self.set_address_window(sx, sy, ex, ey)?;
        self.write_pixels(colors)
    }

    fn open_window(&mut self, area: &Rectangle) -> Result<bool, DisplayError> {
        match area.bottom_right() {
            Some(bottom_right) => {
                self.set_address_window(
                    area.top_left.x as u16,
                    area.top_left.y as u16,
                    bottom_right.x as u16,
                    bottom_right.y as u16,
                )?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<DI> DrawTarget for St7735<DI>
where
    DI: WriteOnlyDataCommand,
{
    type Color = Rgb565;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        const M: u32 = WIDTH as u32 - 1;
        const N: u32 = HEIGHT as u32 - 1;
        for Pixel(coord, color) in pixels.into_iter() {
            if let Ok((x @ 0..=M, y @ 0..=N)) = coord.try_into() {
                let (x, y) = (x as u16, y as u16);
                self.set_pixels(x, y, x, y, core::iter::once(RawU16::from(color).into_inner()))?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let clipped_area = area.intersection(&self.bounding_box());
        if !self.open_window(&clipped_area)? {
            return Ok(());
        }
        let mut pixels = area
            .points()
            .zip(colors)
            .filter(|(p, _)| clipped_area.contains(*p))
            .map(|(_, color)| RawU16::from(color).into_inner());
        self.di.send_data(DataFormat::U16BEIter(&mut pixels))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped_area = area.intersection(&self.bounding_box());
        if !self.open_window(&clipped_area)? {
            return Ok(());
        }
        let count = (clipped_area.size.width * clipped_area.size.height) as usize;
        self.write_pixels(core::iter::repeat(RawU16::from(color).into_inner()).take(count))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&self.bounding_box(), color)
    }
}

impl<DI> OriginDimensions for St7735<DI> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

/// In-memory panel image, used to simulate the display on the host.
pub struct Framebuffer {
    pixels: [u16; WIDTH * HEIGHT],
}

#[allow(clippy::new_without_default)]
impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [0; WIDTH * HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        if x < WIDTH && y < HEIGHT {
            Some(RawU16::new(self.pixels[x + y * WIDTH]).into())
        } else {
            None
        }
    }

    pub fn raw(&self) -> &[u16; WIDTH * HEIGHT] {
        &self.pixels
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        const M: u32 = WIDTH as u32 - 1;
        const N: u32 = HEIGHT as u32 - 1;
        for Pixel(coord, color) in pixels.into_iter() {
            if let Ok((x @ 0..=M, y @ 0..=N)) = coord.try_into() {
                let index: u32 = x + y * WIDTH as u32;
                self.pixels[index as usize] = RawU16::from(color).into_inner();
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let clipped = area.intersection(&self.bounding_box());
        let visible = area.points().zip(colors).filter(|(p, _)| clipped.contains(*p));
        for (p, color) in visible {
            self.pixels[p.x as usize + p.y as usize * WIDTH] = RawU16::from(color).into_inner();
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_contiguous(area, core::iter::repeat(color))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels = [RawU16::from(color).into_inner(); WIDTH * HEIGHT];
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}
