//! Fixed 10x30 raster glyphs used by the menu screens.
//!
//! Glyphs are stored as one-bit masks, one `u16` per row with the leftmost
//! column in bit 9. Set bits are drawn in the glyph's ink colour and clear
//! bits in [`PAPER`]. The panel is mounted upside down, so the masks are
//! stored rotated by 180 degrees.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

pub const GLYPH_WIDTH: u32 = 10;
pub const GLYPH_HEIGHT: u32 = 30;

/// Builds a colour from its on-wire RGB565 value.
pub const fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::new(
        (raw >> 11) as u8,
        ((raw >> 5) & 0x3f) as u8,
        (raw & 0x1f) as u8,
    )
}

pub const PAPER: Rgb565 = rgb565(0xffff);
pub const LETTER_INK: Rgb565 = rgb565(0x0000);
pub const CONFETTI_BLUE: Rgb565 = rgb565(0xb9a4);
pub const CONFETTI_RED: Rgb565 = rgb565(0x83ff);
pub const CONFETTI_GREEN: Rgb565 = rgb565(0x4fa3);
pub const CONFETTI_YELLOW: Rgb565 = rgb565(0x4ff9);

type Mask = [u16; GLYPH_HEIGHT as usize];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    S,
    T,
    A,
    C,
    K,
    E,
    R,
    I,
    N,
    O,
    G,
    M,
    V,
    ConfettiBlue,
    ConfettiRed,
    ConfettiGreen,
    ConfettiYellow,
}

impl Glyph {
    pub fn raster(self) -> Raster {
        let (mask, ink) = match self {
            Glyph::S => (&LETTER_S, LETTER_INK),
            Glyph::T => (&LETTER_T, LETTER_INK),
            Glyph::A => (&LETTER_A, LETTER_INK),
            Glyph::C => (&LETTER_C, LETTER_INK),
            Glyph::K => (&LETTER_K, LETTER_INK),
            Glyph::E => (&LETTER_E, LETTER_INK),
            Glyph::R => (&LETTER_R, LETTER_INK),
            Glyph::I => (&LETTER_I, LETTER_INK),
            Glyph::N => (&LETTER_N, LETTER_INK),
            Glyph::O => (&LETTER_O, LETTER_INK),
            Glyph::G => (&LETTER_G, LETTER_INK),
            Glyph::M => (&LETTER_M, LETTER_INK),
            Glyph::V => (&LETTER_V, LETTER_INK),
            Glyph::ConfettiBlue => (&CONFETTI, CONFETTI_BLUE),
            Glyph::ConfettiRed => (&CONFETTI, CONFETTI_RED),
            Glyph::ConfettiGreen => (&CONFETTI, CONFETTI_GREEN),
            Glyph::ConfettiYellow => (&CONFETTI, CONFETTI_YELLOW),
        };
        Raster { mask, ink }
    }
}

/// A glyph mask paired with its ink colour, drawable as an image.
#[derive(Clone, Copy, Debug)]
pub struct Raster {
    mask: &'static Mask,
    ink: Rgb565,
}

impl Raster {
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        self.mask[y as usize] >> (GLYPH_WIDTH - 1 - x) & 1 == 1
    }

    pub fn color_at(&self, p: Point) -> Rgb565 {
        if p.x >= 0 && p.y >= 0 && self.is_ink(p.x as u32, p.y as u32) {
            self.ink
        } else {
            PAPER
        }
    }
}

impl ImageDrawable for Raster {
    type Color = Rgb565;

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = self.bounding_box();
        target.fill_contiguous(&area, area.points().map(|p| self.color_at(p)))
    }

    fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = area.intersection(&self.bounding_box());
        target.fill_contiguous(
            &Rectangle::new(Point::zero(), area.size),
            area.points().map(|p| self.color_at(p)),
        )
    }
}

impl OriginDimensions for Raster {
    fn size(&self) -> Size {
        Size::new(GLYPH_WIDTH, GLYPH_HEIGHT)
    }
}

#[rustfmt::skip]
const LETTER_S: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0001111110,
    0b0001111110,
    0b0110000000,
    0b0110000000,
    0b0001111000,
    0b0001111000,
    0b0000000110,
    0b0000000110,
    0b0111111000,
    0b0111111000,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_T: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0111111110,
    0b0111111110,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_A: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0011000110,
    0b0011000110,
    0b0011000110,
    0b0011000110,
    0b0011111110,
    0b0011111110,
    0b0011000110,
    0b0011000110,
    0b0001111000,
    0b0001111000,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_C: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0001111000,
    0b0001111000,
    0b0110000110,
    0b0110000110,
    0b0000000110,
    0b0000000110,
    0b0110000110,
    0b0110000110,
    0b0001111000,
    0b0001111000,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_K: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0110000110,
    0b0110000110,
    0b0001100110,
    0b0001100110,
    0b0000011110,
    0b0000011110,
    0b0001100110,
    0b0001100110,
    0b0110000110,
    0b0110000110,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_E: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0111111110,
    0b0111111110,
    0b0000000110,
    0b0000000110,
    0b0001111110,
    0b0001111110,
    0b0000000110,
    0b0000000110,
    0b0111111110,
    0b0111111110,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_R: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0110000110,
    0b0110000110,
    0b0001100110,
    0b0001100110,
    0b0001111110,
    0b0001111110,
    0b0110000110,
    0b0110000110,
    0b0001111110,
    0b0001111110,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_I: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0111111110,
    0b0111111110,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0000110000,
    0b0111111110,
    0b0111111110,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_N: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0110000110,
    0b0110000110,
    0b0110000110,
    0b0110000110,
    0b0111100110,
    0b0111100110,
    0b0110011110,
    0b0110011110,
    0b0110000110,
    0b0110000110,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_O: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0001111000,
    0b0001111000,
    0b0110000110,
    0b0110000110,
    0b0110000110,
    0b0110000110,
    0b0110000110,
    0b0110000110,
    0b0001111000,
    0b0001111000,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_G: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0001111000,
    0b0001111000,
    0b0110000110,
    0b0110000110,
    0b0111100110,
    0b0111100110,
    0b0000000110,
    0b0000000110,
    0b0001111000,
    0b0001111000,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_M: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b1100000011,
    0b1100000011,
    0b1100000011,
    0b1100000011,
    0b1100110011,
    0b1100110011,
    0b1111001111,
    0b1111001111,
    0b1100000011,
    0b1100000011,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const LETTER_V: Mask = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0b0000110000,
    0b0000110000,
    0b0011001100,
    0b0011001100,
    0b0011001100,
    0b1100000011,
    0b1100000011,
    0b1100000011,
    0b1100000011,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[rustfmt::skip]
const CONFETTI: Mask = [
    0, 0, 0, 0, 0, 0,
    0b0000001110,
    0b0000001110,
    0b0000001110,
    0, 0, 0,
    0b0111000000,
    0b0111000000,
    0b0111000000,
    0, 0,
    0b0000001110,
    0b0000001110,
    0b0000001110,
    0, 0, 0, 0,
    0b0111000000,
    0b0111000000,
    0b0111000000,
    0, 0, 0,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Framebuffer;
    use embedded_graphics::image::Image;

    #[test]
    fn test_mask_bit_order() {
        let t = Glyph::T.raster();
        // Bottom bar of the upside-down T spans columns 1..=8.
        assert!(!t.is_ink(0, 18));
        assert!(t.is_ink(1, 18));
        assert!(t.is_ink(8, 19));
        assert!(!t.is_ink(9, 19));
        // Stem.
        assert!(t.is_ink(4, 10));
        assert!(t.is_ink(5, 10));
        assert!(!t.is_ink(3, 10));
    }

    #[test]
    fn test_out_of_range_is_paper() {
        let m = Glyph::M.raster();
        assert!(!m.is_ink(10, 10));
        assert!(!m.is_ink(0, 30));
        assert_eq!(m.color_at(Point::new(-1, 10)), PAPER);
    }

    #[test]
    fn test_confetti_shares_mask() {
        let blue = Glyph::ConfettiBlue.raster();
        let yellow = Glyph::ConfettiYellow.raster();
        for y in 0..GLYPH_HEIGHT {
            for x in 0..GLYPH_WIDTH {
                assert_eq!(blue.is_ink(x, y), yellow.is_ink(x, y));
            }
        }
        assert_eq!(blue.color_at(Point::new(6, 6)), CONFETTI_BLUE);
        assert_eq!(yellow.color_at(Point::new(6, 6)), CONFETTI_YELLOW);
    }

    #[test]
    fn test_draw_fills_whole_tile() {
        let mut fb = Framebuffer::new();
        let raster = Glyph::O.raster();
        Image::new(&raster, Point::new(20, 96)).draw(&mut fb).unwrap();

        // Paper is painted too, not just ink.
        assert_eq!(fb.pixel(20, 96), Some(PAPER));
        assert_eq!(fb.pixel(29, 125), Some(PAPER));
        assert_eq!(fb.pixel(23, 106), Some(LETTER_INK));
        // Outside the tile is untouched.
        assert_eq!(fb.pixel(30, 96), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_rgb565_roundtrip() {
        use embedded_graphics::pixelcolor::raw::RawU16;
        for raw in [0x0000, 0xffff, 0x83ff, 0xb4ff, 0xb9a4, 0x4fa3] {
            assert_eq!(RawU16::from(rgb565(raw)).into_inner(), raw);
        }
    }
}
