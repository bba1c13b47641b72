//! Rendering of layers and menu screens.

use crate::alignment::Span;
use crate::game::Band;
use crate::glyph::{rgb565, Glyph, PAPER};
use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

pub const BACKGROUND: Rgb565 = PAPER;
pub const BLOCK_BORDER: Rgb565 = rgb565(0x83ff);
pub const BLOCK_FILL: Rgb565 = rgb565(0xb4ff);

/// Blocks are tiled from 12x12 cells with a two pixel border.
const CELL: i32 = 12;
const BORDER: i32 = 2;

fn rect(xs: i32, xe: i32, band: Band) -> Rectangle {
    Rectangle::with_corners(
        Point::new(xs, band.start as i32),
        Point::new(xe, band.end as i32),
    )
}

fn block_color(p: Point) -> Rgb565 {
    let on_border = |v: i32| {
        let v = v.rem_euclid(CELL);
        v < BORDER || v >= CELL - BORDER
    };
    if on_border(p.x) || on_border(p.y) {
        BLOCK_BORDER
    } else {
        BLOCK_FILL
    }
}

/// Draws a block spanning `span` in `band`. The cell pattern is anchored at
/// the block's top-left corner.
pub fn block<D>(display: &mut D, span: Span, band: Band) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let area = rect(span.start as i32, span.end as i32, band);
    let origin = area.top_left;
    display.fill_contiguous(&area, area.points().map(|p| block_color(p - origin)))
}

/// Paints the single pixel column `x` of `band` with the background.
pub fn erase_column<D>(display: &mut D, x: i32, band: Band) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    display.fill_solid(&rect(x, x, band), BACKGROUND)
}

/// Replaces a whole row band with a freshly placed layer.
pub fn layer<D>(display: &mut D, span: Span, band: Band) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    display.fill_solid(&rect(0, 127, band), BACKGROUND)?;
    block(display, span, band)
}

pub fn clear_screen<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BACKGROUND)
}

/// A glyph placed with its top-left corner at `(x, y)`.
#[derive(Clone, Copy, Debug)]
pub struct Tile {
    pub glyph: Glyph,
    pub x: i32,
    pub y: i32,
}

const fn tile(glyph: Glyph, x: i32, y: i32) -> Tile {
    Tile { glyph, x, y }
}

/// "STACKERINO", laid out right to left for the inverted panel.
pub static TITLE_SCREEN: [Tile; 10] = [
    tile(Glyph::S, 109, 96),
    tile(Glyph::T, 100, 96),
    tile(Glyph::A, 90, 96),
    tile(Glyph::C, 80, 96),
    tile(Glyph::K, 70, 96),
    tile(Glyph::E, 60, 96),
    tile(Glyph::R, 50, 96),
    tile(Glyph::I, 40, 96),
    tile(Glyph::N, 30, 96),
    tile(Glyph::O, 20, 96),
];

pub static LOSE_SCREEN: [Tile; 8] = [
    tile(Glyph::G, 79, 86),
    tile(Glyph::A, 69, 86),
    tile(Glyph::M, 59, 86),
    tile(Glyph::E, 49, 86),
    tile(Glyph::O, 79, 61),
    tile(Glyph::V, 69, 61),
    tile(Glyph::E, 59, 61),
    tile(Glyph::R, 49, 61),
];

const CONFETTI_COLUMNS: [i32; 8] = [109, 100, 90, 80, 70, 60, 50, 40];
const CONFETTI_ROWS: [i32; 3] = [96, 76, 56];
const CONFETTI_CYCLE: [Glyph; 4] = [
    Glyph::ConfettiBlue,
    Glyph::ConfettiRed,
    Glyph::ConfettiGreen,
    Glyph::ConfettiYellow,
];

/// Tiles of the win screen, row by row, cycling through the confetti
/// colours.
pub fn win_screen() -> impl Iterator<Item = Tile> {
    CONFETTI_ROWS.iter().flat_map(|&y| {
        CONFETTI_COLUMNS
            .iter()
            .enumerate()
            .map(move |(i, &x)| tile(CONFETTI_CYCLE[i % CONFETTI_CYCLE.len()], x, y))
    })
}

pub fn tile_at<D>(display: &mut D, t: &Tile) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let raster = t.glyph.raster();
    Image::new(&raster, Point::new(t.x, t.y)).draw(display)
}

pub fn tiles<D>(display: &mut D, tiles: &[Tile]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    tiles.iter().try_for_each(|t| tile_at(display, t))
}

pub fn title<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    tiles(display, &TITLE_SCREEN)
}

pub fn game_over<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    tiles(display, &LOSE_SCREEN)
}

pub fn celebration<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    win_screen().try_for_each(|t| tile_at(display, &t))
}
