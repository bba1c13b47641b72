#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod alignment;
pub mod display;
pub mod draw;
pub mod game;
pub mod glyph;
pub mod input;
pub mod scheduler;
pub mod tasks;
