// src/chart/mod.rs

pub mod export;
pub mod render;

pub use export::{write_pdf, write_png};
pub use render::{ChartStyle, render};

/// A rendered chart as packed 8-bit RGB rows, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl ChartImage {
    pub fn blank(width: u32, height: u32) -> Self {
        Self { width, height, rgb: vec![255; width as usize * height as usize * 3] }
    }
}
