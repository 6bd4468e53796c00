//! Card rendering: layout, paint and raster stages.
//!
//! `layout` positions card elements in device-independent pixels, `paint`
//! turns the layout into a flat display list, and `raster` executes that
//! list at a supersampling scale and encodes the result as PNG.

pub mod layout;
pub mod paint;
pub mod raster;

#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    pub fn empty(width: u32, height: u32) -> Self {
        Self { width, height, png_data: Vec::new() }
    }
}
