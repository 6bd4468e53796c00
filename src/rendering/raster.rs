/// Software rasterizer: paint commands -> RGBA pixmap -> PNG

use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{ImageFormat, RgbaImage};
use log::debug;

use crate::rendering::paint::{PaintCommand, Rgba, WHITE};
use crate::rendering::Screenshot;
use crate::{Error, Result};

/// An opaque RGBA8 canvas in device pixels.
#[derive(Debug, Clone)]
pub struct Pixmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Largest canvas the rasterizer will allocate, in device pixels.
pub const MAX_PIXELS: usize = 1 << 26;

impl Pixmap {
    /// A canvas filled with `background`. Fails when the pixel count is
    /// larger than `MAX_PIXELS`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n <= MAX_PIXELS)
            .ok_or_else(|| {
                Error::ExportError(format!("canvas {}x{} is too large", width, height))
            })?;
        let mut data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&[background.0, background.1, background.2, 255]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some((self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]))
    }

    /// Source-over blend of one pixel; out-of-bounds writes are clipped.
    fn blend(&mut self, x: i64, y: i64, rgba: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let a = rgba.3 as u32;
        if a == 255 {
            self.data[i] = rgba.0;
            self.data[i + 1] = rgba.1;
            self.data[i + 2] = rgba.2;
        } else {
            let mix =
                |src: u8, dst: u8| ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8;
            self.data[i] = mix(rgba.0, self.data[i]);
            self.data[i + 1] = mix(rgba.1, self.data[i + 1]);
            self.data[i + 2] = mix(rgba.2, self.data[i + 2]);
        }
        self.data[i + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, rgba: Rgba) {
        for py in y..y + height as i64 {
            for px in x..x + width as i64 {
                self.blend(px, py, rgba);
            }
        }
    }

    pub fn fill_rounded_rect(
        &mut self,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        radius: u32,
        rgba: Rgba,
    ) {
        let r = radius.min(width / 2).min(height / 2) as i64;
        let (w, h) = (width as i64, height as i64);
        for dy in 0..h {
            for dx in 0..w {
                // distance check only inside the four corner squares
                let cx = if dx < r { r - 1 } else if dx >= w - r { w - r } else { dx };
                let cy = if dy < r { r - 1 } else if dy >= h - r { h - r } else { dy };
                let (ox, oy) = (dx - cx, dy - cy);
                if ox * ox + oy * oy > r * r {
                    continue;
                }
                self.blend(x + dx, y + dy, rgba);
            }
        }
    }

    /// Draw text with the built-in 8x8 font, each font pixel becoming a `scale` square.
    ///
    /// Characters outside the font are drawn as a hollow box.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, scale: u32, rgba: Rgba) {
        let cell = 8 * scale as i64;
        for (i, ch) in text.chars().enumerate() {
            let ox = x + i as i64 * cell;
            let rows = glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) != 0 {
                        self.fill_rect(
                            ox + col as i64 * scale as i64,
                            y + row as i64 * scale as i64,
                            scale,
                            scale,
                            rgba,
                        );
                    }
                }
            }
        }
    }
}

const MISSING_GLYPH: [u8; 8] = [0x00, 0x7E, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00];

fn glyph(ch: char) -> [u8; 8] {
    if ch == ' ' {
        return [0; 8];
    }
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .unwrap_or(MISSING_GLYPH)
}

/// Execute `commands` on a `width` x `height` canvas (device-independent
/// pixels) magnified by `scale`.
pub fn rasterize(
    width: u32,
    height: u32,
    commands: &[PaintCommand],
    scale: u32,
) -> Result<Pixmap> {
    if scale == 0 {
        return Err(Error::ExportError("scale must be at least 1".into()));
    }
    let (w, h) = match (width.checked_mul(scale), height.checked_mul(scale)) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(Error::ExportError(format!(
                "canvas {}x{} at {}x overflows",
                width, height, scale
            )))
        }
    };
    if w == 0 || h == 0 {
        return Err(Error::ExportError(format!(
            "canvas has zero size ({}x{})",
            w, h
        )));
    }

    let mut pixmap = Pixmap::new(w, h, WHITE)?;
    let s = scale as i64;
    for cmd in commands {
        match cmd {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                rgba,
            } => pixmap.fill_rect(
                *x as i64 * s,
                *y as i64 * s,
                width * scale,
                height * scale,
                *rgba,
            ),
            PaintCommand::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
                rgba,
            } => pixmap.fill_rounded_rect(
                *x as i64 * s,
                *y as i64 * s,
                width * scale,
                height * scale,
                radius * scale,
                *rgba,
            ),
            PaintCommand::Text {
                x,
                y,
                text,
                scale: text_scale,
                rgba,
            } => pixmap.draw_text(*x as i64 * s, *y as i64 * s, text, text_scale * scale, *rgba),
        }
    }
    debug!("rasterized {} commands onto {}x{}", commands.len(), w, h);
    Ok(pixmap)
}

/// Encode a pixmap as an 8-bit RGBA PNG.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>> {
    let img = RgbaImage::from_raw(pixmap.width, pixmap.height, pixmap.data.clone())
        .ok_or_else(|| {
            Error::ExportError(format!(
                "pixel buffer does not match a {}x{} canvas",
                pixmap.width, pixmap.height
            ))
        })?;
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| Error::ExportError(format!("PNG encode failed: {e}")))?;
    Ok(out)
}

/// Rasterize and encode in one step.
pub fn render_png(
    width: u32,
    height: u32,
    commands: &[PaintCommand],
    scale: u32,
) -> Result<Screenshot> {
    let pixmap = rasterize(width, height, commands, scale)?;
    let png_data = encode_png(&pixmap)?;
    Ok(Screenshot {
        width: pixmap.width,
        height: pixmap.height,
        png_data,
    })
}
