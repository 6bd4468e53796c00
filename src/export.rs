//! Card export to PNG.
//!
//! Two modes mirror the two save actions a user has:
//!
//! - `Standard` lays the card out on a dedicated fixed-width canvas with a
//!   white margin, the full description and the updated date on its own row.
//! - `Simple` captures the card as displayed: description clamped to three
//!   lines, chips flowing on one row.
//!
//! Both go through a `Rasterizer`, supersampled by `RenderConfig::scale`.
//! The payload is validated before it is handed out, so a failed render
//! never turns into a corrupt file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use base64::Engine as _;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::card::Card;
use crate::reference::RepoRef;
use crate::rendering::layout::{layout_card, LayoutOptions};
use crate::rendering::paint::{paint_layout, PaintCommand};
use crate::rendering::{raster, Screenshot};
use crate::{Error, RenderConfig, Result};

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
/// Anything shorter cannot hold a real image.
const MIN_PAYLOAD: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    Standard,
    Simple,
}

impl ExportMode {
    pub fn file_suffix(self) -> &'static str {
        match self {
            ExportMode::Standard => "-github-card.png",
            ExportMode::Simple => "-simple.png",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportMode::Standard => "standard",
            ExportMode::Simple => "simple",
        })
    }
}

impl FromStr for ExportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "card" => Ok(ExportMode::Standard),
            "simple" => Ok(ExportMode::Simple),
            other => Err(Error::ConfigError(format!("unknown export mode {:?}", other))),
        }
    }
}

/// The backend that turns a display list into PNG bytes.
pub trait Rasterizer {
    /// Whether the backend can be used at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Resolves once every font the card uses can be drawn. Export calls
    /// this before rasterizing so glyphs are never captured half-loaded.
    fn fonts_ready(&self) -> Result<()> {
        Ok(())
    }

    fn render(
        &self,
        width: u32,
        height: u32,
        commands: &[PaintCommand],
        scale: u32,
    ) -> Result<Screenshot>;
}

/// The built-in software rasterizer with its compiled-in bitmap font.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapRasterizer;

impl Rasterizer for BitmapRasterizer {
    fn render(
        &self,
        width: u32,
        height: u32,
        commands: &[PaintCommand],
        scale: u32,
    ) -> Result<Screenshot> {
        raster::render_png(width, height, commands, scale)
    }
}

/// A validated PNG ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub mode: ExportMode,
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl ExportedImage {
    /// `data:image/png;base64,...`
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png_data)
        )
    }

    /// Hex sha256 of the PNG bytes.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }

    /// Write the image into `dir` under its file name.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.png_data)?;
        info!("saved {} ({} bytes)", path.display(), self.png_data.len());
        Ok(path)
    }
}

pub struct Exporter<R = BitmapRasterizer> {
    rasterizer: R,
    config: RenderConfig,
}

impl Exporter<BitmapRasterizer> {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_rasterizer(BitmapRasterizer, config)
    }
}

impl<R: Rasterizer> Exporter<R> {
    pub fn with_rasterizer(rasterizer: R, config: RenderConfig) -> Self {
        Self { rasterizer, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn layout_options(&self, mode: ExportMode) -> LayoutOptions {
        match mode {
            ExportMode::Standard => LayoutOptions {
                card_width: self.config.card_width,
                outer_padding: self.config.outer_padding,
                updated_on_own_row: true,
                clamp_description: false,
            },
            ExportMode::Simple => LayoutOptions {
                card_width: self.config.display_width,
                outer_padding: 0,
                updated_on_own_row: false,
                clamp_description: true,
            },
        }
    }

    /// Render `card` to a PNG named after `repo`.
    ///
    /// Fails without touching the rasterizer when there is no card or the
    /// render configuration is out of range.
    pub fn export(
        &self,
        card: Option<&Card>,
        repo: &RepoRef,
        mode: ExportMode,
    ) -> Result<ExportedImage> {
        let card = card.ok_or_else(|| Error::ExportError("no card to export".into()))?;
        self.config.validate()?;
        if !self.rasterizer.is_available() {
            return Err(Error::ExportError("rasterizer is not available".into()));
        }
        self.rasterizer.fonts_ready()?;

        let layout = layout_card(card, self.layout_options(mode));
        let commands = paint_layout(&layout);
        debug!(
            "{} export of {}: {}x{} layout, {} paint commands",
            mode,
            repo,
            layout.width,
            layout.height,
            commands.len()
        );

        let shot = self
            .rasterizer
            .render(layout.width, layout.height, &commands, self.config.scale)?;
        validate(&shot)?;

        let image = ExportedImage {
            file_name: format!("{}{}", repo.file_stem(), mode.file_suffix()),
            mode,
            width: shot.width,
            height: shot.height,
            png_data: shot.png_data,
        };
        info!(
            "exported {} ({}x{}, sha256 {})",
            image.file_name,
            image.width,
            image.height,
            image.digest()
        );
        Ok(image)
    }
}

fn validate(shot: &Screenshot) -> Result<()> {
    if shot.width == 0 || shot.height == 0 {
        return Err(Error::ExportError(format!(
            "rendered canvas is invalid ({}x{})",
            shot.width, shot.height
        )));
    }
    if shot.png_data.len() < MIN_PAYLOAD || !shot.png_data.starts_with(PNG_SIGNATURE) {
        return Err(Error::ExportError(format!(
            "rendered image data is invalid ({} bytes)",
            shot.png_data.len()
        )));
    }
    Ok(())
}
