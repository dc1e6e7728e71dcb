//! PNG-Kodierung.

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Kodiert ein RGBA-Bild als PNG in einen Speicherpuffer.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        anyhow::bail!("Leeres Bild ({}x{}) kann nicht kodiert werden", image.width(), image.height());
    }
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .context("PNG-Kodierung fehlgeschlagen")?;
    log::debug!(
        "PNG kodiert: {}x{}, {} Bytes",
        image.width(),
        image.height(),
        buffer.get_ref().len()
    );
    Ok(buffer.into_inner())
}
