//! `map_canvas`: Software-Zeichenprimitive für Kartenoberflächen.
//!
//! Zeichnet auf `image::RgbaImage`, ohne GPU:
//! - Linien mit Strichstärke, Polygon-Umrisse und -Füllung, Kreise
//! - Kompakter Bitmap-Font für Lot-Beschriftungen
//! - Raster-Blitting mit Opacity (Luftbilder, Höhenmodelle)
//! - Hillshade für einkanalige Höhenraster
//! - PNG-Kodierung der fertigen Oberfläche
//!
//! # Beispiel
//! ```no_run
//! use image::{Rgba, RgbaImage};
//! use map_canvas::{draw, encode};
//!
//! let mut surface = RgbaImage::from_pixel(256, 256, Rgba([242, 239, 233, 255]));
//! draw::draw_polyline(&mut surface, &[(10.0, 10.0), (200.0, 40.0)], 3.0, Rgba([255, 0, 0, 255]));
//! let png = encode::encode_png(&surface)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod draw;
pub mod encode;
pub mod hillshade;
pub mod raster;
pub mod text;

pub use draw::{
    blend_pixel, distance_to_segment, draw_filled_circle, draw_polygon_outline, draw_polyline,
    fill_polygon,
};
pub use encode::encode_png;
pub use hillshade::{apply_hillshade, compute_hillshade, HillshadeParams};
pub use raster::{blit_scaled, normalize_to_gray, PixelRect};
pub use text::{draw_text, draw_text_outlined, text_height, text_width};
