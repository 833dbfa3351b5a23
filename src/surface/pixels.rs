//! Indexed access to individual pixels of a row-major RGBA buffer.

use image::{Rgba, RgbaImage};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Byte offset of pixel `(x, y)` in a buffer `width` pixels wide.
#[inline]
pub fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * CHANNELS
}

/// Reads the color at `(x, y)`, or `None` when the coordinate is outside the buffer.
#[inline]
pub fn get_pixel(image: &RgbaImage, x: u32, y: u32) -> Option<Rgba<u8>> {
    if x >= image.width() || y >= image.height() {
        return None;
    }
    let idx = pixel_index(image.width(), x, y);
    let raw: &[u8] = image.as_raw();
    let px = raw.get(idx..idx + CHANNELS)?;
    Some(Rgba([px[0], px[1], px[2], px[3]]))
}

/// Writes `color` at `(x, y)`. Returns false (and writes nothing) when out of bounds.
#[inline]
pub fn set_pixel(image: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) -> bool {
    if x >= image.width() || y >= image.height() {
        return false;
    }
    let idx = pixel_index(image.width(), x, y);
    let raw: &mut [u8] = image;
    match raw.get_mut(idx..idx + CHANNELS) {
        Some(px) => {
            px.copy_from_slice(&color.0);
            true
        }
        None => false,
    }
}

/// Exact channel-wise comparison, no tolerance.
#[inline]
pub fn colors_equal(a: Rgba<u8>, b: Rgba<u8>) -> bool {
    a.0 == b.0
}

/// Converts a configuration color into raw, unmultiplied pixel channels.
pub fn to_rgba(color: egui::Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}
