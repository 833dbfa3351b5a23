//! Paint bucket: 4-connected flood fill on raw pixels.

use std::collections::VecDeque;

use image::{Rgba, RgbaImage};

use crate::surface::Surface;
use crate::surface::pixels::{colors_equal, get_pixel, set_pixel};

/// True when filling from `(x, y)` with `color` would change at least the seed.
pub fn fill_would_change(image: &RgbaImage, x: u32, y: u32, color: Rgba<u8>) -> bool {
    get_pixel(image, x, y).is_some_and(|seed| !colors_equal(seed, color))
}

/// Recolors the region of pixels 4-connected to `(x, y)` that share the
/// seed's color. Returns how many pixels were recolored.
///
/// Color equality is exact on all four channels. Neighbors are queued
/// without checking and tested when dequeued, so a pixel may sit in the
/// queue more than once but is only recolored the first time.
pub fn flood_fill(image: &mut RgbaImage, x: u32, y: u32, new_color: Rgba<u8>) -> usize {
    let Some(old_color) = get_pixel(image, x, y) else {
        log::warn!(
            "fill seed ({x}, {y}) outside {}x{} buffer",
            image.width(),
            image.height()
        );
        return 0;
    };
    if colors_equal(old_color, new_color) {
        return 0;
    }

    let (width, height) = image.dimensions();
    let mut filled = 0;
    let mut queue = VecDeque::new();
    queue.push_back((x, y));

    while let Some((px, py)) = queue.pop_front() {
        if !get_pixel(image, px, py).is_some_and(|c| colors_equal(c, old_color)) {
            continue;
        }
        set_pixel(image, px, py, new_color);
        filled += 1;

        if py > 0 {
            queue.push_back((px, py - 1));
        }
        if px + 1 < width {
            queue.push_back((px + 1, py));
        }
        if py + 1 < height {
            queue.push_back((px, py + 1));
        }
        if px > 0 {
            queue.push_back((px - 1, py));
        }
    }

    filled
}

/// Fills on a surface: one readback, the fill, and one write-back if
/// anything changed.
pub fn fill_surface<S: Surface + ?Sized>(surface: &mut S, x: u32, y: u32, color: Rgba<u8>) -> usize {
    let mut image = surface.image_data();
    let filled = flood_fill(&mut image, x, y, color);
    if filled > 0 {
        surface.put_image_data(&image);
    }
    filled
}
