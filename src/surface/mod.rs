//! The immediate-mode drawing surface the editor renders into.
//!
//! [`Surface`] mirrors the small slice of a 2D canvas API the editor needs:
//! path building, stroking, stroke state, and whole-buffer readback/write.
//! [`RasterSurface`] is the software implementation used by the app and tests.

pub mod pixels;
pub mod raster;

use egui::{Color32, Pos2, Vec2};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::{PaintError, PaintResult};
use crate::state::CanvasDimensions;
use raster::{StrokeStyle, ellipse_points, stroke_polyline};

/// How the open ends of a stroked sub-path are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Replaces the buffer with transparent pixels of the new size and resets
    /// stroke state to its defaults.
    fn set_size(&mut self, width: u32, height: u32);

    fn begin_path(&mut self);
    fn move_to(&mut self, pos: Pos2);
    fn line_to(&mut self, pos: Pos2);
    /// Appends a closed axis-aligned ellipse outline to the current path.
    fn ellipse(&mut self, center: Pos2, radii: Vec2);
    /// Rasterizes the current path with the current stroke state.
    fn stroke(&mut self);

    fn set_stroke_color(&mut self, color: Color32);
    fn stroke_color(&self) -> Color32;
    fn set_line_width(&mut self, width: f32);
    fn line_width(&self) -> f32;
    fn set_line_cap(&mut self, cap: LineCap);

    /// Copies the whole pixel buffer.
    fn image_data(&self) -> RgbaImage;
    /// Writes `image` at the origin, clipped to the current bounds.
    fn put_image_data(&mut self, image: &RgbaImage);
}

#[derive(Debug, Clone, Default)]
struct SubPath {
    points: Vec<Pos2>,
    closed: bool,
}

#[derive(Debug, Clone, Copy)]
struct StrokeState {
    color: Color32,
    width: f32,
    cap: LineCap,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 1.0,
            cap: LineCap::Butt,
        }
    }
}

/// Software surface backed by an [`RgbaImage`].
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    path: Vec<SubPath>,
    state: StrokeState,
    revision: u64,
}

impl RasterSurface {
    /// Creates a transparent surface.
    pub fn new(width: u32, height: u32) -> PaintResult<Self> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidDimensions { width, height });
        }
        Ok(Self::from_image(RgbaImage::new(width, height)))
    }

    /// Creates a surface filled with `background`.
    pub fn with_background(width: u32, height: u32, background: Color32) -> PaintResult<Self> {
        let mut surface = Self::new(width, height)?;
        let fill = pixels::to_rgba(background);
        for px in surface.pixels.pixels_mut() {
            *px = fill;
        }
        Ok(surface)
    }

    /// Wraps raw row-major RGBA bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> PaintResult<Self> {
        if width == 0 || height == 0 {
            return Err(PaintError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * pixels::CHANNELS;
        let actual = data.len();
        let image = RgbaImage::from_raw(width, height, data)
            .filter(|_| actual == expected)
            .ok_or(PaintError::BufferSizeMismatch { expected, actual })?;
        Ok(Self::from_image(image))
    }

    /// Infallible form of `new`/`with_background`; `CanvasDimensions` is never zero.
    pub fn blank(dims: CanvasDimensions, background: Option<Color32>) -> Self {
        let pixels = match background {
            Some(color) => RgbaImage::from_pixel(dims.width, dims.height, pixels::to_rgba(color)),
            None => RgbaImage::new(dims.width, dims.height),
        };
        Self::from_image(pixels)
    }

    fn from_image(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            path: Vec::new(),
            state: StrokeState::default(),
            revision: 0,
        }
    }

    /// Borrow the live pixels without copying.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Increases every time the pixels change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width.max(1), height.max(1));
        self.path.clear();
        self.state = StrokeState::default();
        self.touch();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, pos: Pos2) {
        self.path.push(SubPath {
            points: vec![pos],
            closed: false,
        });
    }

    fn line_to(&mut self, pos: Pos2) {
        match self.path.last_mut() {
            Some(sub) if !sub.closed => sub.points.push(pos),
            _ => self.move_to(pos),
        }
    }

    fn ellipse(&mut self, center: Pos2, radii: Vec2) {
        self.path.push(SubPath {
            points: ellipse_points(center, radii),
            closed: true,
        });
    }

    fn stroke(&mut self) {
        let style = StrokeStyle {
            color: pixels::to_rgba(self.state.color),
            width: self.state.width,
            cap: self.state.cap,
        };
        for sub in &self.path {
            stroke_polyline(&mut self.pixels, &sub.points, sub.closed, &style);
        }
        self.touch();
    }

    fn set_stroke_color(&mut self, color: Color32) {
        self.state.color = color;
    }

    fn stroke_color(&self) -> Color32 {
        self.state.color
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.width = width;
        }
    }

    fn line_width(&self) -> f32 {
        self.state.width
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.cap = cap;
    }

    fn image_data(&self) -> RgbaImage {
        self.pixels.clone()
    }

    fn put_image_data(&mut self, image: &RgbaImage) {
        if image.dimensions() == self.pixels.dimensions() {
            self.pixels.copy_from_slice(image.as_raw());
        } else {
            let w = image.width().min(self.pixels.width()) as usize;
            let h = image.height().min(self.pixels.height());
            let src_stride = image.width() as usize * pixels::CHANNELS;
            let dst_stride = self.pixels.width() as usize * pixels::CHANNELS;
            let src: &[u8] = image.as_raw();
            let dst: &mut [u8] = &mut self.pixels;
            for y in 0..h as usize {
                let row = w * pixels::CHANNELS;
                dst[y * dst_stride..y * dst_stride + row]
                    .copy_from_slice(&src[y * src_stride..y * src_stride + row]);
            }
        }
        self.touch();
    }
}
