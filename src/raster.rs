//! Paints a [`PreviewLayout`] into an RGB bitmap.

use image::{Rgb, RgbImage};
use log::debug;

use crate::export::ExportError;
use crate::fonts::Typeface;
use crate::layout::{DrawOp, Paint, PreviewLayout, Rect};
use crate::theme::{Color, WHITE};

/// Largest bitmap edge accepted by [`SurfaceRasterizer`], in pixels.
pub const MAX_BITMAP_EDGE: u32 = 32_768;

/// Turns a laid-out surface into a bitmap at `oversample` device pixels per CSS pixel.
pub trait Rasterizer {
    fn rasterize(
        &mut self,
        surface: &PreviewLayout,
        face: &dyn Typeface,
        oversample: u32,
    ) -> Result<RgbImage, ExportError>;
}

/// Software rasterizer on a white background.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceRasterizer;

/// Bitmap size for a surface: `(W * s, ceil(H) * s)`.
pub fn bitmap_size(surface: &PreviewLayout, oversample: u32) -> (u32, u32) {
    let width = surface.width().round().max(0.0) as u32;
    let height = surface.height().ceil().max(0.0) as u32;
    (width.saturating_mul(oversample), height.saturating_mul(oversample))
}

impl Rasterizer for SurfaceRasterizer {
    fn rasterize(
        &mut self,
        surface: &PreviewLayout,
        face: &dyn Typeface,
        oversample: u32,
    ) -> Result<RgbImage, ExportError> {
        if oversample == 0 {
            return Err(ExportError::Render("oversample factor must be at least 1".into()));
        }
        let (width, height) = bitmap_size(surface, oversample);
        if width == 0 || height == 0 {
            return Err(ExportError::EmptySurface);
        }
        if width > MAX_BITMAP_EDGE || height > MAX_BITMAP_EDGE {
            return Err(ExportError::Render(format!(
                "surface of {width}x{height} px exceeds the {MAX_BITMAP_EDGE} px limit"
            )));
        }

        debug!(
            "Rasterizing {} draw ops into {width}x{height} px",
            surface.ops().len()
        );
        let scale = oversample as f32;
        let mut canvas = RgbImage::from_pixel(width, height, WHITE);
        for op in surface.ops() {
            match op {
                DrawOp::Fill {
                    rect,
                    paint,
                    radius,
                } => fill_rect(&mut canvas, scaled(rect, scale), *paint, radius * scale),
                DrawOp::Text {
                    x,
                    baseline,
                    text,
                    px,
                    bold,
                    color,
                } => face.draw(
                    &mut canvas,
                    x * scale,
                    baseline * scale,
                    text,
                    px * scale,
                    *bold,
                    *color,
                ),
            }
        }
        Ok(canvas)
    }
}

fn scaled(rect: &Rect, scale: f32) -> Rect {
    Rect::new(
        rect.x * scale,
        rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    )
}

fn lerp(from: Color, to: Color, t: f32) -> Color {
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgb([
        channel(from[0], to[0]),
        channel(from[1], to[1]),
        channel(from[2], to[2]),
    ])
}

/// Whether the pixel centre `(px, py)` lies inside `rect` with rounded corners.
fn covers(rect: &Rect, radius: f32, px: f32, py: f32) -> bool {
    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    if radius == 0.0 {
        return true;
    }
    let cx = px.clamp(rect.x + radius, rect.x + rect.width - radius);
    let cy = py.clamp(rect.y + radius, rect.y + rect.height - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

fn fill_rect(canvas: &mut RgbImage, rect: Rect, paint: Paint, radius: f32) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let x0 = rect.x.round().max(0.0) as u32;
    let y0 = rect.y.round().max(0.0) as u32;
    let x1 = ((rect.x + rect.width).round().max(0.0) as u32).min(canvas.width());
    let y1 = ((rect.y + rect.height).round().max(0.0) as u32).min(canvas.height());

    for y in y0..y1 {
        for x in x0..x1 {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if !covers(&rect, radius, px, py) {
                continue;
            }
            let color = match paint {
                Paint::Solid(color) => color,
                Paint::Gradient { from, to } => {
                    let t = ((px - rect.x) / rect.width + (py - rect.y) / rect.height) / 2.0;
                    lerp(from, to, t.clamp(0.0, 1.0))
                }
            };
            canvas.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::GreekedFace;
    use crate::layout::{layout_preview, SURFACE_WIDTH};
    use crate::model::ResumeRecord;
    use crate::theme::{Palette, Theme};

    #[test]
    fn bitmap_is_surface_size_times_oversample() {
        let face = GreekedFace::default();
        let preview = layout_preview(
            &ResumeRecord::sample(),
            &Theme::default(),
            &face,
            SURFACE_WIDTH as f32,
        );
        let bitmap = SurfaceRasterizer
            .rasterize(&preview, &face, 2)
            .expect("rasterize sample");
        assert_eq!(bitmap.width(), SURFACE_WIDTH * 2);
        assert_eq!(bitmap.height(), preview.height().ceil() as u32 * 2);
    }

    #[test]
    fn header_gradient_runs_from_top_left_to_bottom_right() {
        let face = GreekedFace::default();
        let preview = layout_preview(&ResumeRecord::empty(), &Theme::default(), &face, 794.0);
        let bitmap = SurfaceRasterizer.rasterize(&preview, &face, 1).expect("rasterize");

        let colors = Palette::Corporate.colors();
        // Page margin stays white, the header starts near `header_from`.
        assert_eq!(bitmap.get_pixel(5, 5), &WHITE);
        let near_start = bitmap.get_pixel(60, 60);
        assert_ne!(near_start, &WHITE);
        let distance = |a: &Color, b: &Color| {
            (0..3)
                .map(|i| (a[i] as i32 - b[i] as i32).abs())
                .sum::<i32>()
        };
        assert!(distance(near_start, &colors.header_from) < distance(near_start, &colors.header_to));
    }

    #[test]
    fn rounded_corners_leave_the_corner_pixel_unpainted() {
        let mut canvas = RgbImage::from_pixel(20, 20, WHITE);
        let black = Rgb([0, 0, 0]);
        fill_rect(&mut canvas, Rect::new(0.0, 0.0, 20.0, 20.0), Paint::Solid(black), 8.0);
        assert_eq!(canvas.get_pixel(0, 0), &WHITE);
        assert_eq!(canvas.get_pixel(10, 10), &black);
        assert_eq!(canvas.get_pixel(10, 0), &black);
    }

    #[test]
    fn zero_oversample_is_a_render_error() {
        let face = GreekedFace::default();
        let preview = layout_preview(&ResumeRecord::empty(), &Theme::default(), &face, 794.0);
        let err = SurfaceRasterizer.rasterize(&preview, &face, 0).unwrap_err();
        assert!(matches!(err, ExportError::Render(_)));
    }
}
