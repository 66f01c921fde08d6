//! Damage overlay painting
//!
//! Stamps damage marks and the brush preview onto a rendered symbol image.
//! Marks are drawn at their accounting radius; the preview ring uses the
//! preview radius.

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::brush::BrushSize;
use crate::constants::{
    CROSSHAIR_HALF_LENGTH, DAMAGE_FILL, DAMAGE_FILL_ALPHA, PREVIEW_LINE_WIDTH,
    PREVIEW_STROKE_ALPHA,
};
use crate::types::DamageMark;

/// Blend `color` over the pixel at (x, y) with the given coverage
///
/// Out-of-bounds coordinates are ignored.
#[inline]
fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: [u8; 3], alpha: f32) {
    if x < 0 || y < 0 || x >= i64::from(image.width()) || y >= i64::from(image.height()) {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    // Bounds checked above
    let Rgba(dst) = image.get_pixel_mut(x as u32, y as u32);
    for i in 0..3 {
        let blended = f32::from(color[i]) * alpha + f32::from(dst[i]) * (1.0 - alpha);
        dst[i] = blended.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = dst[3].max((alpha * 255.0).round() as u8);
}

/// Fill an anti-aliased disc centered on a pixel
fn fill_disc(image: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: [u8; 3], alpha: f32) {
    if radius <= 0.0 {
        return;
    }
    let x_min = (cx - radius - 1.0).floor() as i64;
    let x_max = (cx + radius + 1.0).ceil() as i64;
    let y_min = (cy - radius - 1.0).floor() as i64;
    let y_max = (cy + radius + 1.0).ceil() as i64;

    for py in y_min..=y_max {
        for px in x_min..=x_max {
            let dx = (px as f32 + 0.5) - cx;
            let dy = (py as f32 + 0.5) - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            // One-pixel soft edge
            let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
            blend_pixel(image, px, py, color, alpha * coverage);
        }
    }
}

/// Stroke an anti-aliased ring
fn stroke_ring(
    image: &mut RgbaImage,
    cx: f32,
    cy: f32,
    radius: f32,
    line_width: f32,
    color: [u8; 3],
    alpha: f32,
) {
    let half = line_width / 2.0;
    let reach = radius + half + 1.0;
    let x_min = (cx - reach).floor() as i64;
    let x_max = (cx + reach).ceil() as i64;
    let y_min = (cy - reach).floor() as i64;
    let y_max = (cy + reach).ceil() as i64;

    for py in y_min..=y_max {
        for px in x_min..=x_max {
            let dx = (px as f32 + 0.5) - cx;
            let dy = (py as f32 + 0.5) - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = (half + 0.5 - (dist - radius).abs()).clamp(0.0, 1.0);
            blend_pixel(image, px, py, color, alpha * coverage);
        }
    }
}

/// Paint every mark as a translucent red disc
pub fn paint_damage_overlay<'a, I>(image: &mut RgbaImage, marks: I) -> usize
where
    I: IntoIterator<Item = &'a DamageMark>,
{
    let mut painted = 0;
    for mark in marks {
        fill_disc(
            image,
            mark.x as f32,
            mark.y as f32,
            mark.radius() as f32,
            DAMAGE_FILL,
            DAMAGE_FILL_ALPHA,
        );
        painted += 1;
    }
    debug!("paint_damage_overlay: {} marks", painted);
    painted
}

/// Paint the brush preview ring and crosshair centered on (x, y)
pub fn paint_brush_preview(image: &mut RgbaImage, x: u32, y: u32, brush: BrushSize) {
    let radius = brush.preview_radius(image.width());
    stroke_ring(
        image,
        x as f32,
        y as f32,
        radius as f32,
        PREVIEW_LINE_WIDTH,
        DAMAGE_FILL,
        PREVIEW_STROKE_ALPHA,
    );

    let (cx, cy) = (i64::from(x), i64::from(y));
    let thickness = (PREVIEW_LINE_WIDTH / 2.0).floor() as i64;
    for offset in -CROSSHAIR_HALF_LENGTH..=CROSSHAIR_HALF_LENGTH {
        for t in -thickness..=thickness {
            blend_pixel(image, cx + offset, cy + t, DAMAGE_FILL, PREVIEW_STROKE_ALPHA);
            // The center square is already covered by the horizontal bar
            if offset.abs() > thickness {
                blend_pixel(image, cx + t, cy + offset, DAMAGE_FILL, PREVIEW_STROKE_ALPHA);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_mark_tints_its_pixel() {
        let mut image = white(20);
        let mark = DamageMark::new(10, 10, BrushSize::MAX);
        assert_eq!(paint_damage_overlay(&mut image, [&mark]), 1);

        // 0.7 * (239, 68, 68) + 0.3 * white
        assert_eq!(*image.get_pixel(10, 10), Rgba([244, 124, 124, 255]));
        // Far corner untouched
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_marks_near_edge_do_not_panic() {
        let mut image = white(4);
        let marks = [
            DamageMark::new(0, 0, BrushSize::MAX),
            DamageMark::new(3, 3, BrushSize::MAX),
            DamageMark::new(100, 100, BrushSize::MAX),
        ];
        assert_eq!(paint_damage_overlay(&mut image, marks.iter()), 3);
    }

    #[test]
    fn test_preview_ring_is_hollow() {
        let mut image = white(200);
        paint_brush_preview(&mut image, 100, 100, BrushSize::MAX);

        // Preview radius is 70 px; a point halfway out stays white
        assert_eq!(*image.get_pixel(135, 100), Rgba([255, 255, 255, 255]));
        assert_ne!(*image.get_pixel(170, 100), Rgba([255, 255, 255, 255]));
        // Crosshair center is tinted
        assert_ne!(*image.get_pixel(100, 100), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_crosshair_is_blended_once_per_pixel() {
        let mut image = white(200);
        paint_brush_preview(&mut image, 100, 100, BrushSize::MAX);

        let stroke = *image.get_pixel(100, 100);
        // 0.9 * (239, 68, 68) + 0.1 * white
        assert_eq!(stroke, Rgba([241, 87, 87, 255]));
        for (x, y) in [(99, 99), (101, 101), (99, 101), (101, 99), (105, 100), (100, 95), (101, 104)] {
            assert_eq!(*image.get_pixel(x, y), stroke, "pixel ({x}, {y})");
        }
        assert_eq!(*image.get_pixel(106, 100), Rgba([255, 255, 255, 255]));
    }
}
