//! Pixel compositing helpers shared by the renderers.

use image::{Rgba, RgbaImage};

/// A fully transparent canvas. Zero dimensions are bumped to one pixel so
/// downstream blits always have a real buffer to land on.
pub fn empty(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width.max(1), height.max(1))
}

pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width.max(1), height.max(1), color)
}

/// Source-over alpha compositing of one pixel.
fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    if src.0[3] == 255 {
        return src;
    }
    let sa = src.0[3] as f32 / 255.0;
    let da = dst.0[3] as f32 / 255.0 * (1.0 - sa);
    let out_a = sa + da;
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        out[c] = ((src.0[c] as f32 * sa + dst.0[c] as f32 * da) / out_a).round() as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

/// Alpha-blends `src` onto `dst` with its top-left corner at (x, y).
/// Pixels falling outside the destination clip away silently.
pub fn blit(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    blit_with_opacity(dst, src, x, y, 100);
}

/// Like `blit`, with the source alpha scaled by `opacity` percent.
pub fn blit_with_opacity(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, opacity: u8) {
    let (dw, dh) = (dst.width() as i64, dst.height() as i64);
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let (tx, ty) = (x + sx as i64, y + sy as i64);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let mut pixel = *pixel;
        pixel.0[3] = (pixel.0[3] as u32 * opacity as u32 / 100) as u8;
        if pixel.0[3] == 0 {
            continue;
        }
        let target = dst.get_pixel_mut(tx as u32, ty as u32);
        *target = over(*target, pixel);
    }
}

/// Rotates counterclockwise about the canvas centre, keeping the canvas
/// size; corners that rotate out are clipped, which is why callers give
/// their sprite margin first. Nearest-neighbour sampling.
pub fn rotate_about_center(src: &RgbaImage, degrees: f64) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w, h);
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - cx;
        let dy = y as f64 + 0.5 - cy;
        // screen y points down, so flip the usual rotation direction
        let sx = cx + dx * cos - dy * sin;
        let sy = cy + dx * sin + dy * cos;
        if sx >= 0.0 && sy >= 0.0 && (sx as u32) < w && (sy as u32) < h {
            *pixel = *src.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_outside_destination() {
        let mut dst = empty(4, 4);
        let src = filled(2, 2, Rgba([10, 20, 30, 255]));
        blit(&mut dst, &src, 3, 3);
        blit(&mut dst, &src, -1, -1);
        assert_eq!(dst.get_pixel(3, 3).0, [10, 20, 30, 255]);
        assert_eq!(dst.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(dst.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn blit_respects_source_transparency() {
        let mut dst = filled(1, 1, Rgba([100, 100, 100, 255]));
        blit(&mut dst, &empty(1, 1), 0, 0);
        assert_eq!(dst.get_pixel(0, 0).0, [100, 100, 100, 255]);
    }

    #[test]
    fn opacity_blends_towards_background() {
        let mut dst = filled(1, 1, Rgba([0, 0, 0, 255]));
        let src = filled(1, 1, Rgba([255, 255, 255, 255]));
        blit_with_opacity(&mut dst, &src, 0, 0, 50);
        let out = dst.get_pixel(0, 0).0;
        assert!(out[0] > 100 && out[0] < 160);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn full_turn_is_identity() {
        let mut src = empty(5, 5);
        src.put_pixel(1, 2, Rgba([9, 9, 9, 255]));
        let turned = rotate_about_center(&src, 360.0);
        assert_eq!(turned.get_pixel(1, 2).0, [9, 9, 9, 255]);
    }
}
