//! Display-space to source-space rectangle mapping.
//!
//! The canvas reports selections in the scaled display image's pixel
//! coordinates; cropping happens on the unscaled source buffer. The two are
//! related by independent per-axis scale factors.

use crate::selection::RectPx;

/// Map a display-space rectangle onto the source image, clamped to bounds.
///
/// Scale factors are `source dimension / display dimension` per axis. The
/// mapped origin is clamped into `[0, source)` and the mapped size is then
/// clamped against the already-clamped origin, so the result never reaches
/// outside the source image.
///
/// Returns `None` when the clamped rectangle has no area (or when any
/// dimension argument is degenerate); callers fall back to the full source
/// image in that case.
pub fn map_to_source(
    rect: RectPx,
    display_w: i32,
    display_h: i32,
    source_w: i32,
    source_h: i32,
) -> Option<RectPx> {
    if display_w <= 0 || display_h <= 0 || source_w <= 0 || source_h <= 0 {
        return None;
    }

    let scale_x = source_w as f64 / display_w as f64;
    let scale_y = source_h as f64 / display_h as f64;

    let x = ((rect.x as f64) * scale_x) as i32;
    let y = ((rect.y as f64) * scale_y) as i32;
    let width = ((rect.width as f64) * scale_x) as i32;
    let height = ((rect.height as f64) * scale_y) as i32;

    let x = x.clamp(0, source_w - 1);
    let y = y.clamp(0, source_h - 1);
    let width = width.min(source_w - x);
    let height = height.min(source_h - y);

    if width <= 0 || height <= 0 {
        return None;
    }

    Some(RectPx::new(x, y, width, height))
}
