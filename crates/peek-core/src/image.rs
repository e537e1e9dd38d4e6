//! Image sizing math: texture budgets and fit-to-window scaling.

use crate::{CoreError, CoreResult};

/// Smallest scale a fitted or zoomed image is drawn at.
pub const MIN_SCALE: f32 = 0.1;

/// Largest scale a fitted or zoomed image is drawn at.
pub const MAX_SCALE: f32 = 6.0;

const MIB: f64 = 1024.0 * 1024.0;

/// Estimated RGBA texture size for an image, in bytes.
pub fn texture_bytes(width: u32, height: u32) -> u64 {
    (width as u64).saturating_mul(height as u64).saturating_mul(4)
}

/// Refuses images whose decoded texture would exceed `limit` bytes.
pub fn check_texture_budget(width: u32, height: u32, limit: u64) -> CoreResult<()> {
    let estimated = texture_bytes(width, height);
    if estimated > limit {
        return Err(CoreError::ImageTooLarge {
            width,
            height,
            estimated_mb: estimated as f64 / MIB,
            limit_mb: limit as f64 / MIB,
        });
    }
    Ok(())
}

/// Scale at which an image of `natural` size fits inside `viewport`.
///
/// Zero-sized images are treated as 1x1.
pub fn fit_scale(viewport: (f32, f32), natural: (u32, u32)) -> f32 {
    let sx = viewport.0 / natural.0.max(1) as f32;
    let sy = viewport.1 / natural.1.max(1) as f32;
    let scale = sx.min(sy);
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Size in MiB, for status lines.
pub fn texture_mib(width: u32, height: u32) -> f64 {
    texture_bytes(width, height) as f64 / MIB
}
