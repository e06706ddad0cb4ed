//! Projectile vs. fighter hit testing
//!
//! Two precisions: a coarse bounding-box overlap, and a fine test that samples
//! the target's occupancy mask over the overlapping pixels. Fine falls back to
//! coarse when the target has no mask.

use serde::{Deserialize, Serialize};

use super::fighter::Fighter;
use super::projectile::Projectile;
use super::rect::Rect;

/// Requested hit-test precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Precision {
    /// Bounding-box overlap only
    Coarse,
    /// Occupancy-mask sampling when a mask is available
    #[default]
    Fine,
}

/// Precision actually usable against `target`
pub fn effective_precision(requested: Precision, target: &Fighter) -> Precision {
    match requested {
        Precision::Fine if target.mask().is_some() => Precision::Fine,
        _ => Precision::Coarse,
    }
}

/// Bounding-box overlap between the projectile and the fighter
pub fn coarse_hit(projectile: &Projectile, target: &Fighter) -> bool {
    projectile.bounds().overlaps(&target.rect())
}

/// Mask test over every integer point in the overlap of the projectile's
/// bounds and the fighter's rectangle
pub fn fine_hit(projectile: &Projectile, target: &Fighter) -> bool {
    let Some(mask) = target.mask() else {
        return coarse_hit(projectile, target);
    };
    let target_rect = target.rect();
    let Some(overlap) = projectile.bounds().intersection(&target_rect) else {
        return false;
    };
    sample_overlap(&overlap, &target_rect, |lx, ly| {
        mask.sample_scaled(lx, ly, target_rect.size.x, target_rect.size.y)
    })
}

/// Visit integer points of `overlap`, converted to `target`-local coordinates,
/// until `opaque` reports a hit
fn sample_overlap(overlap: &Rect, target: &Rect, opaque: impl Fn(f32, f32) -> bool) -> bool {
    let max = overlap.max();
    let x0 = overlap.min.x.ceil() as i32;
    let y0 = overlap.min.y.ceil() as i32;
    let x1 = max.x.floor() as i32;
    let y1 = max.y.floor() as i32;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let local_x = x as f32 - target.min.x;
            let local_y = y as f32 - target.min.y;
            if opaque(local_x, local_y) {
                return true;
            }
        }
    }
    false
}

impl Projectile {
    /// Hit test against `target` at the requested precision
    pub fn overlaps(&self, target: &Fighter, precision: Precision) -> bool {
        match effective_precision(precision, target) {
            Precision::Coarse => coarse_hit(self, target),
            Precision::Fine => fine_hit(self, target),
        }
    }
}
