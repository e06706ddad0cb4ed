//! Per-pixel occupancy masks for fine collision
//!
//! A mask records which pixels of a fighter's sprite are opaque. The
//! presentation layer builds one from decoded image alpha; the simulation only
//! samples it. Masks are stretched to the fighter's extent when sampled, the
//! same way the sprite is scaled to fit the fighter.

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyMask {
    width: u32,
    height: u32,
    /// Row-major, one entry per pixel
    opaque: Vec<bool>,
}

impl OccupancyMask {
    /// Fully opaque mask (a plain rectangle)
    pub fn solid(width: u32, height: u32) -> Result<Self, ArenaError> {
        if width == 0 || height == 0 {
            return Err(ArenaError::EmptyMask);
        }
        Ok(Self {
            width,
            height,
            opaque: vec![true; (width * height) as usize],
        })
    }

    /// Build from an alpha channel (row-major, one byte per pixel)
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8], threshold: u8) -> Result<Self, ArenaError> {
        if width == 0 || height == 0 {
            return Err(ArenaError::EmptyMask);
        }
        let expected = (width * height) as usize;
        if alpha.len() != expected {
            return Err(ArenaError::MaskSizeMismatch {
                width,
                height,
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            opaque: alpha.iter().map(|&a| a >= threshold).collect(),
        })
    }

    /// Build from a predicate over pixel coordinates
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Result<Self, ArenaError> {
        if width == 0 || height == 0 {
            return Err(ArenaError::EmptyMask);
        }
        let mut opaque = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                opaque.push(f(x, y));
            }
        }
        Ok(Self { width, height, opaque })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opacity at a mask pixel; out-of-range reads are transparent
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.opaque[(y * self.width + x) as usize]
    }

    /// Sample at a point local to a body of `extent` (w, h), stretching the
    /// mask over the body
    pub fn sample_scaled(&self, local_x: f32, local_y: f32, extent_w: f32, extent_h: f32) -> bool {
        if local_x < 0.0 || local_y < 0.0 || local_x >= extent_w || local_y >= extent_h {
            return false;
        }
        let mx = (local_x * self.width as f32 / extent_w) as u32;
        let my = (local_y * self.height as f32 / extent_h) as u32;
        self.is_opaque(mx, my)
    }

    /// Number of opaque pixels
    pub fn coverage(&self) -> usize {
        self.opaque.iter().filter(|&&o| o).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_alpha_threshold() {
        let mask = OccupancyMask::from_alpha(2, 2, &[0, 255, 127, 128], 128).unwrap();
        assert!(!mask.is_opaque(0, 0));
        assert!(mask.is_opaque(1, 0));
        assert!(!mask.is_opaque(0, 1));
        assert!(mask.is_opaque(1, 1));
        assert_eq!(mask.coverage(), 2);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(OccupancyMask::solid(0, 4), Err(ArenaError::EmptyMask)));
        assert!(matches!(
            OccupancyMask::from_alpha(3, 3, &[255; 8], 1),
            Err(ArenaError::MaskSizeMismatch { expected: 9, actual: 8, .. })
        ));
    }

    #[test]
    fn test_scaled_sampling() {
        // Left half opaque, 2x1 mask stretched over a 200x200 body
        let mask = OccupancyMask::from_fn(2, 1, |x, _| x == 0).unwrap();
        assert!(mask.sample_scaled(10.0, 150.0, 200.0, 200.0));
        assert!(mask.sample_scaled(99.0, 0.0, 200.0, 200.0));
        assert!(!mask.sample_scaled(100.0, 0.0, 200.0, 200.0));
        assert!(!mask.sample_scaled(-1.0, 0.0, 200.0, 200.0));
        assert!(!mask.sample_scaled(10.0, 200.0, 200.0, 200.0));
    }

    #[test]
    fn test_out_of_range_is_transparent() {
        let mask = OccupancyMask::solid(4, 4).unwrap();
        assert!(mask.is_opaque(3, 3));
        assert!(!mask.is_opaque(4, 0));
    }
}
