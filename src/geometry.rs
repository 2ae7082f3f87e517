//! Geometry primitives: pixel rects, normalized boxes, viewport snapshot.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Center point of this rect.
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Check if a point is inside this rect.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    /// Express this rect as fractions of the viewport.
    pub fn normalize(&self, viewport: &Viewport) -> NormalizedBox {
        NormalizedBox(
            self.left / viewport.width,
            self.top / viewport.height,
            self.right() / viewport.width,
            self.bottom() / viewport.height,
        )
    }
}

/// Bounding box as `(left, top, right, bottom)` fractions of the viewport.
///
/// Components can fall outside `[0, 1]` when the element is partially
/// off-screen. Serializes as a 4-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox(pub f64, pub f64, pub f64, pub f64);

impl NormalizedBox {
    /// Reconstruct the pixel rect this box was normalized from.
    pub fn denormalize(&self, viewport: &Viewport) -> Rect {
        let left = self.0 * viewport.width;
        let top = self.1 * viewport.height;
        Rect {
            left,
            top,
            width: self.2 * viewport.width - left,
            height: self.3 * viewport.height - top,
        }
    }
}

/// Viewport dimensions, captured once at the start of a scan and used for
/// every normalization within that scan. Serializes as `[width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl From<Viewport> for [f64; 2] {
    fn from(viewport: Viewport) -> Self {
        [viewport.width, viewport.height]
    }
}

impl From<[f64; 2]> for Viewport {
    fn from([width, height]: [f64; 2]) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
