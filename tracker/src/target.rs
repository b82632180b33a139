//! Target geometry and hit testing.

use serde::{Deserialize, Serialize};

/// The sub-rectangle of the window into which target centers may be placed:
/// the window deflated by the disk diameter per axis, so the rendered disk
/// never clips the window edge. Clamped to at least 1x1 so a degenerate
/// window cannot produce a zero modulus downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintingArea {
    pub width: u32,
    pub height: u32,
}

impl PaintingArea {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn from_window(window_width: u32, window_height: u32, radius: u32) -> Self {
        Self::new(
            window_width.saturating_sub(2 * radius),
            window_height.saturating_sub(2 * radius),
        )
    }

    pub fn midpoint(self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn contains(self, point: (i32, i32)) -> bool {
        point.0 >= 0
            && point.1 >= 0
            && (point.0 as u32) < self.width
            && (point.1 as u32) < self.height
    }
}

/// The on-screen disk the user must reach with the pointer.
///
/// `center` is the top-left corner of the disk's bounding box (the drawing
/// origin), matching how the disk is positioned on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub center: (i32, i32),
    pub radius: i32,
}

impl Target {
    pub fn new(center: (i32, i32), radius: u32) -> Self {
        Self {
            center,
            radius: radius as i32,
        }
    }

    /// Whether the raw pointer position counts as a hit.
    ///
    /// The pointer is first shifted by the radius on each axis to line up
    /// with the corner-origin drawing position, then compared by squared
    /// Euclidean distance. Strictly less than: a point exactly on the
    /// boundary is a miss.
    pub fn is_inside(&self, pointer: (i32, i32)) -> bool {
        let dx = (pointer.0 - self.radius - self.center.0) as i64;
        let dy = (pointer.1 - self.radius - self.center.1) as i64;
        let r = self.radius as i64;
        dx * dx + dy * dy < r * r
    }
}
