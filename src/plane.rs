use crate::grid::PointGrid;
use crate::point::{is_valid, Point};
use crate::rect::Rect;
use bevy_math::Vec3;

/// A plane defined by a unit normal and an anchor point lying on it:
/// `n . (p - p0) = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub anchor: Point,
}

impl Plane {
    /// The signed distance from `p` to this plane, along the normal.
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, p: Point) -> f32 {
        self.normal.dot(p - self.anchor)
    }
}

/// Fit a plane to the four corner samples of a rectangle (spec §4.B).
///
/// Tries `v1 x v2`, falling back to `v1 x v3`, then `v2 x v3`, where
/// `v1 = pbr - ptr`, `v2 = ptr - ptl`, `v3 = pbl - ptl`. Returns `None` if all
/// three candidate cross products are zero (the rectangle is degenerate —
/// its corners are colinear or coincident); the caller must abandon the
/// rectangle rather than split it.
#[must_use]
pub fn fit_plane(ptl: Point, ptr: Point, pbl: Point, pbr: Point) -> Option<Plane> {
    let v1 = pbr - ptr;
    let v2 = ptr - ptl;
    let v3 = pbl - ptl;

    let mut normal = v1.cross(v2);
    if normal.length_squared() == 0.0 {
        normal = v1.cross(v3);
    }
    if normal.length_squared() == 0.0 {
        normal = v2.cross(v3);
    }
    if normal.length_squared() == 0.0 {
        return None;
    }

    Some(Plane {
        normal: normal.normalize(),
        anchor: ptl,
    })
}

/// The result of scanning a rectangle's interior against a fitted plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualStats {
    /// Mean `|n . (p - p0)|` over all valid samples inside the rectangle.
    pub mean_residual: f32,
    /// True if any single valid sample's residual exceeds `max_residual_threshold`.
    pub any_exceeds_max: bool,
}

/// Scan every sample at pixel offsets `0 <= x <= rect.w()`, `0 <= y <= rect.h()`
/// relative to `rect`'s origin (inclusive of the far edge, with grid-edge
/// clamping), accumulating the plane residual over all valid samples.
#[must_use]
pub fn scan_residuals(
    grid: &PointGrid,
    rect: &Rect,
    plane: &Plane,
    max_residual_threshold: f32,
) -> ResidualStats {
    let mut any_exceeds_max = false;
    let mut sum = 0.0f32;
    let mut count = 0u32;

    for y in 0..=rect.h() as i32 {
        for x in 0..=rect.w() as i32 {
            let p = grid.at(rect.x() + x, rect.y() + y);
            if !is_valid(p) {
                continue;
            }
            let d = plane.signed_distance(p).abs();
            if d > max_residual_threshold {
                any_exceeds_max = true;
            }
            sum += d;
            count += 1;
        }
    }

    let mean_residual = if count > 0 { sum / count as f32 } else { 0.0 };
    ResidualStats {
        mean_residual,
        any_exceeds_max,
    }
}
