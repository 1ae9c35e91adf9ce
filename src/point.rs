use bevy_math::Vec3;

/// A 3D sample in sensor coordinates, as produced by a depth sensor for one
/// pixel. `Point` is a type alias over [Vec3] rather than a new wrapper type,
/// so that the plane fitter and the rest of the pipeline can use
/// [Vec3]'s `cross`/`dot`/`normalize`/`length` directly.
pub type Point = Vec3;

/// A point is valid iff none of its components is non-finite and none of
/// the three components is exactly zero.
///
/// This reproduces the reference implementation's `Pt::IsValid`
/// (`x != 0 && y != 0 && x != 0`) under the reading spec.md gives it: the
/// third conjunct is almost certainly a typo for `z != 0`, and this crate
/// follows that corrected reading rather than the original's literal bug.
#[inline]
#[must_use]
pub fn is_valid(p: Point) -> bool {
    p.is_finite() && p.x != 0.0 && p.y != 0.0 && p.z != 0.0
}
