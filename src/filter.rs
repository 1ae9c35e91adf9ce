use crate::config::COVERAGE_LIMIT;
use crate::tile::{Leaf, LeafArena};

/// The ratio of a leaf's longest 3D corner-to-corner diagonal to its
/// pixel-rectangle diagonal, normalized by the full image diagonal.
///
/// Reproduces spec §4.D's formula exactly, including its unit
/// inconsistency (`longestDiag` is a 3D length; `rectDiag` is a
/// dimensionless fraction of the image diagonal) — spec §9 is explicit that
/// this is not to be "fixed" without a calibrated dataset.
#[must_use]
fn coverage(leaf: &Leaf, image_width: u32, image_height: u32) -> f32 {
    let mut longest_diag = 0.0f32;
    for i in 0..4 {
        for j in (i + 1)..4 {
            longest_diag = longest_diag.max(leaf.corners[i].distance(leaf.corners[j]));
        }
    }

    let full_diagonal = ((image_width * image_width + image_height * image_height) as f32).sqrt();
    let rect_diag = leaf.rect.diagonal() / full_diagonal;

    (longest_diag / rect_diag).abs()
}

/// Drop leaves whose 3D quadrilateral is geometrically implausible for
/// their pixel footprint (spec §4.D). A leaf survives iff
/// `coverage <= COVERAGE_LIMIT`.
///
/// Any leaf whose plane fit produced a `NaN` residual (e.g. from an
/// arithmetic anomaly upstream) is dropped here too: `longestDiag` becomes
/// `NaN`, and `NaN > COVERAGE_LIMIT` is false, so such a leaf would *survive*
/// a naive `<=` check — the comparison is therefore written so a `NaN`
/// coverage is rejected (spec §7's "any residual NaN causes the leaf to be
/// dropped at the filter stage").
pub fn retain_plausible_leaves(arena: &mut LeafArena, image_width: u32, image_height: u32) {
    arena.retain_remapping(|leaf| {
        let c = coverage(leaf, image_width, image_height);
        c.is_finite() && c <= COVERAGE_LIMIT
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::PlaneConstants;
    use crate::grid::PointGrid;
    use crate::point::Point;
    use crate::tile::split;
    use bevy_math::vec3;

    #[test]
    fn test_sparsity_rejection() {
        // Only the four corners of a 64x64 image are valid; the global
        // plane fit has near-zero residual (only four samples considered),
        // but the implied 3D quad is enormous relative to the rectangle.
        let w = 64u32;
        let h = 64u32;
        let mut samples = vec![Point::ZERO; (w * h) as usize];
        samples[0] = vec3(0.0, 0.0, 1.0);
        samples[(w - 1) as usize] = vec3((w - 1) as f32, 0.0, 1.0);
        samples[((h - 1) * w) as usize] = vec3(0.0, (h - 1) as f32, 50.0);
        samples[(w * h - 1) as usize] = vec3((w - 1) as f32, (h - 1) as f32, 50.0);
        let grid = PointGrid::new(w, h, samples).unwrap();

        let mut arena = split(&grid, &PlaneConstants::default());
        assert_eq!(arena.len(), 1);
        retain_plausible_leaves(&mut arena, w, h);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_well_formed_leaf_survives() {
        let w = 16u32;
        let h = 16u32;
        let samples: Vec<Point> = (0..h)
            .flat_map(|y| (0..w).map(move |x| vec3(x as f32, y as f32, 10.0)))
            .collect();
        let grid = PointGrid::new(w, h, samples).unwrap();
        let mut arena = split(&grid, &PlaneConstants::default());
        assert_eq!(arena.len(), 1);
        retain_plausible_leaves(&mut arena, w, h);
        assert_eq!(arena.len(), 1);
    }
}
