use crate::tile::{LeafArena, LeafId};
use rand::Rng;

/// Triangulate every leaf of every cluster and write interleaved vertex /
/// per-vertex-color output (spec §4.G), clamping to the caller-provided
/// buffer capacity rather than overflowing it (spec §7).
///
/// Each leaf contributes exactly six vertices, winding `(TL, TR, BL)` then
/// `(TR, BR, BL)`, all six carrying the same per-cluster color — so a
/// capacity check only ever needs to happen on a whole-leaf boundary,
/// keeping every emitted triangle well-formed even when the output is
/// truncated mid-cluster.
///
/// `rng` is caller-supplied so tests (and any host wanting deterministic
/// replay) can inject a seeded generator instead of relying on a process-wide
/// default (spec §9).
///
/// Returns the number of vertices written. `out_vertices` and `out_colors`
/// must have equal length; the smaller of the two is treated as capacity.
pub fn emit_all(
    arena: &mut LeafArena,
    clusters: &[Vec<LeafId>],
    rng: &mut impl Rng,
    out_vertices: &mut [crate::point::Point],
    out_colors: &mut [[f32; 3]],
) -> usize {
    let capacity = out_vertices.len().min(out_colors.len());
    let mut written = 0usize;

    'clusters: for cluster in clusters {
        let color = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()];
        for &id in cluster {
            if written + 6 > capacity {
                break 'clusters;
            }
            let leaf = arena.get_mut(id);
            leaf.cluster_color = Some(color);
            let [tl, tr, bl, br] = leaf.corners;
            for v in [tl, tr, bl, tr, br, bl] {
                out_vertices[written] = v;
                out_colors[written] = color;
                written += 1;
            }
        }
    }

    written
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::adjacency::build_adjacency;
    use crate::cluster::merge_clusters;
    use crate::config::PlaneConstants;
    use crate::grid::PointGrid;
    use crate::point::Point;
    use crate::tile::split;
    use bevy_math::vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_flat_plane_emits_six_vertices_one_color() {
        let samples: Vec<Point> = (0..16)
            .flat_map(|y| (0..16).map(move |x| vec3(x as f32, y as f32, 10.0)))
            .collect();
        let grid = PointGrid::new(16, 16, samples).unwrap();
        let constants = PlaneConstants::default();
        let mut arena = split(&grid, &constants);
        build_adjacency(&mut arena);
        let clusters = merge_clusters(&mut arena, &constants);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut vertices = vec![Point::ZERO; 64];
        let mut colors = vec![[0.0f32; 3]; 64];
        let count = emit_all(&mut arena, &clusters, &mut rng, &mut vertices, &mut colors);

        assert_eq!(count, 6);
        for c in &colors[..6] {
            assert_eq!(*c, colors[0]);
        }
    }

    #[test]
    fn test_two_offset_planes_emit_twelve_vertices_two_colors() {
        let samples: Vec<Point> = (0..8)
            .flat_map(|y| {
                (0..16).map(move |x| {
                    let z = if x < 8 { 10.0 } else { 12.0 };
                    vec3(x as f32, y as f32, z)
                })
            })
            .collect();
        let grid = PointGrid::new(16, 8, samples).unwrap();
        let constants = PlaneConstants::default();
        let mut arena = split(&grid, &constants);
        build_adjacency(&mut arena);
        let clusters = merge_clusters(&mut arena, &constants);
        assert_eq!(clusters.len(), 2);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut vertices = vec![Point::ZERO; 64];
        let mut colors = vec![[0.0f32; 3]; 64];
        let count = emit_all(&mut arena, &clusters, &mut rng, &mut vertices, &mut colors);

        assert_eq!(count, 12);
        assert_ne!(colors[0], colors[6]);
    }

    #[test]
    fn test_output_clamps_on_a_whole_leaf_boundary() {
        let samples: Vec<Point> = (0..8)
            .flat_map(|y| {
                (0..16).map(move |x| {
                    let z = if x < 8 { 10.0 } else { 12.0 };
                    vec3(x as f32, y as f32, z)
                })
            })
            .collect();
        let grid = PointGrid::new(16, 8, samples).unwrap();
        let constants = PlaneConstants::default();
        let mut arena = split(&grid, &constants);
        build_adjacency(&mut arena);
        let clusters = merge_clusters(&mut arena, &constants);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Room for one leaf's worth of vertices, not two.
        let mut vertices = vec![Point::ZERO; 6];
        let mut colors = vec![[0.0f32; 3]; 6];
        let count = emit_all(&mut arena, &clusters, &mut rng, &mut vertices, &mut colors);

        assert_eq!(count, 6);
    }
}
