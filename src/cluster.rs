use crate::config::PlaneConstants;
use crate::tile::{Leaf, LeafArena, LeafId};

/// Two neighbors are coplanar when their normals agree within tolerance and
/// `A`'s anchor lies on `B`'s side of `B`'s plane within tolerance (spec
/// §4.F). The comparison is one-sided by design — the reciprocal edge from
/// `B`'s perspective enforces the other direction when the flood fill visits
/// it from there.
///
/// `maxPlaneOffset` has no entry of its own in spec §4.X's constants table;
/// spec §8 scenario 2 works out `n · (p0_A − p0_B) = 2.0 > 0.05` against the
/// default `maxResidualThreshold`, so this reuses that constant rather than
/// inventing a fifth tunable (see DESIGN.md).
#[must_use]
fn are_coplanar(a: &Leaf, b: &Leaf, constants: &PlaneConstants) -> bool {
    a.plane.normal.dot(b.plane.normal).abs() >= constants.min_dot_product
        && a.plane.normal.dot(a.plane.anchor - b.plane.anchor) < constants.max_residual_threshold
}

/// Flood-fill the adjacency graph into maximal coplanar connected
/// components (spec §4.F). Each leaf's `visit_id` is stamped with its
/// 1-based cluster index as a side effect; the returned `Vec` groups leaf
/// ids by cluster in discovery order.
///
/// Uses an explicit work-list rather than recursion — spec §9 calls out that
/// the reference's recursive `FindConnected` is unbounded in the number of
/// leaves.
#[tracing::instrument(skip_all)]
pub fn merge_clusters(arena: &mut LeafArena, constants: &PlaneConstants) -> Vec<Vec<LeafId>> {
    let mut clusters: Vec<Vec<LeafId>> = Vec::new();
    let mut worklist: Vec<LeafId> = Vec::new();

    for start in arena.ids() {
        if arena.get(start).visit_id != 0 {
            continue;
        }

        let cluster_id = (clusters.len() + 1) as u32;
        let mut cluster = Vec::new();
        arena.get_mut(start).visit_id = cluster_id;
        worklist.push(start);

        while let Some(id) = worklist.pop() {
            cluster.push(id);
            let neighbors = arena.get(id).neighbors.clone();
            for (neighbor_id, _side) in neighbors {
                if arena.get(neighbor_id).visit_id != 0 {
                    continue;
                }
                if are_coplanar(arena.get(id), arena.get(neighbor_id), constants) {
                    arena.get_mut(neighbor_id).visit_id = cluster_id;
                    worklist.push(neighbor_id);
                }
            }
        }

        clusters.push(cluster);
    }

    tracing::debug!(leaf_count = arena.len(), cluster_count = clusters.len(), "clusters merged");
    clusters
}
