use crate::adjacency::build_adjacency;
use crate::cluster::merge_clusters;
use crate::config::PlaneConstants;
use crate::filter::retain_plausible_leaves;
use crate::grid::PointGrid;
use crate::point::Point;
use crate::tile::{split, LeafArena, LeafId};
use rand::Rng;

/// The result of one [Segmenter::segment] call: the accepted leaves (after
/// filtering) and their grouping into coplanar clusters.
///
/// Borrows nothing from the input grid — a `Segmentation` outlives the
/// [PointGrid] it was built from (spec §3's lifecycle note: the grid is
/// borrowed only for the duration of the call).
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub arena: LeafArena,
    pub clusters: Vec<Vec<LeafId>>,
}

impl Segmentation {
    /// Triangulate every leaf of every cluster into the caller's output
    /// buffers, clamping to their capacity (spec §4.G, §7). See
    /// [crate::emit::emit_all].
    pub fn emit(
        &mut self,
        rng: &mut impl Rng,
        out_vertices: &mut [Point],
        out_colors: &mut [[f32; 3]],
    ) -> usize {
        crate::emit::emit_all(&mut self.arena, &self.clusters, rng, out_vertices, out_colors)
    }
}

/// The depth-image planar segmentation engine (spec §1-§4): ties the point
/// grid, plane fitter, tile splitter, leaf filter, adjacency builder and
/// cluster merger into a single batch call per depth frame. No state
/// persists between calls (spec §5) — a `Segmenter` is stateless and may be
/// shared across invocations, including concurrent ones on disjoint grids.
#[derive(Debug, Default)]
pub struct Segmenter;

impl Segmenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline — A (already embodied by `grid`) → C → D → E →
    /// F — over `grid`, using `constants` to tune the splitter and merger.
    #[tracing::instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
    pub fn segment(&self, grid: &PointGrid, constants: &PlaneConstants) -> Segmentation {
        let mut arena = split(grid, constants);
        retain_plausible_leaves(&mut arena, grid.width(), grid.height());
        build_adjacency(&mut arena);
        let clusters = merge_clusters(&mut arena, constants);
        tracing::debug!(
            leaf_count = arena.len(),
            cluster_count = clusters.len(),
            "segmentation complete"
        );
        Segmentation { arena, clusters }
    }
}
