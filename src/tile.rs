use crate::config::PlaneConstants;
use crate::grid::PointGrid;
use crate::plane::{fit_plane, scan_residuals, Plane};
use crate::point::{is_valid, Point};
use crate::rect::Rect;
use crate::side::Side;

/// A stable, non-owning reference to a [Leaf] inside a [LeafArena].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafId(pub(crate) usize);

/// An accepted terminal rectangle of the quad-tree decomposition (spec §3,
/// "Leaf" a.k.a. "Result").
#[derive(Debug, Clone)]
pub struct Leaf {
    pub rect: Rect,
    pub plane: Plane,
    /// The four corner samples, in order (top-left, top-right, bottom-left, bottom-right).
    pub corners: [Point; 4],
    pub mean_residual: f32,
    /// `(other leaf, side)` pairs, where `side` is the side of THIS leaf
    /// along which the other leaf sits. Populated by [crate::adjacency].
    pub neighbors: Vec<(LeafId, Side)>,
    /// Flood-fill marker, mutated by [crate::cluster]. Zero until visited.
    pub visit_id: u32,
    /// Assigned during emission ([crate::emit]).
    pub cluster_color: Option<[f32; 3]>,
}

/// The engine owns all leaves; [LeafId] back-edges into this collection are
/// non-owning (spec §3's lifecycle note).
#[derive(Debug, Clone, Default)]
pub struct LeafArena {
    leaves: Vec<Leaf>,
}

impl LeafArena {
    #[must_use]
    pub fn new() -> Self {
        Self { leaves: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: LeafId) -> &Leaf {
        &self.leaves[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: LeafId) -> &mut Leaf {
        &mut self.leaves[id.0]
    }

    #[inline]
    pub(crate) fn push(&mut self, leaf: Leaf) -> LeafId {
        let id = LeafId(self.leaves.len());
        self.leaves.push(leaf);
        id
    }

    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = LeafId> + '_ {
        (0..self.leaves.len()).map(LeafId)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (LeafId, &Leaf)> {
        self.leaves.iter().enumerate().map(|(i, l)| (LeafId(i), l))
    }

    /// Remove all leaves for which `keep` returns false, renumbering the
    /// remaining leaves' [LeafId]s and remapping any neighbor references
    /// that survive. Used by [crate::filter].
    pub(crate) fn retain_remapping(&mut self, keep: impl Fn(&Leaf) -> bool) {
        let mut remap = vec![None; self.leaves.len()];
        let mut kept = Vec::with_capacity(self.leaves.len());
        for (old_idx, leaf) in self.leaves.drain(..).enumerate() {
            if keep(&leaf) {
                remap[old_idx] = Some(LeafId(kept.len()));
                kept.push(leaf);
            }
        }
        for leaf in &mut kept {
            leaf.neighbors
                .retain(|(id, _)| remap[id.0].is_some());
            for (id, _) in &mut leaf.neighbors {
                *id = remap[id.0].unwrap();
            }
        }
        self.leaves = kept;
    }
}

/// Recursively decompose `grid` into coplanar leaf rectangles (spec §4.C).
/// The tree itself is not retained — only the flat [LeafArena] of accepted
/// leaves.
#[tracing::instrument(skip(grid), fields(width = grid.width(), height = grid.height()))]
pub fn split(grid: &PointGrid, constants: &PlaneConstants) -> LeafArena {
    let mut arena = LeafArena::new();
    let root = Rect::new(0, 0, grid.width(), grid.height());
    split_rect(grid, root, constants, &mut arena);
    arena
}

fn split_rect(grid: &PointGrid, rect: Rect, constants: &PlaneConstants, arena: &mut LeafArena) {
    let corners = match find_corners(grid, &rect) {
        Some(c) => c,
        None => {
            tracing::trace!(?rect, "abandoning rect: fewer than four valid corners");
            return;
        }
    };
    let [ptl, ptr, pbl, pbr] = corners;

    let plane = match fit_plane(ptl, ptr, pbl, pbr) {
        Some(p) => p,
        None => {
            tracing::trace!(?rect, "abandoning rect: degenerate plane fit");
            return;
        }
    };

    let stats = scan_residuals(grid, &rect, &plane, constants.max_residual_threshold);
    let wants_split = stats.any_exceeds_max || stats.mean_residual > constants.split_threshold;

    // A 1x1 rectangle cannot be bisected further; its four corner samples
    // coincide, so its residual is always zero and `wants_split` is already
    // false in practice, but the dimension guard keeps this explicit.
    if wants_split && (rect.w() > 1 || rect.h() > 1) {
        tracing::trace!(?rect, mean_residual = stats.mean_residual, "splitting");
        let (a, b) = rect.split();
        split_rect(grid, a, constants, arena);
        split_rect(grid, b, constants, arena);
    } else {
        arena.push(Leaf {
            rect,
            plane,
            corners,
            mean_residual: stats.mean_residual,
            neighbors: Vec::new(),
            visit_id: 0,
            cluster_color: None,
        });
    }
}

/// Scan inward from each of the four corners of `rect`, in row-major order
/// from that corner, returning the first valid sample encountered at each.
/// The scan covers `0 <= x <= rect.w()`, `0 <= y <= rect.h()` (inclusive of
/// the far edge, with grid-edge clamping), so a boundary leaf can pick up
/// samples on its shared edge.
fn find_corners(grid: &PointGrid, rect: &Rect) -> Option<[Point; 4]> {
    let w = rect.w() as i32;
    let h = rect.h() as i32;

    let ptl = scan_first_valid(grid, rect, 0..=h, 0..=w, false, false)?;
    let ptr = scan_first_valid(grid, rect, 0..=h, 0..=w, true, false)?;
    let pbl = scan_first_valid(grid, rect, 0..=h, 0..=w, false, true)?;
    let pbr = scan_first_valid(grid, rect, 0..=h, 0..=w, true, true)?;

    Some([ptl, ptr, pbl, pbr])
}

/// Shared scan helper for the four corner searches. `reverse_x`/`reverse_y`
/// select which corner this scan originates from.
fn scan_first_valid(
    grid: &PointGrid,
    rect: &Rect,
    y_range: std::ops::RangeInclusive<i32>,
    x_range: std::ops::RangeInclusive<i32>,
    reverse_x: bool,
    reverse_y: bool,
) -> Option<Point> {
    let ys: Box<dyn Iterator<Item = i32>> = if reverse_y {
        Box::new(y_range.rev())
    } else {
        Box::new(y_range)
    };

    for y in ys {
        let xs: Box<dyn Iterator<Item = i32>> = if reverse_x {
            Box::new(x_range.clone().rev())
        } else {
            Box::new(x_range.clone())
        };
        for x in xs {
            let p = grid.at(rect.x() + x, rect.y() + y);
            if is_valid(p) {
                return Some(p);
            }
        }
    }
    None
}
