//! depthplanes
//! ===========
//!
//! Recursive quad-tree planar segmentation of depth-sensor point grids: bisect
//! a grid of 3D samples into axis-aligned tiles, fit a plane through each tile
//! that meets a residual tolerance, link adjacent tiles into a neighbor graph,
//! and flood-fill coplanar neighbors into clusters for triangulated emission.
//!
//! The segmentation pipeline ([segmenter]) is the library's safe Rust API;
//! [ffi] exposes the same pipeline as a flat C-style surface for embedding in
//! a host that produces raw depth buffers.

mod adjacency;
mod cluster;
mod config;
mod edges;
mod emit;
mod ffi;
mod filter;
mod grid;
mod normals;
mod plane;
mod point;
mod rect;
mod segmenter;
mod side;
mod tile;

pub use self::{
    adjacency::build_adjacency,
    cluster::merge_clusters,
    config::{global_constants, set_global_constants, PlaneConstants, COVERAGE_LIMIT},
    edges::find_edges,
    emit::emit_all,
    filter::retain_plausible_leaves,
    grid::{GridError, PointGrid},
    normals::{find_normals, NormalRenderMode, SIMILARITY_THRESHOLD},
    plane::{fit_plane, Plane},
    point::{is_valid, Point},
    rect::Rect,
    segmenter::{Segmentation, Segmenter},
    side::Side,
    tile::{split, Leaf, LeafArena, LeafId},
};

pub use ffi::{DepthFindEdges, DepthFindNormals, DepthMakePlanes, SetPlaneConstants};
