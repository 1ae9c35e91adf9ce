//! Flat C-style function surface (spec §6), 1:1 translated from the
//! reference implementation's `extern "C"` signatures. Unlike the rest of
//! this crate, this module trades `Result` for pointer/length conventions —
//! spec §7 treats invalid arguments at this boundary as a programmer error,
//! not something to recover from.

use crate::config::{global_constants, set_global_constants, PlaneConstants};
use crate::grid::PointGrid;
use crate::point::Point;
use crate::segmenter::Segmenter;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::slice;

/// # Safety
///
/// `vals` must point to `depth_width * depth_height` valid `[f32; 3]`
/// triples; `out_vertices` and `out_tex_coords` must each point to
/// `max_count` valid `[f32; 3]` triples; `out_count` must point to one
/// valid `i32`. All pointers must be non-null and properly aligned. The
/// caller owns every buffer for the duration of the call and must not
/// mutate them concurrently (spec §5).
#[no_mangle]
pub unsafe extern "C" fn DepthMakePlanes(
    vals: *const f32,
    out_vertices: *mut f32,
    out_tex_coords: *mut f32,
    max_count: i32,
    out_count: *mut i32,
    depth_width: i32,
    depth_height: i32,
) {
    if vals.is_null()
        || out_vertices.is_null()
        || out_tex_coords.is_null()
        || out_count.is_null()
        || depth_width <= 0
        || depth_height <= 0
        || max_count < 0
    {
        return;
    }

    let w = depth_width as u32;
    let h = depth_height as u32;
    let sample_count = (w as usize) * (h as usize);
    let samples: Vec<Point> = slice::from_raw_parts(vals as *const [f32; 3], sample_count)
        .iter()
        .map(|&[x, y, z]| Point::new(x, y, z))
        .collect();

    let grid = match PointGrid::new(w, h, samples) {
        Ok(grid) => grid,
        Err(_) => {
            *out_count = 0;
            return;
        }
    };

    let constants = global_constants();
    let segmenter = Segmenter::new();
    let mut segmentation = segmenter.segment(&grid, &constants);

    let capacity = max_count as usize;
    let vertices = slice::from_raw_parts_mut(out_vertices as *mut Point, capacity);
    let mut colors = vec![[0.0f32; 3]; capacity];
    let mut rng = ChaCha8Rng::from_entropy();
    let written = segmentation.emit(&mut rng, vertices, &mut colors);

    let tex_coords = slice::from_raw_parts_mut(out_tex_coords as *mut [f32; 3], capacity);
    tex_coords[..written].copy_from_slice(&colors[..written]);

    *out_count = written as i32;
}

/// # Safety
///
/// No pointer arguments; safe to call from any thread, though its effect is
/// process-wide (spec §6).
#[no_mangle]
pub extern "C" fn SetPlaneConstants(min_dist: f32, split_threshold: f32, min_dp_val: f32) {
    set_global_constants(PlaneConstants {
        max_residual_threshold: min_dist,
        split_threshold,
        min_dot_product: min_dp_val,
    });
}

/// # Safety
///
/// `dbuf` must point to `w * h` valid `u16`s; `outpts` must point to `w * h`
/// valid `[f32; 3]` triples.
#[no_mangle]
pub unsafe extern "C" fn DepthFindEdges(dbuf: *const u16, outpts: *mut f32, w: i32, h: i32) {
    if dbuf.is_null() || outpts.is_null() || w <= 0 || h <= 0 {
        return;
    }
    let count = (w as usize) * (h as usize);
    let input = slice::from_raw_parts(dbuf, count);
    let result = crate::edges::find_edges(input, w as u32, h as u32);
    let output = slice::from_raw_parts_mut(outpts as *mut [f32; 3], count);
    output.copy_from_slice(&result);
}

/// # Safety
///
/// `vals` and `outpts` must each point to `w * h` valid `[f32; 3]` triples.
#[no_mangle]
pub unsafe extern "C" fn DepthFindNormals(
    vals: *const f32,
    outpts: *mut f32,
    px: i32,
    py: i32,
    w: i32,
    h: i32,
) {
    if vals.is_null() || outpts.is_null() || w <= 0 || h <= 0 {
        return;
    }
    let count = (w as usize) * (h as usize);
    let input: Vec<Point> = slice::from_raw_parts(vals as *const [f32; 3], count)
        .iter()
        .map(|&[x, y, z]| Point::new(x, y, z))
        .collect();

    let mode = if px >= 0 && py >= 0 {
        Some(crate::normals::NormalRenderMode::Highlight { pick_x: px as u32, pick_y: py as u32 })
    } else {
        None
    };
    let result = crate::normals::find_normals(&input, w as u32, h as u32, mode);
    let output = slice::from_raw_parts_mut(outpts as *mut [f32; 3], count);
    output.copy_from_slice(&result);
}
