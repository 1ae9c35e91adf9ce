use crate::point::Point;
use bevy_math::vec3;

/// Similarity cutoff used by [NormalRenderMode::Similarity] (desktop
/// variant's `threshhold`).
pub const SIMILARITY_THRESHOLD: f32 = 0.75;

/// The two rendering modes the reference's two platform variants implement
/// for a picked pixel (SPEC_FULL §4). `None` passed to [find_normals] is
/// their shared `px < 0` branch: render the whole field, remapped into
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalRenderMode {
    /// iPhone variant: paint every pixel a neutral gray, then stamp a
    /// single white pixel at the picked coordinate.
    Highlight { pick_x: u32, pick_y: u32 },
    /// Desktop variant: render only pixels whose normal is within
    /// [SIMILARITY_THRESHOLD] of the picked pixel's normal, remapped into
    /// `[0, 1]`; everything else renders black.
    Similarity { pick_x: u32, pick_y: u32 },
}

/// Computes a per-pixel surface normal field from a point grid's raw
/// samples via 4-neighbor central differences, then renders it according to
/// `mode` (spec §6; SPEC_FULL §4).
///
/// `vals.len()` must equal `width * height`. The outermost ring of pixels —
/// where a full 4-neighbor stencil isn't available — is never assigned a
/// normal and renders as `[0.0, 0.0, 0.0]`, matching the reference.
///
/// The normal field is computed once per call into a local scratch buffer,
/// not a process-wide static (spec §9) — a second call with different
/// dimensions cannot observe stale data from a previous one.
#[must_use]
pub fn find_normals(
    vals: &[Point],
    width: u32,
    height: u32,
    mode: Option<NormalRenderMode>,
) -> Vec<[f32; 3]> {
    let field = compute_normal_field(vals, width, height);
    match mode {
        None => render_whole_field(&field),
        Some(NormalRenderMode::Highlight { pick_x, pick_y }) => {
            render_highlight(&field, width, height, pick_x, pick_y)
        }
        Some(NormalRenderMode::Similarity { pick_x, pick_y }) => {
            render_similarity(&field, width, height, pick_x, pick_y)
        }
    }
}

fn compute_normal_field(vals: &[Point], width: u32, height: u32) -> Vec<Point> {
    let w = width as usize;
    let h = height as usize;
    assert_eq!(vals.len(), w * h, "vals length must equal width * height");

    let mut field = vec![Point::ZERO; w * h];
    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let right = vals[y * w + x + 1];
            let left = vals[y * w + x - 1];
            let up = vals[(y - 1) * w + x];
            let down = vals[(y + 1) * w + x];
            if crate::point::is_valid(right)
                && crate::point::is_valid(left)
                && crate::point::is_valid(up)
                && crate::point::is_valid(down)
            {
                let dx = right - left;
                let dy = up - down;
                field[y * w + x] = dx.cross(dy).normalize_or_zero();
            }
        }
    }
    field
}

#[inline]
fn remap(n: Point) -> [f32; 3] {
    [(n.x + 1.0) * 0.5, (n.y + 1.0) * 0.5, (n.z + 1.0) * 0.5]
}

fn render_whole_field(field: &[Point]) -> Vec<[f32; 3]> {
    field.iter().map(|&n| remap(n)).collect()
}

fn render_highlight(field: &[Point], width: u32, height: u32, pick_x: u32, pick_y: u32) -> Vec<[f32; 3]> {
    let mut out = vec![[0.4f32, 0.4, 0.4]; field.len()];
    let w = width as usize;
    let h = height as usize;
    if (pick_x as usize) < w && (pick_y as usize) < h {
        out[pick_y as usize * w + pick_x as usize] = [1.0, 1.0, 1.0];
    }
    out
}

fn render_similarity(field: &[Point], width: u32, height: u32, pick_x: u32, pick_y: u32) -> Vec<[f32; 3]> {
    let w = width as usize;
    let h = height as usize;
    let picked = if (pick_x as usize) < w && (pick_y as usize) < h {
        field[pick_y as usize * w + pick_x as usize]
    } else {
        Point::ZERO
    };
    field
        .iter()
        .map(|&n| {
            if (picked - n).length() < SIMILARITY_THRESHOLD {
                remap(n)
            } else {
                [0.0, 0.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn flat_grid(w: u32, h: u32) -> Vec<Point> {
        (0..h).flat_map(|y| (0..w).map(move |x| vec3(x as f32, y as f32, 10.0))).collect()
    }

    #[test]
    fn test_flat_plane_normal_points_along_z() {
        let vals = flat_grid(8, 8);
        let field = compute_normal_field(&vals, 8, 8);
        let idx = 4 * 8 + 4;
        assert!((field[idx].z.abs() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_border_ring_has_no_normal() {
        let vals = flat_grid(8, 8);
        let field = compute_normal_field(&vals, 8, 8);
        assert_eq!(field[0], Point::ZERO);
        assert_eq!(field[7], Point::ZERO);
    }

    #[test]
    fn test_whole_field_render_remaps_into_unit_range() {
        let vals = flat_grid(8, 8);
        let out = find_normals(&vals, 8, 8, None);
        let idx = 4 * 8 + 4;
        for c in out[idx] {
            assert!((0.0..=1.0).contains(&c));
        }
    }

    #[test]
    fn test_highlight_mode_paints_gray_with_one_white_pixel() {
        let vals = flat_grid(8, 8);
        let out = find_normals(&vals, 8, 8, Some(NormalRenderMode::Highlight { pick_x: 3, pick_y: 3 }));
        assert_eq!(out[3 * 8 + 3], [1.0, 1.0, 1.0]);
        assert_eq!(out[0], [0.4, 0.4, 0.4]);
    }

    #[test]
    fn test_similarity_mode_accepts_flat_plane_everywhere() {
        let vals = flat_grid(8, 8);
        let out = find_normals(&vals, 8, 8, Some(NormalRenderMode::Similarity { pick_x: 4, pick_y: 4 }));
        // Every interior pixel shares the same normal as the picked one, so
        // none of them fall outside the similarity threshold.
        let idx = 2 * 8 + 2;
        assert_ne!(out[idx], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_similarity_mode_rejects_dissimilar_normals() {
        let mut vals = flat_grid(8, 8);
        // Tilt the right half sharply so its normal diverges from the
        // picked pixel's.
        for y in 0..8u32 {
            for x in 4..8u32 {
                vals[(y * 8 + x) as usize] = vec3(x as f32, y as f32, x as f32 * 3.0);
            }
        }
        let out = find_normals(&vals, 8, 8, Some(NormalRenderMode::Similarity { pick_x: 1, pick_y: 4 }));
        let idx = 4 * 8 + 6;
        assert_eq!(out[idx], [0.0, 0.0, 0.0]);
    }
}
