use bevy_math::{vec3, Vec3};
use depthplanes::PointGrid;

/// A synthetic depth grid made of `tiles_per_side * tiles_per_side` flat
/// planes, each offset in depth from its neighbors, so the splitter settles
/// into a predictable tiling without reading a fixture image from disk.
pub fn create_checkerboard(width: u32, height: u32, tiles_per_side: u32) -> PointGrid {
    let tile_w = (width / tiles_per_side).max(1);
    let tile_h = (height / tiles_per_side).max(1);
    let samples: Vec<Vec3> = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let tx = (x / tile_w) as f32;
                let ty = (y / tile_h) as f32;
                let z = 10.0 + tx + ty;
                vec3(x as f32, y as f32, z)
            })
        })
        .collect();
    PointGrid::new(width, height, samples).unwrap()
}
