//! Symmetric shadowcasting field-of-view.
//!
//! Computes which tiles are visible from an origin out to a given radius,
//! over a grid of opaque/transparent tiles. Visibility is symmetric: if `a`
//! can see `b`, `b` can see `a` over the same transparency grid.

mod divmod;
mod grid;
mod sector;

pub use grid::{TransparencyGrid, VisibilityGrid};

use gridkernel_core::{KernelError, KernelResult};
use sector::scan_quadrant;

/// North, east, south, west quadrant transforms: `(cx, dx, cy, dy)`.
const QUADRANT_TRANSFORMS: [(i32, i32, i32, i32); 4] = [
    (1, 0, 0, -1),
    (0, 1, 1, 0),
    (1, 0, 0, 1),
    (0, -1, 1, 0),
];

/// Compute visibility from `(ox, oy)` out to `radius` tiles over a
/// contiguous, row-major (x-major) transparency buffer, writing the result
/// into a same-shaped contiguous visibility buffer.
pub fn fov(
    transparent: &[u8],
    visible: &mut [u8],
    width: i32,
    height: i32,
    ox: i32,
    oy: i32,
    radius: i32,
) -> KernelResult<()> {
    let transparent = TransparencyGrid::new(transparent, width, height)?;
    let mut visible = VisibilityGrid::new(visible, width, height)?;
    fov_with_grids(&transparent, &mut visible, ox, oy, radius)
}

/// Compute visibility using caller-provided (possibly strided) grid views.
pub fn fov_with_grids(
    transparent: &TransparencyGrid,
    visible: &mut VisibilityGrid,
    ox: i32,
    oy: i32,
    radius: i32,
) -> KernelResult<()> {
    if transparent.width() != visible.width() || transparent.height() != visible.height() {
        return Err(KernelError::BadShape(format!(
            "transparent grid is {}x{} but visible grid is {}x{}",
            transparent.width(),
            transparent.height(),
            visible.width(),
            visible.height()
        )));
    }
    visible.clear();

    if transparent.contains(ox, oy) {
        visible.set_visible(ox, oy);
    }

    for (cx, dx, cy, dy) in QUADRANT_TRANSFORMS {
        scan_quadrant(cx, dx, cy, dy, ox, oy, radius, transparent, visible);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field(width: i32, height: i32) -> Vec<u8> {
        vec![1u8; (width * height) as usize]
    }

    #[test]
    fn open_field_reveals_everything_within_radius() {
        let width = 11;
        let height = 11;
        let transparent = open_field(width, height);
        let mut visible = vec![0u8; (width * height) as usize];

        fov(&transparent, &mut visible, width, height, 5, 5, 5).unwrap();

        // The origin and its four orthogonal neighbors at distance 1 must be
        // visible in an open field.
        let idx = |x: i32, y: i32| (x * height + y) as usize;
        assert_eq!(visible[idx(5, 5)], 1);
        assert_eq!(visible[idx(6, 5)], 1);
        assert_eq!(visible[idx(4, 5)], 1);
        assert_eq!(visible[idx(5, 6)], 1);
        assert_eq!(visible[idx(5, 4)], 1);

        // Tiles beyond the radius are not.
        assert_eq!(visible[idx(0, 5)], 0);
    }

    #[test]
    fn wall_blocks_tiles_directly_behind_it() {
        let width = 7;
        let height = 7;
        let mut transparent = open_field(width, height);
        let idx = |x: i32, y: i32| (x * height + y) as usize;

        // A wall two tiles east of the origin, same row.
        transparent[idx(4, 3)] = 0;

        let mut visible = vec![0u8; (width * height) as usize];
        fov(&transparent, &mut visible, width, height, 2, 3, 6).unwrap();

        assert_eq!(visible[idx(4, 3)], 1); // the wall itself is visible
        assert_eq!(visible[idx(5, 3)], 0); // directly behind it is not
        assert_eq!(visible[idx(6, 3)], 0);
    }

    #[test]
    fn visibility_is_symmetric() {
        let width = 9;
        let height = 9;
        let mut transparent = open_field(width, height);
        let idx = |x: i32, y: i32| (x * height + y) as usize;
        transparent[idx(3, 5)] = 0;
        transparent[idx(6, 2)] = 0;

        let (ax, ay) = (1, 1);
        let (bx, by) = (7, 7);

        let mut visible_from_a = vec![0u8; (width * height) as usize];
        fov(&transparent, &mut visible_from_a, width, height, ax, ay, 20).unwrap();

        let mut visible_from_b = vec![0u8; (width * height) as usize];
        fov(&transparent, &mut visible_from_b, width, height, bx, by, 20).unwrap();

        assert_eq!(visible_from_a[idx(bx, by)], visible_from_b[idx(ax, ay)]);
    }

    #[test]
    fn origin_out_of_bounds_still_scans_but_marks_nothing_at_origin() {
        let width = 5;
        let height = 5;
        let transparent = open_field(width, height);
        let mut visible = vec![0u8; (width * height) as usize];
        fov(&transparent, &mut visible, width, height, -1, -1, 3).unwrap();
        assert!(visible.iter().any(|&v| v == 1));
    }

    #[test]
    fn mismatched_shapes_are_an_error() {
        let transparent_buf = open_field(3, 3);
        let transparent = TransparencyGrid::new(&transparent_buf, 3, 3).unwrap();
        let mut visible_buf = vec![0u8; 16];
        let mut visible = VisibilityGrid::new(&mut visible_buf, 4, 4).unwrap();
        assert!(matches!(
            fov_with_grids(&transparent, &mut visible, 0, 0, 2),
            Err(KernelError::BadShape(_))
        ));
    }

    #[test]
    fn negative_radius_reveals_only_the_origin() {
        // A negative radius drops every sector at depth 1 before it scans a
        // single column, so the call succeeds and just leaves the origin lit.
        let width = 3;
        let height = 3;
        let transparent = open_field(width, height);
        let mut visible = vec![0u8; (width * height) as usize];
        fov(&transparent, &mut visible, width, height, 1, 1, -1).unwrap();
        let idx = |x: i32, y: i32| (x * height + y) as usize;
        assert_eq!(visible[idx(1, 1)], 1);
        assert_eq!(visible.iter().filter(|&&v| v == 1).count(), 1);
    }
}
