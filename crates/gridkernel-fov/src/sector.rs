//! Iterative recursive-shadowcasting sector scan.
//!
//! A sector is a wedge of a quadrant bounded by two rational slopes
//! (`s_num/s_den`, `e_num/e_den`). Rather than recurse, child sectors are
//! pushed onto an explicit stack, matching the original implementation this
//! is ported from.

use crate::divmod::{div_ceil, div_floor};
use crate::grid::{TransparencyGrid, VisibilityGrid};

#[derive(Debug, Clone, Copy)]
struct Sector {
    depth: i32,
    s_num: i32,
    s_den: i32,
    e_num: i32,
    e_den: i32,
}

impl Sector {
    /// Inclusive `[min_col, max_col]` range of columns this sector's slopes
    /// bound at its current depth.
    fn col_range(&self) -> (i32, i32) {
        let min_col = div_floor(2 * self.depth * self.s_num + self.s_den, 2 * self.s_den);
        let max_col = div_ceil(2 * self.depth * self.e_num - self.e_den, 2 * self.e_den);
        (min_col, max_col)
    }
}

#[inline]
fn in_bounds(x: i32, y: i32, width: i32, height: i32) -> bool {
    x >= 0 && x < width && y >= 0 && y < height
}

/// Scan one quadrant, transformed by `(cx, dx, cy, dy)`, out to `radius`
/// tiles from `(ox, oy)`, marking reachable tiles visible in `visible`.
pub fn scan_quadrant(
    cx: i32,
    dx: i32,
    cy: i32,
    dy: i32,
    ox: i32,
    oy: i32,
    radius: i32,
    transparent: &TransparencyGrid,
    visible: &mut VisibilityGrid,
) {
    let width = transparent.width();
    let height = transparent.height();

    let mut stack = vec![Sector {
        depth: 1,
        s_num: -1,
        s_den: 1,
        e_num: 1,
        e_den: 1,
    }];

    while let Some(sector) = stack.pop() {
        let Sector {
            depth,
            s_num,
            s_den,
            e_num,
            e_den,
        } = sector;

        if depth > radius {
            continue;
        }

        let (min_col, max_col) = sector.col_range();
        let mut prev_was_wall: Option<bool> = None;
        let mut cur_s_num = s_num;
        let mut cur_s_den = s_den;

        for col in min_col..=max_col {
            let wx = ox + col * cx + depth * dx;
            let wy = oy + col * cy + depth * dy;

            let tile_in_bounds = in_bounds(wx, wy, width, height);
            let is_wall = if tile_in_bounds {
                !transparent.is_transparent(wx, wy)
            } else {
                true
            };
            let is_floor = !is_wall;

            if tile_in_bounds
                && (is_wall || (col * s_den >= depth * s_num && col * e_den <= depth * e_num))
            {
                visible.set_visible(wx, wy);
            }

            if let Some(prev_wall) = prev_was_wall {
                if prev_wall && is_floor {
                    cur_s_num = 2 * col - 1;
                    cur_s_den = 2 * depth;
                } else if !prev_wall && is_wall {
                    stack.push(Sector {
                        depth: depth + 1,
                        s_num: cur_s_num,
                        s_den: cur_s_den,
                        e_num: 2 * col - 1,
                        e_den: 2 * depth,
                    });
                }
            }

            prev_was_wall = Some(is_wall);
        }

        if prev_was_wall == Some(false) {
            stack.push(Sector {
                depth: depth + 1,
                s_num: cur_s_num,
                s_den: cur_s_den,
                e_num,
                e_den,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_range_of_the_initial_sector() {
        let s = Sector {
            depth: 1,
            s_num: -1,
            s_den: 1,
            e_num: 1,
            e_den: 1,
        };
        assert_eq!(s.col_range(), (-1, 1));
    }

    #[test]
    fn col_range_narrows_with_depth() {
        let s = Sector {
            depth: 4,
            s_num: -1,
            s_den: 1,
            e_num: 1,
            e_den: 1,
        };
        assert_eq!(s.col_range(), (-4, 4));
    }
}
