//! **gridkernel-path** — weighted A* pathfinding over a 2D cost grid.
//!
//! - Eight-directional movement: orthogonal moves cost `cost[neighbor] × 1`,
//!   diagonal moves cost `cost[neighbor] × √2`. Diagonals are unconditionally
//!   permitted — there is no corner-cutting check.
//! - The heuristic is octile distance, inflated by [`HEURISTIC_WEIGHT`] to
//!   cut down on node expansions in dense obstacle maps; the returned path is
//!   bounded-suboptimal by that same factor.
//! - The open set is a true decrease-key binary heap (see [`heap::OpenSet`]),
//!   not a lazily-invalidated one — see the crate-level design note in the
//!   project's `DESIGN.md` for why this differs from the WFC solver's heap.

mod grid;
mod heap;

use gridkernel_core::{KernelError, KernelResult, Point};

pub use grid::CostGrid;

use heap::OpenSet;

/// Mild heuristic inflation. Paths remain bounded-suboptimal by this factor;
/// do not change without updating the tests that pin exact path lengths.
pub const HEURISTIC_WEIGHT: f64 = 1.01;

const SQRT_2: f64 = std::f64::consts::SQRT_2;
const SQRT_2_MINUS_2: f64 = SQRT_2 - 2.0;

/// Eight neighbor offsets: the first four are orthogonal, the last four diagonal.
const DX: [i32; 8] = [-1, 1, 0, 0, -1, -1, 1, 1];
const DY: [i32; 8] = [0, 0, -1, 1, -1, 1, -1, 1];

#[inline]
fn octile_h(dx: i32, dy: i32) -> f64 {
    let mn = dx.min(dy) as f64;
    (dx + dy) as f64 + SQRT_2_MINUS_2 * mn
}

#[inline]
fn grid_index(x: i32, y: i32, height: i32) -> usize {
    x as usize * height as usize + y as usize
}

#[inline]
fn point_of(idx: usize, height: i32) -> (i32, i32) {
    let height = height as usize;
    ((idx / height) as i32, (idx % height) as i32)
}

/// Find the shortest path from `(sx, sy)` to `(gx, gy)` on `cost`.
///
/// Returns the path excluding the start cell and including the goal. Returns
/// an empty path if `start == goal`, if either endpoint is impassable
/// (cost `0`), or if no path exists. `cost` is read-only and is never
/// mutated.
pub fn astar(
    cost: &[i16],
    width: i32,
    height: i32,
    sx: i32,
    sy: i32,
    gx: i32,
    gy: i32,
) -> KernelResult<Vec<Point>> {
    let grid = CostGrid::new(cost, width, height)?;

    if !grid.contains(sx, sy) {
        return Err(KernelError::OutOfBounds {
            x: sx,
            y: sy,
            width,
            height,
        });
    }
    if !grid.contains(gx, gy) {
        return Err(KernelError::OutOfBounds {
            x: gx,
            y: gy,
            width,
            height,
        });
    }

    if sx == gx && sy == gy {
        return Ok(Vec::new());
    }
    if grid.get(sx, sy) == 0 || grid.get(gx, gy) == 0 {
        return Ok(Vec::new());
    }

    let size = width as usize * height as usize;
    let start_idx = grid_index(sx, sy, height);
    let goal_idx = grid_index(gx, gy, height);

    let mut g_score = vec![f64::INFINITY; size];
    let mut came_from = vec![-1i32; size];
    let mut closed = vec![false; size];
    let mut open = OpenSet::new(size);

    // Per-axis goal-distance tables, filled once so neighbor expansion does a
    // lookup instead of recomputing absolute differences.
    let mut goal_dx = vec![0i32; width as usize];
    let mut goal_dy = vec![0i32; height as usize];
    for (x, slot) in goal_dx.iter_mut().enumerate() {
        *slot = (x as i32 - gx).abs();
    }
    for (y, slot) in goal_dy.iter_mut().enumerate() {
        *slot = (y as i32 - gy).abs();
    }

    g_score[start_idx] = 0.0;
    let h0 = HEURISTIC_WEIGHT * octile_h(goal_dx[sx as usize], goal_dy[sy as usize]);
    open.push_or_decrease(start_idx, h0);

    let mut found = false;
    while let Some(current) = open.pop() {
        if current == goal_idx {
            found = true;
            break;
        }
        closed[current] = true;
        let cg = g_score[current];
        let (cx, cy) = point_of(current, height);

        for d in 0..8 {
            let nx = cx + DX[d];
            let ny = cy + DY[d];
            if !grid.contains(nx, ny) {
                continue;
            }
            let ni = grid_index(nx, ny, height);
            if closed[ni] {
                continue;
            }
            let nc = grid.get(nx, ny);
            if nc == 0 {
                continue;
            }
            let mult = if d < 4 { 1.0 } else { SQRT_2 };
            let tentative_g = cg + nc as f64 * mult;
            if tentative_g < g_score[ni] {
                g_score[ni] = tentative_g;
                came_from[ni] = current as i32;
                let h = HEURISTIC_WEIGHT * octile_h(goal_dx[nx as usize], goal_dy[ny as usize]);
                open.push_or_decrease(ni, tentative_g + h);
            }
        }
    }

    if !found {
        return Ok(Vec::new());
    }

    let mut path = Vec::new();
    let mut node = goal_idx as i32;
    while node as usize != start_idx {
        let (x, y) = point_of(node as usize, height);
        path.push(Point::new(x, y));
        node = came_from[node as usize];
    }
    path.reverse();
    Ok(path)
}
