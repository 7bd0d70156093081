//! Wave Function Collapse constraint solver.
//!
//! Each cell holds a bitmask of up to 8 still-possible patterns. Solving
//! repeatedly picks the lowest-entropy uncollapsed cell, collapses it to one
//! pattern by weighted random choice, and propagates the resulting
//! constraint outward through a 4-direction adjacency table until the wave
//! either fully collapses or a contradiction (an empty mask) is reached.

mod heap;
mod rng;

use gridkernel_core::popcount::popcount;
use gridkernel_core::{KernelError, KernelResult};
use heap::EntropyHeap;
use rng::Xoshiro128PlusPlus;

const MAX_PATTERNS: usize = 8;
const DIR_DX: [i32; 4] = [0, 1, 0, -1];
const DIR_DY: [i32; 4] = [-1, 0, 1, 0];

/// A `(4, 256)` table of per-direction neighbor masks: `table.get(dir,
/// current_mask)` is the set of patterns a neighbor in `dir` may still hold
/// given that this cell's possibilities are `current_mask`.
#[derive(Debug, Clone, Copy)]
pub struct PropagationTable<'a> {
    data: &'a [u8],
}

impl<'a> PropagationTable<'a> {
    pub fn new(data: &'a [u8]) -> KernelResult<Self> {
        if data.len() != 4 * 256 {
            return Err(KernelError::BadShape(format!(
                "propagation table must have 4 * 256 = 1024 entries, got {}",
                data.len()
            )));
        }
        Ok(Self { data })
    }

    #[inline]
    fn get(&self, dir: usize, mask: u8) -> u8 {
        self.data[dir * 256 + mask as usize]
    }
}

/// Solve a wave function collapse instance in place.
///
/// `initial_wave` is a flat, x-major (`x * height + y`) buffer of
/// possibility bitmasks. Returns a flat buffer of the same shape holding the
/// collapsed pattern index (`0..num_patterns`) for each cell.
pub fn wfc_solve(
    width: i32,
    height: i32,
    num_patterns: u8,
    propagation_masks: &[u8],
    pattern_weights: &[f64],
    initial_wave: &[u8],
    seed: u64,
) -> KernelResult<Vec<u8>> {
    if width <= 0 || height <= 0 {
        return Err(KernelError::BadShape(
            "width and height must be positive".to_string(),
        ));
    }
    if num_patterns == 0 || num_patterns as usize > MAX_PATTERNS {
        return Err(KernelError::BadValue(format!(
            "num_patterns must be in range [1, 8], got {num_patterns}"
        )));
    }

    let table = PropagationTable::new(propagation_masks)?;

    if pattern_weights.len() != num_patterns as usize {
        return Err(KernelError::BadShape(format!(
            "pattern_weights must have num_patterns = {num_patterns} entries, got {}",
            pattern_weights.len()
        )));
    }

    let size = width as usize * height as usize;
    if initial_wave.len() != size {
        return Err(KernelError::BadShape(format!(
            "initial_wave must have width * height = {size} entries, got {}",
            initial_wave.len()
        )));
    }

    let all_patterns_mask: u8 = ((1u16 << num_patterns) - 1) as u8;
    if initial_wave.iter().any(|&m| m & !all_patterns_mask != 0) {
        return Err(KernelError::BadValue(
            "initial_wave contains bits outside num_patterns".to_string(),
        ));
    }

    let mut solver = Solver {
        width,
        height,
        size,
        num_patterns,
        table,
        weights: pattern_weights,
        wave: initial_wave.to_vec(),
        rng: Xoshiro128PlusPlus::seed_from_u64(seed),
        heap: EntropyHeap::new(),
        stack: Vec::new(),
        in_stack: vec![false; size],
    };

    solver.run()?;

    solver
        .wave
        .iter()
        .map(|&mask| {
            single_bit_index(mask, num_patterns).ok_or(KernelError::Contradiction)
        })
        .collect()
}

struct Solver<'a> {
    width: i32,
    height: i32,
    size: usize,
    num_patterns: u8,
    table: PropagationTable<'a>,
    weights: &'a [f64],
    wave: Vec<u8>,
    rng: Xoshiro128PlusPlus,
    heap: EntropyHeap,
    stack: Vec<usize>,
    in_stack: Vec<bool>,
}

impl<'a> Solver<'a> {
    #[inline]
    fn wave_index(&self, x: i32, y: i32) -> usize {
        x as usize * self.height as usize + y as usize
    }

    fn calculate_entropy(&mut self, idx: usize) -> f64 {
        let mask = self.wave[idx];
        let count = popcount(mask);
        if count <= 1 {
            return 0.0;
        }

        let mut total_weight = 0.0;
        for bit in 0..self.num_patterns {
            if mask & (1 << bit) != 0 {
                total_weight += self.weights[bit as usize];
            }
        }
        if total_weight == 0.0 {
            return 0.0;
        }

        let mut entropy = 0.0;
        for bit in 0..self.num_patterns {
            if mask & (1 << bit) != 0 {
                let weight = self.weights[bit as usize];
                if weight > 0.0 {
                    let p = weight / total_weight;
                    entropy -= p * p.ln();
                }
            }
        }

        // Deterministic tie-breaking noise; mirrors random ordering among
        // equal-entropy cells without needing a stable secondary key.
        entropy += self.rng.next_f64() * 0.001;
        entropy
    }

    fn push_entropy(&mut self, idx: usize) {
        let entropy = self.calculate_entropy(idx);
        self.heap.push(idx, entropy);
    }

    /// `Ok(Some(idx))`: next cell to collapse. `Ok(None)`: heap exhausted,
    /// nothing left to pick. `Err`: an empty mask was found (contradiction).
    fn find_min_entropy_cell(&mut self) -> KernelResult<Option<usize>> {
        while let Some((idx, stale_entropy, _)) = self.heap.pop() {
            let mask = self.wave[idx];
            let count = popcount(mask);
            if count == 0 {
                return Err(KernelError::Contradiction);
            }
            if count == 1 {
                continue;
            }

            let current_entropy = self.calculate_entropy(idx);
            if (current_entropy - stale_entropy).abs() > 0.01 {
                self.heap.push(idx, current_entropy);
                continue;
            }

            return Ok(Some(idx));
        }
        Ok(None)
    }

    fn weighted_choice(&mut self, mask: u8) -> Option<u8> {
        if mask == 0 {
            return None;
        }

        let mut bits = [0u8; MAX_PATTERNS];
        let mut weights = [0.0f64; MAX_PATTERNS];
        let mut count = 0usize;

        for bit in 0..self.num_patterns {
            if mask & (1 << bit) != 0 {
                bits[count] = bit;
                weights[count] = self.weights[bit as usize];
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }

        let total: f64 = weights[..count].iter().sum();

        if total == 0.0 {
            let mut pick = (self.rng.next_f64() * count as f64) as usize;
            if pick >= count {
                pick = count - 1;
            }
            return Some(bits[pick]);
        }

        let r = self.rng.next_f64() * total;
        let mut cumulative = 0.0;
        for i in 0..count {
            cumulative += weights[i];
            if r <= cumulative {
                return Some(bits[i]);
            }
        }
        Some(bits[count - 1])
    }

    /// Propagate the constraint at `start_idx` outward. `uncollapsed_cells`
    /// is decremented whenever propagation forces a neighbor down to a
    /// single possibility.
    fn propagate(&mut self, start_idx: usize, uncollapsed_cells: &mut usize) -> KernelResult<()> {
        self.stack.push(start_idx);
        self.in_stack[start_idx] = true;

        let max_iterations = self.size * 10;
        let mut iterations = 0usize;

        while let Some(idx) = self.stack.pop() {
            iterations += 1;
            if iterations >= max_iterations {
                return Err(KernelError::Contradiction);
            }

            self.in_stack[idx] = false;
            let x = idx as i32 / self.height;
            let y = idx as i32 % self.height;
            let current_mask = self.wave[idx];

            for dir in 0..4 {
                let nx = x + DIR_DX[dir];
                let ny = y + DIR_DY[dir];
                if nx < 0 || nx >= self.width || ny < 0 || ny >= self.height {
                    continue;
                }

                let nidx = self.wave_index(nx, ny);
                let neighbor_mask = self.wave[nidx];
                if popcount(neighbor_mask) <= 1 {
                    continue;
                }

                let valid_for_neighbor = self.table.get(dir, current_mask);
                let new_mask = neighbor_mask & valid_for_neighbor;

                if new_mask != neighbor_mask {
                    if new_mask == 0 {
                        return Err(KernelError::Contradiction);
                    }

                    self.wave[nidx] = new_mask;

                    if popcount(new_mask) > 1 {
                        self.push_entropy(nidx);
                    } else {
                        *uncollapsed_cells -= 1;
                    }

                    if !self.in_stack[nidx] {
                        self.stack.push(nidx);
                        self.in_stack[nidx] = true;
                    }
                }
            }
        }

        Ok(())
    }

    fn run(&mut self) -> KernelResult<()> {
        let mut uncollapsed_cells = 0usize;

        for idx in 0..self.size {
            let count = popcount(self.wave[idx]);
            if count == 0 {
                return Err(KernelError::Contradiction);
            }
            if count > 1 {
                self.push_entropy(idx);
                uncollapsed_cells += 1;
            }
        }

        let max_iterations = self.size * 2;
        let mut iterations = 0usize;

        while uncollapsed_cells > 0 {
            iterations += 1;
            if iterations >= max_iterations {
                break;
            }

            let cell_idx = match self.find_min_entropy_cell()? {
                Some(idx) => idx,
                None => break,
            };

            let mask = self.wave[cell_idx];
            let chosen_bit = self
                .weighted_choice(mask)
                .ok_or(KernelError::Contradiction)?;

            self.wave[cell_idx] = 1 << chosen_bit;
            uncollapsed_cells -= 1;

            self.propagate(cell_idx, &mut uncollapsed_cells)?;
        }

        if self.wave.iter().any(|&m| popcount(m) != 1) {
            return Err(KernelError::Contradiction);
        }

        Ok(())
    }
}

/// Index of the single set bit in a fully collapsed mask.
pub fn single_bit_index(mask: u8, num_patterns: u8) -> Option<u8> {
    (0..num_patterns).find(|&bit| mask & (1 << bit) != 0)
}
