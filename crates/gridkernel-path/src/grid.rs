//! A read-only view over the flat `int16` cost buffer.

use gridkernel_core::{KernelError, KernelResult};

/// Read-only view over a row-major, x-major `int16` cost buffer.
///
/// `cost[x, y]` lives at `x * height + y`. A value of `0` means the cell is
/// impassable; any positive value is the per-step weight of entering it.
/// Negative values are not defined by the contract and are passed through
/// unchecked.
#[derive(Debug, Clone, Copy)]
pub struct CostGrid<'a> {
    data: &'a [i16],
    width: i32,
    height: i32,
}

impl<'a> CostGrid<'a> {
    /// Wrap `data` as a `width x height` cost grid.
    ///
    /// Fails with [`KernelError::BadShape`] if the dimensions are not
    /// positive or `data`'s length does not equal `width * height`.
    pub fn new(data: &'a [i16], width: i32, height: i32) -> KernelResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(KernelError::BadShape(
                "grid dimensions must be positive".to_string(),
            ));
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(KernelError::BadShape(format!(
                "cost buffer has {} entries, expected {width}x{height}={expected}",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Cost of entering `(x, y)`. Panics if out of bounds — callers must
    /// check [`contains`](Self::contains) first, which every kernel call
    /// site here does.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> i16 {
        self.data[x as usize * self.height as usize + y as usize]
    }
}
