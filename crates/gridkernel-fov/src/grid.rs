//! Transparency (read-only) and visibility (write) grid views.
//!
//! Both support an explicit per-axis stride (in elements, not bytes), so a
//! caller can pass a non-contiguous slice of a larger host-owned buffer
//! without this crate needing to copy it first.

use gridkernel_core::{KernelError, KernelResult};

/// Read-only view over a byte grid where nonzero means transparent.
#[derive(Debug, Clone, Copy)]
pub struct TransparencyGrid<'a> {
    data: &'a [u8],
    width: i32,
    height: i32,
    stride_x: usize,
    stride_y: usize,
}

impl<'a> TransparencyGrid<'a> {
    /// Wrap a contiguous, row-major (x-major) transparency buffer.
    pub fn new(data: &'a [u8], width: i32, height: i32) -> KernelResult<Self> {
        Self::with_strides(data, width, height, height.max(0) as usize, 1)
    }

    /// Wrap a strided transparency buffer. `stride_x`/`stride_y` are element
    /// (not byte) strides.
    pub fn with_strides(
        data: &'a [u8],
        width: i32,
        height: i32,
        stride_x: usize,
        stride_y: usize,
    ) -> KernelResult<Self> {
        check_shape(data.len(), width, height, stride_x, stride_y)?;
        Ok(Self {
            data,
            width,
            height,
            stride_x,
            stride_y,
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

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        x as usize * self.stride_x + y as usize * self.stride_y
    }

    /// Whether light passes through `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.data[self.index(x, y)] != 0
    }
}

/// Writable view over a byte grid marking visibility (`1` visible, `0` not).
#[derive(Debug)]
pub struct VisibilityGrid<'a> {
    data: &'a mut [u8],
    width: i32,
    height: i32,
    stride_x: usize,
    stride_y: usize,
}

impl<'a> VisibilityGrid<'a> {
    /// Wrap a contiguous, row-major (x-major) visibility buffer.
    pub fn new(data: &'a mut [u8], width: i32, height: i32) -> KernelResult<Self> {
        Self::with_strides(data, width, height, height.max(0) as usize, 1)
    }

    /// Wrap a strided visibility buffer. `stride_x`/`stride_y` are element
    /// (not byte) strides.
    pub fn with_strides(
        data: &'a mut [u8],
        width: i32,
        height: i32,
        stride_x: usize,
        stride_y: usize,
    ) -> KernelResult<Self> {
        check_shape(data.len(), width, height, stride_x, stride_y)?;
        Ok(Self {
            data,
            width,
            height,
            stride_x,
            stride_y,
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
    fn index(&self, x: i32, y: i32) -> usize {
        x as usize * self.stride_x + y as usize * self.stride_y
    }

    /// Clear every addressed cell to not-visible.
    pub fn clear(&mut self) {
        for x in 0..self.width {
            for y in 0..self.height {
                let i = self.index(x, y);
                self.data[i] = 0;
            }
        }
    }

    /// Mark `(x, y)` visible. Panics if out of bounds.
    #[inline]
    pub fn set_visible(&mut self, x: i32, y: i32) {
        let i = self.index(x, y);
        self.data[i] = 1;
    }

    /// Whether `(x, y)` was marked visible. Panics if out of bounds.
    #[inline]
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.data[self.index(x, y)] != 0
    }
}

fn check_shape(
    len: usize,
    width: i32,
    height: i32,
    stride_x: usize,
    stride_y: usize,
) -> KernelResult<()> {
    if width <= 0 || height <= 0 {
        return Err(KernelError::BadShape(
            "grid dimensions must be positive".to_string(),
        ));
    }
    let required = (width as usize - 1) * stride_x + (height as usize - 1) * stride_y + 1;
    if len < required {
        return Err(KernelError::BadShape(format!(
            "buffer of {len} elements is too small for a {width}x{height} grid with strides ({stride_x}, {stride_y})"
        )));
    }
    Ok(())
}
