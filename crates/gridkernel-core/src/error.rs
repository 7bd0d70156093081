//! The error taxonomy shared by all three kernels.

use thiserror::Error;

/// Errors surfaced at a kernel call boundary.
///
/// `Contradiction` is a first-class expected outcome for the WFC solver on
/// over-constrained inputs, not a programming error; the other variants
/// indicate a malformed call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelError {
    /// A coordinate fell outside the grid's bounds.
    #[error("({x}, {y}) is out of bounds for a {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    /// An input buffer's dimensions, rank, or dtype did not match its contract.
    #[error("bad shape: {0}")]
    BadShape(String),

    /// An input buffer's dimensions were valid but its contents were not
    /// (e.g. wave bits set outside `num_patterns`).
    #[error("bad value: {0}")]
    BadValue(String),

    /// Allocation of working memory failed.
    ///
    /// Rust's global allocator aborts the process on allocation failure
    /// rather than unwinding, so this variant is unreachable in practice;
    /// it is kept for parity with the host-facing error taxonomy.
    #[error("allocation failed")]
    OutOfMemory,

    /// WFC propagation emptied a cell's mask, or an iteration cap was hit
    /// before every cell collapsed.
    #[error("contradiction: no consistent assignment exists")]
    Contradiction,
}

pub type KernelResult<T> = Result<T, KernelError>;
