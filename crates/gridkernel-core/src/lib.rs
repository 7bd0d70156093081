//! **gridkernel-core** — shared primitives for the grid-kernel crates.
//!
//! Provides the geometry type returned by the pathfinder ([`Point`]), the
//! error taxonomy surfaced by all three kernels ([`KernelError`]), and the
//! process-wide popcount table used by the WFC solver ([`popcount`]).

pub mod error;
pub mod geom;
pub mod popcount;

pub use error::{KernelError, KernelResult};
pub use geom::Point;
pub use popcount::{popcount, popcount_table};
