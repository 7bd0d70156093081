//! The process-wide popcount lookup table used by the WFC solver.
//!
//! Initialized idempotently on first use and read-only thereafter, per the
//! concurrency model: distinct kernel calls may run concurrently on
//! separate buffers without coordination, and this is the only state they
//! share.

use std::sync::OnceLock;

static POPCOUNT_TABLE: OnceLock<[u8; 256]> = OnceLock::new();

/// The 256-entry popcount table, computing it on first access.
pub fn popcount_table() -> &'static [u8; 256] {
    POPCOUNT_TABLE.get_or_init(|| {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i.count_ones() as u8;
        }
        table
    })
}

/// Number of set bits in `mask`, via the shared lookup table.
#[inline]
pub fn popcount(mask: u8) -> u8 {
    popcount_table()[mask as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_count_ones() {
        for mask in 0u16..256 {
            let mask = mask as u8;
            assert_eq!(popcount(mask), mask.count_ones() as u8);
        }
    }

    #[test]
    fn table_is_stable_across_calls() {
        let a = popcount_table() as *const _;
        let b = popcount_table() as *const _;
        assert_eq!(a, b);
    }
}
