/// Item count exposed for a backing list with two or more items.
///
/// This is large enough that a surface never reaches its end in practice, while
/// `position * extent` still fits comfortably in a `u64` pixel offset.
pub const UNBOUNDED_ITEM_COUNT: usize = i32::MAX as usize;

/// Maps a virtual position to an index into a backing list of `size` items.
///
/// - `size == 0`: returns `virtual_position` unchanged. The result is never used to fetch an
///   item, because nothing is bound for an empty list.
/// - `size == 1`: always `0`.
/// - otherwise: `virtual_position % size`.
#[inline]
pub fn real_position(virtual_position: usize, size: usize) -> usize {
    match size {
        0 => virtual_position,
        1 => 0,
        _ => virtual_position % size,
    }
}

/// Item count exposed to the surface for a backing list of `size` items.
#[inline]
pub fn exposed_count(size: usize) -> usize {
    match size {
        0 => 0,
        1 => 1,
        _ => UNBOUNDED_ITEM_COUNT,
    }
}
