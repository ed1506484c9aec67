//! Reordering primitive shared by step lists and graph node lists.

use std::collections::BTreeSet;

/// Items that persist their position as a dense order index.
pub trait OrderIndexed {
    /// Stores the item's zero-based position.
    fn set_order_index(&mut self, index: usize);
}

/// Moves the elements at `sources` so that they form a contiguous block
/// starting at `destination`.
///
/// Moved elements keep their relative order. `destination` is interpreted
/// against the sequence with the moved elements removed and is clamped to
/// its length. Out-of-range and repeated source indices are ignored.
///
/// # Examples
///
/// ```
/// use breakdown::board::domain::reorder;
///
/// let mut letters = vec!['a', 'b', 'c', 'd', 'e'];
/// reorder(&mut letters, &[3, 1], 0);
/// assert_eq!(letters, vec!['b', 'd', 'a', 'c', 'e']);
/// ```
pub fn reorder<T>(items: &mut Vec<T>, sources: &[usize], destination: usize) {
    let len = items.len();
    let selected: BTreeSet<usize> = sources.iter().copied().filter(|index| *index < len).collect();
    if selected.is_empty() {
        return;
    }

    let (moved, mut kept): (Vec<_>, Vec<_>) = std::mem::take(items)
        .into_iter()
        .enumerate()
        .partition(|(index, _)| selected.contains(index));

    let insertion = destination.min(kept.len());
    let tail = kept.split_off(insertion);
    kept.extend(moved);
    kept.extend(tail);
    items.extend(kept.into_iter().map(|(_, item)| item));
}

/// Rewrites order indices so they run `0..n` in slice order.
pub fn reindex<T: OrderIndexed>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order_index(index);
    }
}
