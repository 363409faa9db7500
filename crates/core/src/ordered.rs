//! Day-ordered sub-lists (itinerary activities, hotel programme).
//!
//! Items in these lists always present a gap-free `1..N` day sequence.
//! Appending assigns `max(day) + 1`; removing reassigns every remaining
//! item `day = position + 1`. Day numbers do not stick to content: after
//! removing day 2 of 4, the old day 3 becomes day 2.

/// An item that carries a 1-based day number.
pub trait DayOrdered {
    fn day(&self) -> u32;
    fn set_day(&mut self, day: u32);
}

/// Day number the next appended item should receive.
pub fn next_day<T: DayOrdered>(items: &[T]) -> u32 {
    items.iter().map(DayOrdered::day).max().unwrap_or(0) + 1
}

/// Append an item built for the next day number.
pub fn push_next<T: DayOrdered>(items: &mut Vec<T>, make: impl FnOnce(u32) -> T) {
    let day = next_day(items);
    items.push(make(day));
}

/// Remove the item at `index` and renumber the rest.
///
/// Returns `None` (and leaves the list untouched) when `index` is out of
/// range.
pub fn remove_at<T: DayOrdered>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index >= items.len() {
        return None;
    }
    let removed = items.remove(index);
    renumber(items);
    Some(removed)
}

/// Reassign `day = position + 1` across the whole list.
pub fn renumber<T: DayOrdered>(items: &mut [T]) {
    for (position, item) in items.iter_mut().enumerate() {
        item.set_day(position as u32 + 1);
    }
}

/// `true` when the list reads exactly `1, 2, .., N`.
pub fn is_contiguous<T: DayOrdered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(position, item)| item.day() == position as u32 + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
