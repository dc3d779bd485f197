use crate::slots::TimeSlot;
use crate::types::Booking;

/// Strict half-open overlap: touching endpoints (one interval ending
/// exactly where another starts) do not conflict.
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.start() < b.end() && b.start() < a.end()
}

/// True iff the candidate overlaps at least one member of `existing`.
/// Short-circuits on the first hit; the boolean result is independent of
/// the order of `existing`.
pub fn has_conflict(candidate: &TimeSlot, existing: &[TimeSlot]) -> bool {
    existing.iter().any(|slot| overlaps(candidate, slot))
}

/// The first booking whose slot overlaps the candidate, for error
/// messages and admin diagnostics.
pub fn find_conflict<'a>(candidate: &TimeSlot, bookings: &'a [Booking]) -> Option<&'a Booking> {
    bookings.iter().find(|booking| overlaps(candidate, &booking.slot))
}
