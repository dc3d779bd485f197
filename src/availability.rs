use crate::conflict::has_conflict;
use crate::errors::{BookingError, BookingResult};
use crate::slots::{generate_day_slots, SlotGridConfig, TimeSlot};
use crate::types::{Booking, VenueKind};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Whether the exact candidate interval is free. No grid quantization:
/// an arbitrary interval such as 09:15-09:45 is checked directly against
/// the bookings, even though the calendar UI only offers grid-aligned
/// starts.
pub fn is_slot_available(candidate: &TimeSlot, bookings: &[Booking]) -> bool {
    let occupied = occupied_slots(bookings);
    !has_conflict(candidate, &occupied)
}

/// The dates in `[from, to]` on which no atomic grid slot is left free.
///
/// Coverage is judged per atomic grid slot, not per contiguous gap: a day
/// booked 09:00-12:00 and 12:30-16:30 still has the 12:00-12:30 slot free
/// and is not fully booked. The coverage universe is the grid slots lying
/// entirely within business hours.
pub fn compute_fully_booked_dates(
    venue: VenueKind,
    from: NaiveDate,
    to: NaiveDate,
    grid: &SlotGridConfig,
    bookings: &[Booking],
) -> BTreeSet<NaiveDate> {
    let coverage: Vec<TimeSlot> = generate_day_slots(grid)
        .into_iter()
        .filter(|slot| slot.end() <= grid.day_end())
        .collect();
    if coverage.is_empty() {
        return BTreeSet::new();
    }

    let mut by_date: BTreeMap<NaiveDate, Vec<TimeSlot>> = BTreeMap::new();
    for booking in bookings {
        if booking.venue != venue || !booking.blocks_slot() {
            continue;
        }
        if booking.date < from || booking.date > to {
            continue;
        }
        by_date.entry(booking.date).or_default().push(booking.slot);
    }

    by_date
        .into_iter()
        .filter(|(_, occupied)| {
            coverage
                .iter()
                .all(|atomic| has_conflict(atomic, occupied))
        })
        .map(|(date, _)| date)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAvailability {
    pub slot: TimeSlot,
    pub available: bool,
}

/// Per-slot availability of one venue day, in grid order.
pub fn day_overview(grid: &SlotGridConfig, bookings: &[Booking]) -> Vec<SlotAvailability> {
    let occupied = occupied_slots(bookings);
    generate_day_slots(grid)
        .into_iter()
        .map(|slot| SlotAvailability {
            available: !has_conflict(&slot, &occupied),
            slot,
        })
        .collect()
}

/// First and last day of the given month.
pub fn month_bounds(year: i32, month: u32) -> BookingResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| BookingError::InvalidDate(format!("{year}-{month:02}")))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_month
        .and_then(|date| date.pred_opt())
        .ok_or_else(|| BookingError::InvalidDate(format!("{year}-{month:02}")))?;
    Ok((first, last))
}

fn occupied_slots(bookings: &[Booking]) -> Vec<TimeSlot> {
    bookings
        .iter()
        .filter(|booking| booking.blocks_slot())
        .map(|booking| booking.slot)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{BookingStatus, NewBooking};
    use test_case::test_case;

    fn booking(venue: VenueKind, date: NaiveDate, start: &str, end: &str) -> Booking {
        Booking::from_new(NewBooking {
            venue,
            date,
            slot: TimeSlot::from_times(start, end).unwrap(),
            booker_name: "Asha".into(),
            purpose: "Department meeting".into(),
            status: BookingStatus::Confirmed,
        })
    }

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn march_bounds() -> (NaiveDate, NaiveDate) {
        month_bounds(2026, 3).unwrap()
    }

    #[test]
    fn test_grid_gap_between_bookings_keeps_date_open() {
        // 12:00-12:30 stays free, so the date is not fully booked even
        // though nobody is likely to book it.
        let bookings = vec![
            booking(VenueKind::Lab, day(10), "09:00", "12:00"),
            booking(VenueKind::Lab, day(10), "12:30", "16:30"),
        ];

        let (from, to) = march_bounds();
        let fully_booked = compute_fully_booked_dates(
            VenueKind::Lab,
            from,
            to,
            &SlotGridConfig::default(),
            &bookings,
        );
        assert!(fully_booked.is_empty());
    }

    #[test]
    fn test_single_all_day_booking_fills_the_date() {
        let bookings = vec![booking(VenueKind::Lab, day(10), "09:00", "16:30")];

        let (from, to) = march_bounds();
        let fully_booked = compute_fully_booked_dates(
            VenueKind::Lab,
            from,
            to,
            &SlotGridConfig::default(),
            &bookings,
        );
        assert_eq!(fully_booked, BTreeSet::from([day(10)]));
    }

    #[test]
    fn test_dates_without_bookings_are_never_reported() {
        let (from, to) = march_bounds();
        let fully_booked = compute_fully_booked_dates(
            VenueKind::Lab,
            from,
            to,
            &SlotGridConfig::default(),
            &[],
        );
        assert!(fully_booked.is_empty());
    }

    #[test]
    fn test_cancelled_bookings_do_not_fill_a_date() {
        let mut cancelled = booking(VenueKind::Lab, day(10), "09:00", "16:30");
        cancelled.status = BookingStatus::Cancelled;
        cancelled.is_active = false;

        let (from, to) = march_bounds();
        let fully_booked = compute_fully_booked_dates(
            VenueKind::Lab,
            from,
            to,
            &SlotGridConfig::default(),
            &[cancelled],
        );
        assert!(fully_booked.is_empty());
    }

    #[test]
    fn test_other_venues_do_not_fill_a_date() {
        let bookings = vec![booking(VenueKind::ConventionCenter, day(10), "09:00", "16:30")];

        let (from, to) = march_bounds();
        let fully_booked = compute_fully_booked_dates(
            VenueKind::Lab,
            from,
            to,
            &SlotGridConfig::default(),
            &bookings,
        );
        assert!(fully_booked.is_empty());
    }

    #[test]
    fn test_bookings_outside_the_range_are_ignored() {
        let bookings = vec![booking(VenueKind::Lab, day(10), "09:00", "16:30")];

        let (from, to) = (day(11), day(20));
        let fully_booked =
            compute_fully_booked_dates(VenueKind::Lab, from, to, &SlotGridConfig::default(), &bookings);
        assert!(fully_booked.is_empty());
    }

    #[test]
    fn test_fully_booked_dates_are_deduplicated_and_ordered() {
        let bookings = vec![
            booking(VenueKind::Lab, day(20), "09:00", "16:30"),
            booking(VenueKind::Lab, day(10), "09:00", "13:00"),
            booking(VenueKind::Lab, day(10), "13:00", "16:30"),
        ];

        let (from, to) = march_bounds();
        let fully_booked = compute_fully_booked_dates(
            VenueKind::Lab,
            from,
            to,
            &SlotGridConfig::default(),
            &bookings,
        );
        assert_eq!(
            fully_booked.into_iter().collect::<Vec<_>>(),
            vec![day(10), day(20)]
        );
    }

    #[test_case("10:15", "10:45", false; "unaligned overlap is detected")]
    #[test_case("11:00", "11:30", true; "back to back after is free")]
    #[test_case("09:00", "10:00", true; "back to back before is free")]
    #[test_case("09:30", "10:30", false; "leading overlap is detected")]
    fn test_is_slot_available(start: &str, end: &str, expected: bool) {
        let existing = vec![booking(VenueKind::Lab, day(10), "10:00", "11:00")];
        let candidate = TimeSlot::from_times(start, end).unwrap();
        assert_eq!(is_slot_available(&candidate, &existing), expected);
    }

    #[test]
    fn test_slot_frees_up_after_cancellation() {
        let mut existing = booking(VenueKind::Lab, day(10), "10:00", "11:00");
        existing.status = BookingStatus::Cancelled;
        existing.is_active = false;

        let candidate = TimeSlot::from_times("10:00", "11:00").unwrap();
        assert!(is_slot_available(&candidate, &[existing]));
    }

    #[test]
    fn test_day_overview_marks_covered_slots() {
        let bookings = vec![booking(VenueKind::Lab, day(10), "10:00", "11:00")];
        let overview = day_overview(&SlotGridConfig::default(), &bookings);

        assert_eq!(overview.len(), 16);
        let by_start = |start: &str| {
            overview
                .iter()
                .find(|entry| entry.slot.start() == crate::slots::to_minutes(start).unwrap())
                .copied()
                .unwrap()
        };
        assert!(by_start("09:30").available);
        assert!(!by_start("10:00").available);
        assert!(!by_start("10:30").available);
        assert!(by_start("11:00").available);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(2026, 3).unwrap(), (day(1), day(31)));
        assert_eq!(
            month_bounds(2026, 12).unwrap(),
            (
                NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
            )
        );
        month_bounds(2026, 13).unwrap_err();
        month_bounds(2026, 0).unwrap_err();
    }
}
