use crate::backend::BookingStore;
use crate::conflict::find_conflict;
use crate::errors::{BookingError, BookingResult};
use crate::types::{Booking, BookingStatus, NewBooking, VenueKind};
use chrono::NaiveDate;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::error;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    bookings: Arc<Mutex<HashMap<Uuid, Booking>>>,
}

impl BookingStore for LocalBookings {
    fn active_bookings(&self, venue: VenueKind, from: NaiveDate, to: NaiveDate) -> Vec<Booking> {
        let bookings = self.bookings.lock().unwrap();
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|booking| {
                booking.venue == venue
                    && booking.blocks_slot()
                    && booking.date >= from
                    && booking.date <= to
            })
            .cloned()
            .collect();
        result.sort_unstable_by_key(|booking| (booking.date, booking.slot));
        result
    }

    fn all_bookings(&self, venue: Option<VenueKind>) -> Vec<Booking> {
        let bookings = self.bookings.lock().unwrap();
        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|booking| venue.is_none() || venue == Some(booking.venue))
            .cloned()
            .collect();
        result.sort_unstable_by_key(|booking| (booking.date, booking.slot));
        result
    }

    fn create_booking(&self, new: NewBooking) -> BookingResult<Booking> {
        // Conflict check and insert happen under the same lock, so two
        // concurrent requests cannot both pass the check.
        let mut bookings = self.bookings.lock().unwrap();

        let same_day: Vec<Booking> = bookings
            .values()
            .filter(|booking| {
                booking.venue == new.venue && booking.date == new.date && booking.blocks_slot()
            })
            .cloned()
            .collect();
        if let Some(existing) = find_conflict(&new.slot, &same_day) {
            error!(venue = %new.venue.as_str(), date = %new.date, "Time slot already booked");
            return Err(BookingError::SlotConflict {
                conflicting: Some(existing.id),
            });
        }

        let booking = Booking::from_new(new);
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    fn set_status(&self, id: Uuid, new_status: BookingStatus) -> BookingResult<()> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.get_mut(&id) {
            Some(booking) => {
                booking.status = new_status;
                if new_status == BookingStatus::Cancelled {
                    booking.is_active = false;
                }
                Ok(())
            }
            None => {
                error!(%id, "Booking does not exist and its status can therefore not be updated");
                Err(BookingError::NotFound(id))
            }
        }
    }

    fn cancel_booking(&self, id: Uuid) -> BookingResult<()> {
        self.set_status(id, BookingStatus::Cancelled)
    }
}
