use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    backend::BookingStore,
    clock::Clock,
    configuration::Configuration,
    errors::{BookingError, BookingResult},
    slots::{DurationLimits, SlotGridConfig, TimeSlot},
    types::{Booking, BookingStatus, NewBooking, VenueKind},
};

pub struct MockBookingStoreInner {
    pub success: AtomicBool,
    pub conflict: AtomicBool,
    pub calls_to_active_bookings: AtomicU64,
    pub calls_to_all_bookings: AtomicU64,
    pub calls_to_create_booking: AtomicU64,
    pub calls_to_set_status: AtomicU64,
    pub calls_to_cancel_booking: AtomicU64,
    pub bookings: Mutex<HashMap<Uuid, Booking>>,
}

#[derive(Clone)]
pub struct MockBookingStore(pub Arc<MockBookingStoreInner>);

impl MockBookingStoreInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            conflict: AtomicBool::new(false),
            calls_to_active_bookings: AtomicU64::default(),
            calls_to_all_bookings: AtomicU64::default(),
            calls_to_create_booking: AtomicU64::default(),
            calls_to_set_status: AtomicU64::default(),
            calls_to_cancel_booking: AtomicU64::default(),
            bookings: Mutex::default(),
        }
    }
}

impl MockBookingStore {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingStoreInner::new()))
    }

    pub fn seed(&self, booking: Booking) {
        self.0.bookings.lock().unwrap().insert(booking.id, booking);
    }

    fn result(&self, id: Uuid) -> BookingResult<()> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(BookingError::NotFound(id)),
        }
    }
}

impl BookingStore for MockBookingStore {
    fn active_bookings(&self, venue: VenueKind, from: NaiveDate, to: NaiveDate) -> Vec<Booking> {
        self.0
            .calls_to_active_bookings
            .fetch_add(1, Ordering::SeqCst);
        self.0
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|booking| {
                booking.venue == venue
                    && booking.blocks_slot()
                    && booking.date >= from
                    && booking.date <= to
            })
            .cloned()
            .collect()
    }

    fn all_bookings(&self, venue: Option<VenueKind>) -> Vec<Booking> {
        self.0.calls_to_all_bookings.fetch_add(1, Ordering::SeqCst);
        self.0
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|booking| venue.is_none() || venue == Some(booking.venue))
            .cloned()
            .collect()
    }

    fn create_booking(&self, new: NewBooking) -> BookingResult<Booking> {
        self.0
            .calls_to_create_booking
            .fetch_add(1, Ordering::SeqCst);
        if self.0.conflict.load(Ordering::SeqCst) {
            return Err(BookingError::SlotConflict { conflicting: None });
        }
        if !self.0.success.load(Ordering::SeqCst) {
            return Err(BookingError::Storage("Supposed to fail".into()));
        }
        let booking = Booking::from_new(new);
        self.seed(booking.clone());
        Ok(booking)
    }

    fn set_status(&self, id: Uuid, new_status: BookingStatus) -> BookingResult<()> {
        self.0.calls_to_set_status.fetch_add(1, Ordering::SeqCst);
        if let Some(booking) = self.0.bookings.lock().unwrap().get_mut(&id) {
            booking.status = new_status;
            if new_status == BookingStatus::Cancelled {
                booking.is_active = false;
            }
        }
        self.result(id)
    }

    fn cancel_booking(&self, id: Uuid) -> BookingResult<()> {
        self.0
            .calls_to_cancel_booking
            .fetch_add(1, Ordering::SeqCst);
        self.result(id)
    }
}

/// Deterministic clock for tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct TestConfiguration;

impl Configuration for TestConfiguration {
    fn admin_password(&self) -> String {
        "123".into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn slot_grid(&self) -> SlotGridConfig {
        SlotGridConfig::default()
    }

    fn duration_limits(&self) -> DurationLimits {
        DurationLimits::default()
    }
}

pub fn example_booking(venue: VenueKind, date: NaiveDate, start: &str, end: &str) -> Booking {
    Booking::from_new(NewBooking {
        venue,
        date,
        slot: TimeSlot::from_times(start, end).unwrap(),
        booker_name: String::from("Asha"),
        purpose: String::from("Project review"),
        status: venue.initial_status(),
    })
}
