use crate::errors::BookingError;
use crate::slots::TimeSlot;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// The bookable physical resources. Each venue has an independent booking
/// calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VenueKind {
    VideoConferenceHall,
    ConventionCenter,
    Lab,
    MbaSeminarHall,
    ConferenceHall,
}

impl VenueKind {
    pub const ALL: [VenueKind; 5] = [
        VenueKind::VideoConferenceHall,
        VenueKind::ConventionCenter,
        VenueKind::Lab,
        VenueKind::MbaSeminarHall,
        VenueKind::ConferenceHall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueKind::VideoConferenceHall => "video-conference-hall",
            VenueKind::ConventionCenter => "convention-center",
            VenueKind::Lab => "lab",
            VenueKind::MbaSeminarHall => "mba-seminar-hall",
            VenueKind::ConferenceHall => "conference-hall",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VenueKind::VideoConferenceHall => "Video Conference Hall",
            VenueKind::ConventionCenter => "Convention Center",
            VenueKind::Lab => "Lab",
            VenueKind::MbaSeminarHall => "MBA Seminar Hall",
            VenueKind::ConferenceHall => "Conference Hall",
        }
    }

    /// Venue booking policy: these venues need an admin to approve a
    /// request before it is confirmed; the others confirm immediately.
    pub fn requires_approval(&self) -> bool {
        matches!(
            self,
            VenueKind::ConferenceHall | VenueKind::Lab | VenueKind::ConventionCenter
        )
    }

    pub fn initial_status(&self) -> BookingStatus {
        if self.requires_approval() {
            BookingStatus::Pending
        } else {
            BookingStatus::Confirmed
        }
    }
}

impl FromStr for VenueKind {
    type Err = BookingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        VenueKind::ALL
            .iter()
            .find(|venue| venue.as_str() == value)
            .copied()
            .ok_or_else(|| BookingError::UnknownVenue(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Every status except `cancelled` keeps its time slot occupied.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl FromStr for BookingStatus {
    type Err = BookingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(BookingError::Storage(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub venue: VenueKind,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub booker_name: String,
    pub purpose: String,
    pub status: BookingStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_new(new: NewBooking) -> Self {
        Self {
            id: Uuid::new_v4(),
            venue: new.venue,
            date: new.date,
            slot: new.slot,
            booker_name: new.booker_name,
            purpose: new.purpose,
            status: new.status,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Active bookings are the only ones that count against availability.
    pub fn blocks_slot(&self) -> bool {
        self.is_active && self.status.occupies_slot()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub venue: VenueKind,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub booker_name: String,
    pub purpose: String,
    pub status: BookingStatus,
}
