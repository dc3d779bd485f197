use crate::errors::BookingResult;
use crate::types::{Booking, BookingStatus, NewBooking, VenueKind};
use chrono::NaiveDate;
use uuid::Uuid;

pub trait BookingStore: Clone + Send + Sync + 'static {
    /// Active bookings (not cancelled, not soft-deleted) for one venue
    /// with dates in `[from, to]`.
    fn active_bookings(&self, venue: VenueKind, from: NaiveDate, to: NaiveDate) -> Vec<Booking>;

    /// All bookings including cancelled ones, optionally restricted to a
    /// venue. Admin view.
    fn all_bookings(&self, venue: Option<VenueKind>) -> Vec<Booking>;

    /// Inserts the booking unless it overlaps an active booking on the
    /// same venue and date. The conflict check and the insert are atomic
    /// within the store.
    fn create_booking(&self, new: NewBooking) -> BookingResult<Booking>;

    /// Sets the booking status; setting `cancelled` also soft-deletes.
    fn set_status(&self, id: Uuid, new_status: BookingStatus) -> BookingResult<()>;

    /// Soft delete: status `cancelled`, `is_active` false. The row is kept
    /// for audit history.
    fn cancel_booking(&self, id: Uuid) -> BookingResult<()>;
}
