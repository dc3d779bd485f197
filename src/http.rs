use crate::availability::{compute_fully_booked_dates, day_overview, is_slot_available, month_bounds};
use crate::backend::BookingStore;
use crate::clock::Clock;
use crate::configuration::Configuration;
use crate::errors::BookingError;
use crate::slots::{format_minutes, TimeSlot};
use crate::types::{Booking, BookingStatus, NewBooking, VenueKind};
use crate::AppState;
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct BookingRequest {
    venue: VenueKind,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    #[validate(length(min = 1, max = 100))]
    booker_name: String,
    #[validate(length(max = 500))]
    #[serde(default)]
    purpose: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CancelBookingRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusUpdateRequest {
    id: Uuid,
    status: BookingStatus,
}

#[derive(Debug, Clone, Deserialize)]
struct AvailabilityQuery {
    venue: VenueKind,
    year: i32,
    month: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct DayQuery {
    venue: VenueKind,
    date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
struct SlotCheckQuery {
    venue: VenueKind,
    date: NaiveDate,
    start_time: String,
    end_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotCheckResponse {
    venue: VenueKind,
    date: NaiveDate,
    available: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct AdminBookingsQuery {
    venue: Option<VenueKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VenueView {
    id: VenueKind,
    name: String,
    requires_approval: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityResponse {
    venue: VenueKind,
    fully_booked_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DaySlotView {
    start_time: String,
    end_time: String,
    available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DayOverviewResponse {
    venue: VenueKind,
    date: NaiveDate,
    slots: Vec<DaySlotView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct BookingView {
    id: Uuid,
    venue: VenueKind,
    date: NaiveDate,
    start_time: String,
    end_time: String,
    booker_name: String,
    purpose: String,
    status: BookingStatus,
    is_active: bool,
}

impl From<Booking> for BookingView {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            venue: booking.venue,
            date: booking.date,
            start_time: format_minutes(booking.slot.start()),
            end_time: format_minutes(booking.slot.end()),
            booker_name: booking.booker_name,
            purpose: booking.purpose,
            status: booking.status,
            is_active: booking.is_active,
        }
    }
}

pub fn create_app<B, C, K>(store: B, configuration: C, clock: K) -> Router
where
    B: BookingStore,
    C: Configuration,
    K: Clock,
{
    let state = AppState {
        store,
        configuration,
        clock,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/venues", get(get_venues))
        .route("/availability", get(get_availability))
        .route("/day", get(get_day_overview))
        .route("/check", get(check_slot))
        .route("/book", post(book_venue))
        .route("/cancel", post(cancel_booking));

    let admin = Router::new()
        .route("/admin/bookings", get(get_all_bookings))
        .route("/admin/status", post(update_booking_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<B, C, K>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match request.headers().get("x-admin-password") {
        Some(header) => {
            if header.to_str().unwrap_or("") != state.configuration.admin_password() {
                return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
            }
        }
        None => return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
    Ok(next.run(request).await)
}

fn error_response(err: BookingError) -> (StatusCode, String) {
    let status = match err {
        BookingError::InvalidTimeFormat(_)
        | BookingError::InvalidDuration(_)
        | BookingError::InvalidDate(_)
        | BookingError::DateInPast
        | BookingError::UnknownVenue(_) => StatusCode::BAD_REQUEST,
        BookingError::SlotConflict { .. } => StatusCode::CONFLICT,
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

async fn get_venues() -> Json<Vec<VenueView>> {
    let venues = VenueKind::ALL
        .iter()
        .map(|venue| VenueView {
            id: *venue,
            name: venue.display_name().to_string(),
            requires_approval: venue.requires_approval(),
        })
        .collect();
    Json(venues)
}

async fn get_availability<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, String)> {
    let (from, to) = month_bounds(query.year, query.month).map_err(error_response)?;
    let bookings = state.store.active_bookings(query.venue, from, to);
    let fully_booked = compute_fully_booked_dates(
        query.venue,
        from,
        to,
        &state.configuration.slot_grid(),
        &bookings,
    );

    Ok(Json(AvailabilityResponse {
        venue: query.venue,
        fully_booked_dates: fully_booked.into_iter().collect(),
    }))
}

async fn get_day_overview<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    Query(query): Query<DayQuery>,
) -> Json<DayOverviewResponse> {
    let bookings = state
        .store
        .active_bookings(query.venue, query.date, query.date);
    let slots = day_overview(&state.configuration.slot_grid(), &bookings)
        .into_iter()
        .map(|entry| DaySlotView {
            start_time: format_minutes(entry.slot.start()),
            end_time: format_minutes(entry.slot.end()),
            available: entry.available,
        })
        .collect();

    Json(DayOverviewResponse {
        venue: query.venue,
        date: query.date,
        slots,
    })
}

async fn check_slot<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    Query(query): Query<SlotCheckQuery>,
) -> Result<Json<SlotCheckResponse>, (StatusCode, String)> {
    let slot =
        TimeSlot::from_times(&query.start_time, &query.end_time).map_err(error_response)?;
    let bookings = state
        .store
        .active_bookings(query.venue, query.date, query.date);

    Ok(Json(SlotCheckResponse {
        venue: query.venue,
        date: query.date,
        available: is_slot_available(&slot, &bookings),
    }))
}

async fn book_venue<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingView>), (StatusCode, String)> {
    request
        .validate()
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    if request.date < state.clock.today() {
        return Err(error_response(BookingError::DateInPast));
    }
    let slot =
        TimeSlot::from_times(&request.start_time, &request.end_time).map_err(error_response)?;
    state
        .configuration
        .duration_limits()
        .validate(&slot)
        .map_err(error_response)?;

    let booking = state
        .store
        .create_booking(NewBooking {
            venue: request.venue,
            date: request.date,
            slot,
            booker_name: request.booker_name,
            purpose: request.purpose,
            status: request.venue.initial_status(),
        })
        .map_err(error_response)?;

    info!(id = %booking.id, venue = %booking.venue.as_str(), date = %booking.date, "Booking created");
    Ok((StatusCode::CREATED, Json(BookingView::from(booking))))
}

async fn cancel_booking<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    Json(request): Json<CancelBookingRequest>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    match state.store.cancel_booking(request.id) {
        Ok(()) => {
            info!(id = %request.id, "Booking cancelled");
            Ok((StatusCode::OK, "Booking cancelled successfully".to_string()))
        }
        Err(err) => Err(error_response(err)),
    }
}

async fn get_all_bookings<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    Query(query): Query<AdminBookingsQuery>,
) -> Json<Vec<BookingView>> {
    let bookings = state
        .store
        .all_bookings(query.venue)
        .into_iter()
        .map(BookingView::from)
        .collect();
    Json(bookings)
}

async fn update_booking_status<B: BookingStore, C: Configuration, K: Clock>(
    State(state): State<AppState<B, C, K>>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    match state.store.set_status(request.id, request.status) {
        Ok(()) => {
            info!(id = %request.id, status = %request.status.as_str(), "Booking status updated");
            Ok((
                StatusCode::OK,
                "Booking status updated successfully".to_string(),
            ))
        }
        Err(err) => Err(error_response(err)),
    }
}
