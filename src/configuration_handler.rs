use crate::configuration::Configuration;
use crate::slots::{DurationLimits, SlotGridConfig};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "hall-booking", about = "Hall booking service for college venues")]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on
    #[arg(long, default_value = "3000")]
    port: String,

    /// Postgres connection URL; without it bookings are kept in memory
    #[arg(long)]
    database_url: Option<String>,

    /// Password expected in the x-admin-password header
    #[arg(long, default_value = "123")]
    admin_password: String,

    /// First bookable hour of the day
    #[arg(long, default_value_t = 9)]
    grid_start_hour: u16,

    /// Last bookable hour of the day
    #[arg(long, default_value_t = 16)]
    grid_end_hour: u16,

    /// Minute boundary within the last bookable hour
    #[arg(long, default_value_t = 30)]
    grid_end_minute: u16,

    /// Width of one atomic grid slot in minutes
    #[arg(long, default_value_t = 30)]
    slot_interval_minutes: u16,

    /// Shortest allowed booking in minutes
    #[arg(long, default_value_t = 30)]
    min_booking_minutes: u16,

    /// Longest allowed booking in minutes
    #[arg(long, default_value_t = 480)]
    max_booking_minutes: u16,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn admin_password(&self) -> String {
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| self.admin_password.clone())
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok())
    }

    fn slot_grid(&self) -> SlotGridConfig {
        SlotGridConfig {
            start_hour: self.grid_start_hour,
            end_hour: self.grid_end_hour,
            end_minute: self.grid_end_minute,
            interval_minutes: self.slot_interval_minutes,
        }
    }

    fn duration_limits(&self) -> DurationLimits {
        DurationLimits {
            min_minutes: self.min_booking_minutes,
            max_minutes: self.max_booking_minutes,
        }
    }
}
