use std::time::Duration;

use crate::{
    clock::SystemClock, configuration::Configuration, configuration_handler::ConfigurationHandler,
    database_interface::DatabaseInterface, http::create_app, local_bookings::LocalBookings,
};
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod clock;
mod configuration;
mod configuration_handler;
mod conflict;
mod database_interface;
mod errors;
mod http;
mod local_bookings;
mod schema;
mod slots;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
pub struct AppState<B, C, K> {
    pub store: B,
    pub configuration: C,
    pub clock: K,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("################");
    println!("# Hall Booking #");
    println!("################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(database_url) = configuration.database_url() {
        let store = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(store) => {
                    info!("Successfully connected to database");
                    break store;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart with the database disabled (impersistent bookings).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(store, configuration, SystemClock)
    } else {
        let store = LocalBookings::default();
        create_app(store, configuration, SystemClock)
    };

    axum::serve(listener, app).await.unwrap();
}
