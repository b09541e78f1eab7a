//! Weather Service - Core Library
//!
//! An in-memory store of the latest weather observation per city, served
//! over HTTP.

pub mod cli;
pub mod error;
pub mod model;
pub mod server;
pub mod settings;
pub mod store;
pub mod telemetry;

pub use error::WeatherError;
pub use model::{WeatherObservation, WeatherUpdate};
pub use store::{WeatherStorage, WeatherStore};
