//! Request-level errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Outcome of a request that did not produce a weather record.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City parameter is required")]
    MissingCity,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Weather data not found for city '{0}'")]
    NotFound(String),
}

impl WeatherError {
    pub fn status(&self) -> StatusCode {
        match self {
            WeatherError::MissingCity | WeatherError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            WeatherError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
