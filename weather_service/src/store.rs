//! In-memory weather store shared by all request handlers.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::model::WeatherObservation;

/// Storage contract used by the HTTP layer.
///
/// Implementations must be safe to call from many tasks at once. A `put`
/// is atomic as a whole: readers see either the previous observation or
/// the new one, never a mix.
pub trait WeatherStorage: Send + Sync {
    /// Latest observation for `city`, or `None` if it was never written.
    fn get(&self, city: &str) -> Option<WeatherObservation>;

    /// Insert or fully replace the observation for `city`.
    fn put(&self, city: &str, observation: WeatherObservation);

    /// Number of cities with an observation.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// City -> observation map behind a single reader/writer lock.
///
/// The lock is held only for the map access itself and never across an
/// `.await`, so a synchronous lock is enough.
#[derive(Debug, Default)]
pub struct WeatherStore {
    observations: RwLock<HashMap<String, WeatherObservation>>,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WeatherStorage for WeatherStore {
    fn get(&self, city: &str) -> Option<WeatherObservation> {
        self.observations.read().get(city).cloned()
    }

    fn put(&self, city: &str, observation: WeatherObservation) {
        let previous = self
            .observations
            .write()
            .insert(city.to_owned(), observation);
        debug!(city, replaced = previous.is_some(), "stored observation");
    }

    fn len(&self) -> usize {
        self.observations.read().len()
    }
}
