use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::{
    config::SourceConfig,
    model::{Observation, ObservationRequest},
};

use super::WeatherSource;

/// Conditions reported when nothing is configured.
pub const DEFAULT_TEMPERATURE_C: f64 = 22.0;
pub const DEFAULT_HUMIDITY_PCT: u8 = 75;

/// Stand-in for a real weather API: reports fixed conditions for any city.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    temperature_c: f64,
    humidity_pct: u8,
}

impl SimulatedSource {
    pub fn new(temperature_c: f64, humidity_pct: u8) -> Self {
        Self { temperature_c, humidity_pct }
    }

    /// Build from the `[sources.simulated]` table, falling back to the
    /// default conditions for any unset field.
    pub fn from_config(config: Option<&SourceConfig>) -> Self {
        let temperature_c =
            config.and_then(|c| c.temperature_c).unwrap_or(DEFAULT_TEMPERATURE_C);
        let humidity_pct = config.and_then(|c| c.humidity_pct).unwrap_or(DEFAULT_HUMIDITY_PCT);

        Self::new(temperature_c, humidity_pct)
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPERATURE_C, DEFAULT_HUMIDITY_PCT)
    }
}

#[async_trait]
impl WeatherSource for SimulatedSource {
    async fn observe(&self, request: &ObservationRequest) -> Result<Observation> {
        let observation = Observation {
            city: request.city.clone(),
            temperature_c: self.temperature_c,
            humidity_pct: self.humidity_pct,
            observed_at: Utc::now(),
        };

        debug!(city = %observation.city, "Produced simulated observation");

        Ok(observation)
    }
}
