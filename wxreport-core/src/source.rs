use crate::{
    Config,
    model::{Observation, ObservationRequest},
    source::simulated::SimulatedSource,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod simulated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Simulated,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::Simulated => "simulated",
        }
    }

    pub const fn all() -> &'static [SourceId] {
        &[SourceId::Simulated]
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SourceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "simulated" => Ok(SourceId::Simulated),
            _ => Err(anyhow::anyhow!(
                "Unknown weather source '{value}'. Supported sources: simulated."
            )),
        }
    }
}

/// A backend that yields one observation per request.
///
/// Only the simulated source exists today; a source backed by a real
/// weather API plugs in behind the same trait.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn observe(&self, request: &ObservationRequest) -> anyhow::Result<Observation>;
}

/// Construct a source from config and explicit SourceId.
pub fn source_from_config(id: SourceId, config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let boxed: Box<dyn WeatherSource> = match id {
        SourceId::Simulated => Box::new(SimulatedSource::from_config(config.source_config(id))),
    };

    Ok(boxed)
}

/// Construct the default source from config, using the `source` field.
pub fn default_source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let id = config.default_source_id()?;
    source_from_config(id, config)
}
