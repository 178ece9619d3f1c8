//! Core library for the `wxreport` pipeline.
//!
//! This crate defines:
//! - Configuration handling
//! - Abstraction over weather sources
//! - The three-step report pipeline (fetch, compute, save)
//! - Shared domain models (observations, reports)
//!
//! It is used by `wxreport-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod pipeline;
pub mod source;

pub use config::{Config, SourceConfig};
pub use model::{ComfortIndex, ComfortReport, Observation, ObservationRequest};
pub use pipeline::{Pipeline, RunOutcome, StepFailure, StepId};
pub use source::{SourceId, WeatherSource};
