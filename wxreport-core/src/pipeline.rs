//! The three-step report pipeline: fetch -> compute -> save.
//!
//! Each step's return value is the next step's input. A failed step
//! aborts the run; the error carries the id of the step that failed.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::info;

use crate::{
    Config,
    model::{ComfortReport, Observation, ObservationRequest},
    source::{WeatherSource, default_source_from_config},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    Fetch,
    Compute,
    Save,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Fetch => "fetch",
            StepId::Compute => "compute",
            StepId::Save => "save",
        }
    }

    /// Steps in execution order.
    pub const fn all() -> &'static [StepId] {
        &[StepId::Fetch, StepId::Compute, StepId::Save]
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pipeline run failed at a specific step.
///
/// There is no retry or recovery; the failure propagates to whoever
/// scheduled the run.
#[derive(Debug, Error)]
#[error("step '{step}' failed")]
pub struct StepFailure {
    pub step: StepId,
    #[source]
    pub source: anyhow::Error,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: ComfortReport,
    pub path: PathBuf,
}

/// File name for a report saved on the given date.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("weather_{}.json", date.format("%Y%m%d"))
}

pub struct Pipeline {
    source: Box<dyn WeatherSource>,
    city: String,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn new(
        source: Box<dyn WeatherSource>,
        city: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self { source, city: city.into(), output_dir: output_dir.into() }
    }

    /// Resolve source, city and output directory from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(default_source_from_config(config)?, config.city(), config.output_dir()))
    }

    /// Run fetch -> compute -> save once.
    pub async fn run(&self) -> Result<RunOutcome, StepFailure> {
        info!(city = %self.city, "Starting pipeline run");

        let observation = self
            .fetch()
            .await
            .map_err(|source| StepFailure { step: StepId::Fetch, source })?;
        info!(
            step = %StepId::Fetch,
            temperature_c = observation.temperature_c,
            humidity_pct = observation.humidity_pct,
            "Fetched observation"
        );

        let report = Self::compute(observation);
        info!(step = %StepId::Compute, comfort_index = %report.comfort_index, "Derived comfort report");

        let path =
            self.save(&report).map_err(|source| StepFailure { step: StepId::Save, source })?;
        info!(step = %StepId::Save, path = %path.display(), "Saved report");

        Ok(RunOutcome { report, path })
    }

    async fn fetch(&self) -> Result<Observation> {
        let request = ObservationRequest { city: self.city.clone() };
        self.source.observe(&request).await
    }

    fn compute(observation: Observation) -> ComfortReport {
        ComfortReport::from_observation(observation)
    }

    /// Write the report as indented JSON to `weather_<YYYYMMDD>.json`,
    /// dated at save time (UTC).
    fn save(&self, report: &ComfortReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.output_dir.display())
        })?;

        let path = self.output_dir.join(report_file_name(Utc::now().date_naive()));

        let json =
            serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComfortIndex;
    use crate::source::simulated::SimulatedSource;

    #[test]
    fn step_ids_in_order() {
        let names: Vec<&str> = StepId::all().iter().map(StepId::as_str).collect();
        assert_eq!(names, ["fetch", "compute", "save"]);
    }

    #[test]
    fn report_file_name_is_dated() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).expect("valid date");
        assert_eq!(report_file_name(date), "weather_20240131.json");
    }

    #[tokio::test]
    async fn run_writes_a_valid_report_artifact() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let pipeline =
            Pipeline::new(Box::new(SimulatedSource::default()), "Lima", dir.path());

        let name_before = report_file_name(Utc::now().date_naive());
        let outcome = pipeline.run().await.expect("run must succeed");
        let name_after = report_file_name(Utc::now().date_naive());

        let file_name = outcome.path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(
            file_name == name_before || file_name == name_after,
            "unexpected file name '{file_name}'"
        );

        let contents = fs::read_to_string(&outcome.path).expect("artifact must be readable");
        let value: serde_json::Value =
            serde_json::from_str(&contents).expect("artifact must be valid JSON");

        assert_eq!(value["city"], "Lima");
        assert_eq!(value["humidity"], 75);
        assert_eq!(value["comfort_index"], "pleasant");
        assert!(value["timestamp"].is_string());
        assert!((value["temperature_fahrenheit"].as_f64().unwrap() - 71.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn run_classifies_configured_conditions() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let pipeline =
            Pipeline::new(Box::new(SimulatedSource::new(28.0, 85)), "Iquitos", dir.path());

        let outcome = pipeline.run().await.expect("run must succeed");

        assert_eq!(outcome.report.comfort_index, ComfortIndex::HotAndHumid);
        assert_eq!(outcome.report.city, "Iquitos");
    }

    #[tokio::test]
    async fn run_attributes_save_failures_to_the_save_step() {
        // Point the output directory at an existing file so create_dir_all fails.
        let file = tempfile::NamedTempFile::new().expect("tempfile must be created");
        let pipeline =
            Pipeline::new(Box::new(SimulatedSource::default()), "Lima", file.path());

        let failure = pipeline.run().await.expect_err("run must fail");

        assert_eq!(failure.step, StepId::Save);
        assert!(failure.to_string().contains("step 'save' failed"));
    }

    #[tokio::test]
    async fn from_config_builds_a_runnable_pipeline() {
        let dir = tempfile::tempdir().expect("tempdir must be created");

        let mut config = Config::default();
        config.set_city("Lima".to_string());
        config.set_output_dir(dir.path().to_path_buf());

        let pipeline = Pipeline::from_config(&config).expect("pipeline must build");
        let outcome = pipeline.run().await.expect("run must succeed");

        assert!(outcome.path.starts_with(dir.path()));
    }
}
