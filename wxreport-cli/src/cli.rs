use std::{fs, path::PathBuf};

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};

use wxreport_core::{
    Config, SourceConfig,
    pipeline::Pipeline,
    source::{
        SourceId,
        simulated::{DEFAULT_HUMIDITY_PCT, DEFAULT_TEMPERATURE_C},
    },
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxreport", version, about = "Weather report pipeline CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the fetch/compute/save pipeline once.
    Run {
        /// City to report on; defaults to the configured city.
        city: Option<String>,

        /// Directory the report is written into; defaults to the configured one.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Configure the default city, output directory and simulated conditions.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Run { city, output_dir } => run_pipeline(city, output_dir).await,
            Command::Configure => configure(),
        }
    }
}

async fn run_pipeline(city: Option<String>, output_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    if let Some(city) = city {
        config.set_city(city);
    }
    if let Some(dir) = output_dir {
        config.set_output_dir(dir);
    }

    let pipeline = Pipeline::from_config(&config)?;
    let outcome = pipeline.run().await?;

    let report = &outcome.report;
    let observed_local = report.observed_at.with_timezone(&Local);

    println!(
        "{}: {:.1} °C / {:.1} °F, humidity {} %, {} (observed {})",
        report.city,
        report.temperature_c,
        report.temperature_f,
        report.humidity_pct,
        report.comfort_index,
        observed_local.format("%Y-%m-%d %H:%M"),
    );
    println!("Report saved to {}", outcome.path.display());
    println!();

    let contents = fs::read_to_string(&outcome.path)
        .with_context(|| format!("Failed to read back report file: {}", outcome.path.display()))?;
    println!("{contents}");

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let city = Text::new("Default city:").with_default(&config.city()).prompt()?;
    config.set_city(city);

    let output_dir = Text::new("Output directory:")
        .with_default(&config.output_dir().display().to_string())
        .prompt()?;
    config.set_output_dir(PathBuf::from(output_dir));

    let current = config.source_config(SourceId::Simulated).cloned().unwrap_or_default();

    let temperature_c = CustomType::<f64>::new("Simulated temperature (Celsius):")
        .with_default(current.temperature_c.unwrap_or(DEFAULT_TEMPERATURE_C))
        .prompt()?;
    let humidity_pct = CustomType::<u8>::new("Simulated humidity (percent):")
        .with_default(current.humidity_pct.unwrap_or(DEFAULT_HUMIDITY_PCT))
        .prompt()?;

    config.upsert_source_config(
        SourceId::Simulated,
        SourceConfig { temperature_c: Some(temperature_c), humidity_pct: Some(humidity_pct) },
    );

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}
