// src/main.rs

use std::error::Error;
use std::io;

use tracing_subscriber::EnvFilter;

use steering_vibration_analysis::batch::run_batch;
use steering_vibration_analysis::config::AnalysisConfig;
use steering_vibration_analysis::constants::VEHICLE_NAME;
use steering_vibration_analysis::crate_version;
use steering_vibration_analysis::plot_functions::PngPlotRenderer;

fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics only; the analysis report itself goes to stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| -> Box<dyn Error> { e })?;

    println!(
        "{VEHICLE_NAME} Steering Vibration Analysis v{}",
        crate_version()
    );

    let config = AnalysisConfig::default();
    let renderer = PngPlotRenderer::new(config.speed_band);
    run_batch(&config, &renderer)?;

    Ok(())
}
