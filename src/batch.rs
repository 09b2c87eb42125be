// src/batch.rs

use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{AnalysisConfig, PlotFailurePolicy};
use crate::data_analysis::speed_band::{analyze_speed_band, BandAnalysis};
use crate::data_input::log_data::Sample;
use crate::data_input::sample_extractor::load_samples;
use crate::plot_functions::PlotRenderer;
use crate::summary::{print_drive_summary, write_summary, SummaryRecord};

/// Outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub records: Vec<SummaryRecord>,
    pub summary_path: PathBuf,
}

/// Candidate drive directories under `log_root`, most recent name first.
///
/// Only directories count; the one named `excluded` is dropped before the
/// list is capped at `max_drives`.
pub fn discover_drives(
    log_root: &Path,
    excluded: &str,
    max_drives: usize,
) -> io::Result<Vec<PathBuf>> {
    let mut drives = Vec::new();
    for entry in fs::read_dir(log_root)? {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks, so linked drive directories are included.
        if !path.is_dir() {
            continue;
        }
        if entry.file_name() == excluded {
            continue;
        }
        drives.push(path);
    }

    drives.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    drives.truncate(max_drives);
    Ok(drives)
}

/// Everything known about a drive that reached the statistics stage.
#[derive(Debug, Clone)]
pub struct DriveAnalysis {
    pub samples: Vec<Sample>,
    pub band: BandAnalysis,
}

/// Loads and aggregates one drive's log. `None` means the drive is skipped:
/// the log failed to load, had no vehicle-state samples, or none in band.
pub fn analyze_log(log_path: &Path, config: &AnalysisConfig) -> Option<DriveAnalysis> {
    println!("Analyzing: {}", log_path.display());

    let samples = match load_samples(log_path) {
        Ok(samples) => samples,
        Err(e) => {
            println!("Error: {e}");
            return None;
        }
    };
    if samples.is_empty() {
        debug!(path = %log_path.display(), "no vehicle-state samples");
        return None;
    }

    let Some(band) = analyze_speed_band(&samples, config.speed_band, config.sample_rate_hz) else {
        println!("No data in vibration range");
        return None;
    };

    Some(DriveAnalysis { samples, band })
}

fn drive_name(drive_path: &Path) -> String {
    drive_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| drive_path.display().to_string())
}

/// Runs the whole pipeline over the most recent drives and writes the summary file.
///
/// Load and in-band failures skip a drive. Plot failures follow
/// `config.plot_failure_policy`; summary write failures are fatal.
pub fn run_batch<R: PlotRenderer + ?Sized>(
    config: &AnalysisConfig,
    renderer: &R,
) -> Result<BatchReport, Box<dyn Error>> {
    let drives = discover_drives(&config.log_root, &config.excluded_drive_dir, config.max_drives)
        .map_err(|e| format!("cannot list drives in '{}': {e}", config.log_root.display()))?;

    let mut records: Vec<SummaryRecord> = Vec::new();

    for drive_path in &drives {
        let name = drive_name(drive_path);
        let log_path = drive_path.join(&config.log_file_name);

        if !log_path.exists() {
            debug!(drive = %name, "no {} in drive, skipping", config.log_file_name);
            continue;
        }

        println!("\n=== {name} ===");

        let Some(drive) = analyze_log(&log_path, config) else {
            continue;
        };

        let output_dir = config.drive_output_dir(&name);
        if let Err(e) = renderer.render(&drive.samples, &drive.band.in_band, &output_dir, &name) {
            match config.plot_failure_policy {
                PlotFailurePolicy::Abort => return Err(e),
                PlotFailurePolicy::SkipDrive => {
                    warn!(drive = %name, error = %e, "plot rendering failed, skipping drive");
                    continue;
                }
            }
        }

        let analysis = drive.band.result;
        records.push(SummaryRecord {
            drive: name,
            analysis,
        });
        print_drive_summary(&analysis);
    }

    fs::create_dir_all(&config.output_root)?;
    let summary_path = config.summary_path();
    write_summary(&summary_path, &records)?;

    println!("\nAnalyzed {} drives", records.len());
    println!("Results saved to {}/", config.output_root.display());

    Ok(BatchReport {
        records,
        summary_path,
    })
}


// src/batch.rs
