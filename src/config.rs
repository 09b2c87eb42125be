// src/config.rs

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_LOG_ROOT, DEFAULT_OUTPUT_ROOT, EXCLUDED_DRIVE_DIR, LOG_FILE_NAME, MAX_RECENT_DRIVES,
    SAMPLES_PER_SECOND, SUMMARY_FILE_NAME, VIBRATION_SPEED_MAX_KPH, VIBRATION_SPEED_MIN_KPH,
};
use crate::data_analysis::speed_band::SpeedBand;

/// What the batch does when rendering a drive's plots fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotFailurePolicy {
    /// Propagate the error and stop the batch.
    #[default]
    Abort,
    /// Log the error and leave the drive out of the summary.
    SkipDrive,
}

/// Paths, thresholds and policies for one batch run.
///
/// `Default` reproduces the on-device layout: drives under
/// `/data/media/0/realdata`, results under `./steering_analysis`.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub log_root: PathBuf,
    pub output_root: PathBuf,
    pub log_file_name: String,
    pub excluded_drive_dir: String,
    pub max_drives: usize,
    pub speed_band: SpeedBand,
    pub sample_rate_hz: f64,
    pub summary_file_name: String,
    pub plot_failure_policy: PlotFailurePolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            log_root: PathBuf::from(DEFAULT_LOG_ROOT),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            log_file_name: LOG_FILE_NAME.to_string(),
            excluded_drive_dir: EXCLUDED_DRIVE_DIR.to_string(),
            max_drives: MAX_RECENT_DRIVES,
            speed_band: SpeedBand::new(VIBRATION_SPEED_MIN_KPH, VIBRATION_SPEED_MAX_KPH),
            sample_rate_hz: SAMPLES_PER_SECOND,
            summary_file_name: SUMMARY_FILE_NAME.to_string(),
            plot_failure_policy: PlotFailurePolicy::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn summary_path(&self) -> PathBuf {
        self.output_root.join(&self.summary_file_name)
    }

    pub fn drive_output_dir(&self, drive_name: &str) -> PathBuf {
        self.output_root.join(drive_name)
    }
}
