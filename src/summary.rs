// src/summary.rs

use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::data_analysis::speed_band::AnalysisResult;

/// Per-drive entry of the summary file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub drive: String,
    pub analysis: AnalysisResult,
}

/// Renders the records as pretty-printed JSON (two-space indent).
/// A NaN statistic is written as `null`.
pub fn summary_to_json(records: &[SummaryRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

pub fn write_summary(path: &Path, records: &[SummaryRecord]) -> Result<(), Box<dyn Error>> {
    fs::write(path, summary_to_json(records)?)?;
    Ok(())
}

/// Console lines for one analyzed drive.
pub fn format_drive_summary(analysis: &AnalysisResult) -> Vec<String> {
    vec![
        format!("Time in range: {:.1}s", analysis.time_in_band),
        format!("Avg speed: {:.1} km/h", analysis.avg_speed),
        format!("Torque std: {:.3} Nm", analysis.torque_std_dev),
        format!("Torque range: {:.3} Nm", analysis.torque_range),
    ]
}

pub fn print_drive_summary(analysis: &AnalysisResult) {
    for line in format_drive_summary(analysis) {
        println!("{line}");
    }
}


// src/summary.rs
