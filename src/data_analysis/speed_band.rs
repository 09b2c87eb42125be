// src/data_analysis/speed_band.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt; // Import QuantileExt for .min() and .max() on Array1
use serde::Serialize;

use crate::data_input::log_data::Sample;

/// Inclusive speed interval in km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBand {
    pub min_kph: f64,
    pub max_kph: f64,
}

impl SpeedBand {
    pub const fn new(min_kph: f64, max_kph: f64) -> Self {
        Self { min_kph, max_kph }
    }

    pub fn contains(&self, speed_kph: f64) -> bool {
        speed_kph >= self.min_kph && speed_kph <= self.max_kph
    }
}

/// Aggregate statistics over the samples of one drive that fall in the speed band.
///
/// Serialized with the key names of the summary file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "drive_time")]
    pub time_in_band: f64, // Seconds, derived from the sample count.
    pub avg_speed: f64, // km/h
    #[serde(rename = "torque_std")]
    pub torque_std_dev: f64, // Nm, NaN for a single sample.
    pub torque_range: f64, // Nm
}

/// In-band subset of a drive together with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct BandAnalysis {
    pub in_band: Vec<Sample>,
    pub result: AnalysisResult,
}

/// Returns the samples whose speed lies inside `band`, preserving order.
pub fn filter_speed_band(samples: &[Sample], band: SpeedBand) -> Vec<Sample> {
    samples
        .iter()
        .filter(|sample| band.contains(sample.speed_kph))
        .copied()
        .collect()
}

/// Filters `samples` to `band` and computes the drive's statistics.
///
/// Returns `None` when no sample falls in the band. `sample_rate_hz` converts
/// the in-band sample count into seconds.
pub fn analyze_speed_band(
    samples: &[Sample],
    band: SpeedBand,
    sample_rate_hz: f64,
) -> Option<BandAnalysis> {
    let in_band = filter_speed_band(samples, band);
    if in_band.is_empty() {
        return None;
    }

    let speeds = Array1::from_iter(in_band.iter().map(|s| s.speed_kph));
    let torques = Array1::from_iter(in_band.iter().map(|s| s.steering_torque));

    let avg_speed = speeds.mean()?;
    // Sample standard deviation (n - 1); undefined for a single sample.
    let torque_std_dev = if torques.len() > 1 {
        torques.std(1.0)
    } else {
        f64::NAN
    };
    let torque_max = *torques.max().ok()?;
    let torque_min = *torques.min().ok()?;

    let result = AnalysisResult {
        time_in_band: in_band.len() as f64 / sample_rate_hz,
        avg_speed,
        torque_std_dev,
        torque_range: torque_max - torque_min,
    };

    Some(BandAnalysis { in_band, result })
}


// src/data_analysis/speed_band.rs
