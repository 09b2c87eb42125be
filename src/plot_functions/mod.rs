// src/plot_functions/mod.rs

pub mod plot_speed_torque_timeline;
pub mod plot_torque_vs_speed;

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::constants::{SCATTER_PLOT_FILE_NAME, TIMELINE_PLOT_FILE_NAME};
use crate::data_analysis::speed_band::SpeedBand;
use crate::data_input::log_data::Sample;

use plot_speed_torque_timeline::plot_speed_torque_timeline;
use plot_torque_vs_speed::plot_torque_vs_speed;

/// Renders the diagnostic charts of one drive into `output_dir`.
pub trait PlotRenderer {
    fn render(
        &self,
        samples: &[Sample],
        in_band: &[Sample],
        output_dir: &Path,
        drive_name: &str,
    ) -> Result<(), Box<dyn Error>>;
}

/// Writes `analysis.png` (speed and torque over time) and `scatter.png`
/// (torque vs speed) using the bitmap backend.
#[derive(Debug, Clone, Copy)]
pub struct PngPlotRenderer {
    pub speed_band: SpeedBand,
}

impl PngPlotRenderer {
    pub fn new(speed_band: SpeedBand) -> Self {
        Self { speed_band }
    }
}

impl PlotRenderer for PngPlotRenderer {
    fn render(
        &self,
        samples: &[Sample],
        in_band: &[Sample],
        output_dir: &Path,
        drive_name: &str,
    ) -> Result<(), Box<dyn Error>> {
        fs::create_dir_all(output_dir)?;

        plot_speed_torque_timeline(
            samples,
            self.speed_band,
            &output_dir.join(TIMELINE_PLOT_FILE_NAME),
            drive_name,
        )?;
        plot_torque_vs_speed(
            samples,
            in_band,
            self.speed_band,
            &output_dir.join(SCATTER_PLOT_FILE_NAME),
        )?;

        println!("Plots saved to {}/", output_dir.display());
        Ok(())
    }
}


// src/plot_functions/mod.rs
