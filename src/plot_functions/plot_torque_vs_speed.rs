// src/plot_functions/plot_torque_vs_speed.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{
    COLOR_SCATTER_ALL, COLOR_SCATTER_IN_BAND, COLOR_VIBRATION_RANGE, SCATTER_OPACITY,
    SCATTER_PLOT_HEIGHT, SCATTER_PLOT_WIDTH, SCATTER_POINT_SIZE, VIBRATION_RANGE_OPACITY,
};
use crate::data_analysis::speed_band::SpeedBand;
use crate::data_input::log_data::Sample;
use crate::plot_framework::{
    calculate_range, data_extent, draw_single_plot, BandOrientation, PlotConfig, PlotSeries,
    SeriesStyle, ShadedBand,
};

fn torque_speed_points(samples: &[Sample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|s| (s.speed_kph, s.steering_torque))
        .collect()
}

/// Torque against speed for every sample, with the in-band subset drawn on top.
pub fn build_scatter_config(
    samples: &[Sample],
    in_band: &[Sample],
    band: SpeedBand,
) -> Option<PlotConfig> {
    let (speed_min, speed_max) = data_extent(samples.iter().map(|s| s.speed_kph))?;
    let (x_min, x_max) = calculate_range(speed_min.min(band.min_kph), speed_max.max(band.max_kph));

    let (torque_min, torque_max) = data_extent(samples.iter().map(|s| s.steering_torque))?;
    let (y_min, y_max) = calculate_range(torque_min, torque_max);

    let mut series = vec![PlotSeries {
        data: torque_speed_points(samples),
        label: "All samples".to_string(),
        color: *COLOR_SCATTER_ALL,
        opacity: SCATTER_OPACITY,
        style: SeriesStyle::Scatter {
            point_size: SCATTER_POINT_SIZE,
        },
    }];
    if !in_band.is_empty() {
        series.push(PlotSeries {
            data: torque_speed_points(in_band),
            label: "In vibration range".to_string(),
            color: *COLOR_SCATTER_IN_BAND,
            opacity: SCATTER_OPACITY,
            style: SeriesStyle::Scatter {
                point_size: SCATTER_POINT_SIZE,
            },
        });
    }

    Some(PlotConfig {
        title: "Steering Torque vs Speed".to_string(),
        x_range: x_min..x_max,
        y_range: y_min..y_max,
        series,
        bands: vec![ShadedBand {
            min: band.min_kph,
            max: band.max_kph,
            orientation: BandOrientation::Vertical,
            color: *COLOR_VIBRATION_RANGE,
            opacity: VIBRATION_RANGE_OPACITY,
            label: "Vibration Range".to_string(),
        }],
        x_label: "Speed (km/h)".to_string(),
        y_label: "Steering Torque (Nm)".to_string(),
    })
}

/// Generates the torque-vs-speed scatter plot for one drive.
pub fn plot_torque_vs_speed(
    samples: &[Sample],
    in_band: &[Sample],
    band: SpeedBand,
    output_file: &Path,
) -> Result<(), Box<dyn Error>> {
    let plot_config = build_scatter_config(samples, in_band, band);
    draw_single_plot(
        output_file,
        "Torque/Speed",
        (SCATTER_PLOT_WIDTH, SCATTER_PLOT_HEIGHT),
        plot_config.as_ref(),
    )
}


// src/plot_functions/plot_torque_vs_speed.rs
