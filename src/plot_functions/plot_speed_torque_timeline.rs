// src/plot_functions/plot_speed_torque_timeline.rs

use std::error::Error;
use std::path::Path;

use crate::constants::{
    COLOR_SPEED, COLOR_TORQUE, COLOR_VIBRATION_RANGE, LINE_WIDTH_PLOT, SERIES_OPACITY,
    TIMELINE_PLOT_HEIGHT, TIMELINE_PLOT_WIDTH, VEHICLE_NAME, VIBRATION_RANGE_OPACITY,
};
use crate::data_analysis::speed_band::SpeedBand;
use crate::data_input::log_data::Sample;
use crate::plot_framework::{
    calculate_range, data_extent, draw_stacked_plot, exact_or_padded_range, BandOrientation,
    PlotConfig, PlotSeries, SeriesStyle, ShadedBand,
};

pub fn timeline_title(drive_name: &str) -> String {
    format!("{VEHICLE_NAME} Steering Analysis - {drive_name}")
}

/// Speed and torque panels sharing one time axis. The speed panel's y range
/// always covers the shaded vibration range.
pub fn build_timeline_panels(samples: &[Sample], band: SpeedBand) -> Option<[PlotConfig; 2]> {
    let (time_min, time_max) = data_extent(samples.iter().map(|s| s.elapsed_time))?;
    let x_range = exact_or_padded_range(time_min, time_max);

    let (speed_min, speed_max) = data_extent(samples.iter().map(|s| s.speed_kph))?;
    let (speed_axis_min, speed_axis_max) =
        calculate_range(speed_min.min(band.min_kph), speed_max.max(band.max_kph));

    let (torque_min, torque_max) = data_extent(samples.iter().map(|s| s.steering_torque))?;
    let (torque_axis_min, torque_axis_max) = calculate_range(torque_min, torque_max);

    let speed_panel = PlotConfig {
        title: "Vehicle Speed".to_string(),
        x_range: x_range.clone(),
        y_range: speed_axis_min..speed_axis_max,
        series: vec![PlotSeries {
            data: samples.iter().map(|s| (s.elapsed_time, s.speed_kph)).collect(),
            label: "Speed".to_string(),
            color: *COLOR_SPEED,
            opacity: SERIES_OPACITY,
            style: SeriesStyle::Line {
                stroke_width: LINE_WIDTH_PLOT,
            },
        }],
        bands: vec![ShadedBand {
            min: band.min_kph,
            max: band.max_kph,
            orientation: BandOrientation::Horizontal,
            color: *COLOR_VIBRATION_RANGE,
            opacity: VIBRATION_RANGE_OPACITY,
            label: "Vibration Range".to_string(),
        }],
        x_label: "Time (seconds)".to_string(),
        y_label: "Speed (km/h)".to_string(),
    };

    let torque_panel = PlotConfig {
        title: "Steering Torque".to_string(),
        x_range,
        y_range: torque_axis_min..torque_axis_max,
        series: vec![PlotSeries {
            data: samples
                .iter()
                .map(|s| (s.elapsed_time, s.steering_torque))
                .collect(),
            label: String::new(),
            color: *COLOR_TORQUE,
            opacity: SERIES_OPACITY,
            style: SeriesStyle::Line {
                stroke_width: LINE_WIDTH_PLOT,
            },
        }],
        bands: Vec::new(),
        x_label: "Time (seconds)".to_string(),
        y_label: "Steering Torque (Nm)".to_string(),
    };

    Some([speed_panel, torque_panel])
}

/// Generates the stacked speed/torque time-series plot for one drive.
pub fn plot_speed_torque_timeline(
    samples: &[Sample],
    band: SpeedBand,
    output_file: &Path,
    drive_name: &str,
) -> Result<(), Box<dyn Error>> {
    let panels: [Option<PlotConfig>; 2] = match build_timeline_panels(samples, band) {
        Some([speed_panel, torque_panel]) => [Some(speed_panel), Some(torque_panel)],
        None => [None, None],
    };

    draw_stacked_plot(
        output_file,
        &timeline_title(drive_name),
        "Speed/Torque",
        (TIMELINE_PLOT_WIDTH, TIMELINE_PLOT_HEIGHT),
        &panels,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: SpeedBand = SpeedBand::new(9.0, 18.0);

    fn sample(elapsed_time: f64, speed_kph: f64, steering_torque: f64) -> Sample {
        Sample {
            elapsed_time,
            speed_kph,
            steering_torque,
            ..Sample::default()
        }
    }

    #[test]
    fn test_panels_share_time_axis() {
        let samples = vec![sample(0.0, 5.0, 0.1), sample(1.0, 12.0, -0.3), sample(2.0, 25.0, 0.5)];
        let [speed, torque] = build_timeline_panels(&samples, BAND).unwrap();

        assert_eq!(speed.x_range, 0.0..2.0);
        assert_eq!(torque.x_range, speed.x_range);
        assert_eq!(speed.series[0].data[1], (1.0, 12.0));
        assert_eq!(torque.series[0].data[2], (2.0, 0.5));
    }

    #[test]
    fn test_speed_axis_covers_vibration_range() {
        let samples = vec![sample(0.0, 40.0, 0.0), sample(1.0, 50.0, 0.0)];
        let [speed, _] = build_timeline_panels(&samples, BAND).unwrap();

        assert!(speed.y_range.start < 9.0);
        assert!(speed.y_range.end > 50.0);
        assert_eq!(speed.bands.len(), 1);
        assert_eq!(speed.bands[0].orientation, BandOrientation::Horizontal);
        assert_eq!(speed.bands[0].label, "Vibration Range");
    }

    #[test]
    fn test_single_sample_gets_padded_time_axis() {
        let samples = vec![sample(0.0, 10.0, 0.2)];
        let [speed, torque] = build_timeline_panels(&samples, BAND).unwrap();
        assert!(speed.has_valid_ranges());
        assert!(torque.has_valid_ranges());
    }

    #[test]
    fn test_no_samples_yields_no_panels() {
        assert!(build_timeline_panels(&[], BAND).is_none());
    }

    #[test]
    fn test_title_names_drive() {
        assert_eq!(
            timeline_title("2024-01-02--10-00-00"),
            "Honda City Steering Analysis - 2024-01-02--10-00-00"
        );
    }
}

// src/plot_functions/plot_speed_torque_timeline.rs
