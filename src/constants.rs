// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREEN, GREY, ORANGE, RED};
use plotters::style::RGBColor;

// --- Input/Output Layout ---
pub const DEFAULT_LOG_ROOT: &str = "/data/media/0/realdata";
pub const DEFAULT_OUTPUT_ROOT: &str = "./steering_analysis";
pub const LOG_FILE_NAME: &str = "rlog.zst";
pub const EXCLUDED_DRIVE_DIR: &str = "boot";
pub const MAX_RECENT_DRIVES: usize = 5;
pub const SUMMARY_FILE_NAME: &str = "summary.json";
pub const TIMELINE_PLOT_FILE_NAME: &str = "analysis.png";
pub const SCATTER_PLOT_FILE_NAME: &str = "scatter.png";

// --- Log Decoding ---
pub const CAR_STATE_EVENT: &str = "carState";
pub const NANOS_PER_SECOND: f64 = 1e9;
// vEgo is logged in m/s.
pub const MS_TO_KPH: f64 = 3.6;

// --- Vibration Range ---
// Speed interval (inclusive) where the steering vibration shows up.
pub const VIBRATION_SPEED_MIN_KPH: f64 = 9.0;
pub const VIBRATION_SPEED_MAX_KPH: f64 = 18.0;

// carState is published at a fixed 100 Hz, so time in band is derived from
// the sample count instead of the timestamps.
pub const SAMPLES_PER_SECOND: f64 = 100.0;

pub const VEHICLE_NAME: &str = "Honda City";

// --- Plot Dimensions ---
pub const TIMELINE_PLOT_WIDTH: u32 = 1800;
pub const TIMELINE_PLOT_HEIGHT: u32 = 1200;
pub const SCATTER_PLOT_WIDTH: u32 = 1500;
pub const SCATTER_PLOT_HEIGHT: u32 = 900;

// --- Plot Color Assignments ---
pub const COLOR_SPEED: &RGBColor = &BLUE;
pub const COLOR_TORQUE: &RGBColor = &GREEN;
pub const COLOR_SCATTER_ALL: &RGBColor = &GREY;
pub const COLOR_SCATTER_IN_BAND: &RGBColor = &ORANGE;
pub const COLOR_VIBRATION_RANGE: &RGBColor = &RED;

pub const SERIES_OPACITY: f64 = 0.7;
pub const SCATTER_OPACITY: f64 = 0.6;
pub const VIBRATION_RANGE_OPACITY: f64 = 0.2;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const SCATTER_POINT_SIZE: u32 = 1;

// --- Font Sizes ---
pub const FONT_SIZE_MAIN_TITLE: i32 = 28;
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 16;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// src/constants.rs
