// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{FONT_SIZE_MESSAGE, LINE_WIDTH_LEGEND};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MAIN_TITLE,
    FONT_TUPLE_MESSAGE,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Min and max of the finite values, or `None` if there are none.
pub fn data_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |extent, v| match extent {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Exact range for an axis such as time, padded only when it would be empty.
pub fn exact_or_padded_range(min_val: f64, max_val: f64) -> Range<f64> {
    if max_val > min_val {
        min_val..max_val
    } else {
        let (min, max) = calculate_range(min_val, max_val);
        min..max
    }
}

/// Tick label formatting shared by both axes: one decimal for fractional
/// values, whole numbers otherwise.
pub fn format_tick_label(value: f64) -> String {
    if value.fract() != 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.0}")
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_title: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{plot_title} Data Unavailable: {reason}");

    let estimated_text_width =
        (message.len() as f32 * FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let center_x = width / 2 - estimated_text_width / 2;
    let center_y = height / 2 - FONT_SIZE_MESSAGE / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeriesStyle {
    Line { stroke_width: u32 },
    Scatter { point_size: u32 },
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub opacity: f64, // 0.0 to 1.0
    pub style: SeriesStyle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BandOrientation {
    /// Spans the full x range between two y values.
    Horizontal,
    /// Spans the full y range between two x values.
    Vertical,
}

/// A value range to be shaded on the plot (e.g., the vibration speed range).
#[derive(Clone)]
pub struct ShadedBand {
    pub min: f64,
    pub max: f64,
    pub orientation: BandOrientation,
    pub color: RGBColor,
    pub opacity: f64, // 0.0 to 1.0
    pub label: String,
}

impl ShadedBand {
    /// Corner coordinates of the band, clamped to the chart ranges.
    pub fn corners(&self, x_range: &Range<f64>, y_range: &Range<f64>) -> [(f64, f64); 2] {
        match self.orientation {
            BandOrientation::Horizontal => [
                (x_range.start, self.min.clamp(y_range.start, y_range.end)),
                (x_range.end, self.max.clamp(y_range.start, y_range.end)),
            ],
            BandOrientation::Vertical => [
                (self.min.clamp(x_range.start, x_range.end), y_range.start),
                (self.max.clamp(x_range.start, x_range.end), y_range.end),
            ],
        }
    }
}

#[derive(Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub bands: Vec<ShadedBand>,
    pub x_label: String,
    pub y_label: String,
}

impl PlotConfig {
    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.data.is_empty())
    }

    pub fn has_valid_ranges(&self) -> bool {
        self.x_range.end > self.x_range.start && self.y_range.end > self.y_range.start
    }
}

/// Draws a single chart from a `PlotConfig`: bands first, then series, then the legend.
fn draw_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&plot_config.title, FONT_TUPLE_CHART_TITLE)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(plot_config.x_range.clone(), plot_config.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&plot_config.x_label)
        .y_desc(&plot_config.y_label)
        .x_labels(15)
        .y_labels(10)
        .x_label_formatter(&|x| format_tick_label(*x))
        .y_label_formatter(&|y| format_tick_label(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let mut legend_series_count = 0;

    // Shading goes underneath the data.
    for band in &plot_config.bands {
        let fill = band.color.mix(band.opacity);
        let corners = band.corners(&plot_config.x_range, &plot_config.y_range);
        let drawn = chart.draw_series(std::iter::once(Rectangle::new(corners, fill.filled())))?;
        if !band.label.is_empty() {
            drawn.label(&band.label).legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 20, y + 6)], fill.filled())
            });
            legend_series_count += 1;
        }
    }

    for s in &plot_config.series {
        if s.data.is_empty() {
            continue;
        }
        let color = s.color.mix(s.opacity);
        match s.style {
            SeriesStyle::Line { stroke_width } => {
                let drawn = chart.draw_series(LineSeries::new(
                    s.data.iter().copied(),
                    color.stroke_width(stroke_width),
                ))?;
                if !s.label.is_empty() {
                    drawn.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 20, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                    legend_series_count += 1;
                }
            }
            SeriesStyle::Scatter { point_size } => {
                let drawn = chart.draw_series(
                    s.data
                        .iter()
                        .map(|&point| Circle::new(point, point_size, color.filled())),
                )?;
                if !s.label.is_empty() {
                    drawn
                        .label(&s.label)
                        .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
                    legend_series_count += 1;
                }
            }
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }

    Ok(())
}

/// Draws `plot_config` into `area`, or a placeholder message when it has nothing to show.
/// Returns whether a chart was drawn.
fn draw_chart_or_placeholder(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type_name: &str,
    plot_config: Option<&PlotConfig>,
) -> Result<bool, Box<dyn Error>> {
    match plot_config {
        Some(config) if config.has_data() && config.has_valid_ranges() => {
            draw_chart(area, config)?;
            Ok(true)
        }
        Some(config) => {
            let reason = if !config.has_data() {
                "No data points"
            } else {
                "Invalid ranges"
            };
            draw_unavailable_message(area, &config.title, reason)?;
            Ok(false)
        }
        None => {
            draw_unavailable_message(area, plot_type_name, "Data Extraction Failed")?;
            Ok(false)
        }
    }
}

/// Creates an image with the panels stacked vertically under a main title.
/// Panels share the full image width; `None` panels get a placeholder message.
pub fn draw_stacked_plot(
    output_path: &Path,
    main_title: &str,
    plot_type_name: &str,
    size: (u32, u32),
    panels: &[Option<PlotConfig>],
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        main_title,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((panels.len().max(1), 1));

    let mut any_panel_plotted = false;
    for (area, panel) in sub_plot_areas.iter().zip(panels) {
        any_panel_plotted |= draw_chart_or_placeholder(area, plot_type_name, panel.as_ref())?;
    }

    root_area.present()?;
    if !any_panel_plotted {
        println!(
            "  '{}' contains only placeholder messages: no panel had data to plot.",
            output_path.display()
        );
    }
    Ok(())
}

/// Creates an image holding one chart.
pub fn draw_single_plot(
    output_path: &Path,
    plot_type_name: &str,
    size: (u32, u32),
    plot_config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    draw_chart_or_placeholder(&root_area, plot_type_name, plot_config)?;
    root_area.present()?;
    Ok(())
}


// src/plot_framework.rs
