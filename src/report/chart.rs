//! Chart rendering.
//!
//! Draws the duration and satisfiability curves as two stacked panels of a
//! single image. All layout comes from an explicit [`ChartOptions`] value.

use crate::cli::ChartFormat;
use crate::config::ChartConfig;
use crate::error::{Result, VizError};
use crate::models::RatioSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const X_AXIS_LABEL: &str = "L/N ratio";
const DURATION_TITLE: &str = "Average 3SAT Solving Duration vs Clause-to-Variable Ratio";
const DURATION_AXIS_LABEL: &str = "Average Duration (ms)";
const FRACTION_TITLE: &str = "3SAT Probability of Satisfiability vs Clause-to-Variable Ratio";
const FRACTION_AXIS_LABEL: &str = "Probability of Satisfiable Formulas";

/// Image size, format and destination.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub format: ChartFormat,
    pub output: PathBuf,
}

impl ChartOptions {
    /// Options for charting `input` under the given chart settings.
    pub fn from_config(config: &ChartConfig, input: &Path) -> Self {
        Self {
            width: config.width,
            height: config.height,
            format: config.format,
            output: config.output_path(input),
        }
    }
}

/// A rendered chart image.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub path: PathBuf,
    pub format: ChartFormat,
    /// Points plotted per panel.
    pub points: usize,
}

/// One panel of the stacked figure.
struct Panel<'a> {
    title: &'a str,
    y_label: &'a str,
    y_range: Range<f64>,
    points: Vec<(f64, f64)>,
    color: RGBColor,
}

/// Draws ratio series into an image file.
pub struct ChartRenderer {
    options: ChartOptions,
}

impl ChartRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    /// Render both panels and write the image.
    pub fn render(&self, series: &RatioSeries) -> Result<ChartHandle> {
        if series.is_empty() {
            return Err(VizError::EmptyDataset);
        }

        let size = (self.options.width, self.options.height);
        debug!(
            "Rendering {} points at {}x{} as {:?}",
            series.len(),
            size.0,
            size.1,
            self.options.format
        );

        let format = self.options.format;
        write_image(&self.options.output, format, |staged| match format {
            ChartFormat::Png => {
                let root = BitMapBackend::new(staged, size).into_drawing_area();
                draw_charts(&root, series)
            }
            ChartFormat::Svg => {
                let root = SVGBackend::new(staged, size).into_drawing_area();
                draw_charts(&root, series)
            }
        })?;

        info!("Chart written to {}", self.options.output.display());

        Ok(ChartHandle {
            path: self.options.output.clone(),
            format: self.options.format,
            points: series.len(),
        })
    }
}

/// Run `draw` against a staging file next to `output`, then move it into
/// place. On failure neither the staging file nor any directory created for
/// it is left behind, and an existing `output` is untouched.
fn write_image<F>(output: &Path, format: ChartFormat, draw: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let created = create_missing_dirs(dir)?;

    let result = stage_and_persist(output, dir, format, draw);
    if result.is_err() {
        if let Some(created) = created {
            if let Err(e) = fs::remove_dir_all(&created) {
                warn!("Failed to remove {}: {}", created.display(), e);
            }
        }
    }
    result
}

fn stage_and_persist<F>(output: &Path, dir: &Path, format: ChartFormat, draw: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let write_err = |source| VizError::ChartWrite {
        path: output.to_path_buf(),
        source,
    };

    // The backend picks its encoder from the file extension
    let staged = tempfile::Builder::new()
        .prefix(".satviz-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(dir)
        .map_err(write_err)?;

    draw(staged.path())?;

    staged.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Create `dir` and any missing ancestors; returns the topmost one created.
fn create_missing_dirs(dir: &Path) -> Result<Option<PathBuf>> {
    if dir.exists() {
        return Ok(None);
    }

    let mut topmost = dir.to_path_buf();
    while let Some(parent) = topmost.parent() {
        if parent.as_os_str().is_empty() || parent.exists() {
            break;
        }
        topmost = parent.to_path_buf();
    }

    fs::create_dir_all(dir).map_err(|source| VizError::ChartWrite {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(Some(topmost))
}

fn draw_charts<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, series: &RatioSeries) -> Result<()> {
    root.fill(&WHITE).map_err(VizError::render)?;
    let panels = root.split_evenly((2, 1));

    let x_range = ratio_axis_range(series.ratios());

    let duration = Panel {
        title: DURATION_TITLE,
        y_label: DURATION_AXIS_LABEL,
        y_range: 0.0..duration_axis_max(series.mean_durations()),
        points: series.duration_points(),
        color: BLUE,
    };
    draw_panel(&panels[0], &duration, x_range.clone())?;

    let fraction = Panel {
        title: FRACTION_TITLE,
        y_label: FRACTION_AXIS_LABEL,
        y_range: 0.0..1.0,
        points: series.fraction_points(),
        color: RED,
    };
    draw_panel(&panels[1], &fraction, x_range)?;

    root.present().map_err(VizError::render)?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel<'_>,
    x_range: Range<f64>,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, panel.y_range.clone())
        .map_err(VizError::render)?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(panel.y_label)
        .draw()
        .map_err(VizError::render)?;

    let color = panel.color;
    chart
        .draw_series(LineSeries::new(
            panel.points.iter().copied(),
            color.stroke_width(2),
        ))
        .map_err(VizError::render)?;
    chart
        .draw_series(
            panel
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )
        .map_err(VizError::render)?;

    Ok(())
}

/// Horizontal span covering every ratio, with a small margin.
fn ratio_axis_range(ratios: &[f64]) -> Range<f64> {
    let min = ratios.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if max - min < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }

    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Upper bound of the duration axis; the axis always starts at zero.
fn duration_axis_max(durations: &[f64]) -> f64 {
    let max = durations.iter().copied().fold(0.0f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}
