//! Grouped bar charts: one facet per system, scenarios along the x axis,
//! one bar colour per install method.

use crate::context::{InstallMethod, System};
use crate::dataset::{Dataset, Record};
use crate::errors::{ReportError, Result};
use crate::layout::{self, Layout};
use crate::palette::Palette;
use crate::scenario::Scenario;
use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DIM_GRAY: RGBColor = RGBColor(105, 105, 105);
const FONT: &str = "sans-serif";
/// Share of each scenario slot covered by bars.
const GROUP_WIDTH: f64 = 0.8;
/// Smallest drawable plot inside a facet, in pixels.
const MIN_PLOT_PX: u32 = 40;

/// Performance variable plotted by one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Metric {
    Latency,
    Bandwidth,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Latency, Metric::Bandwidth];

    /// Value of the `pvar` column for this metric.
    pub fn pvar(self) -> &'static str {
        match self {
            Metric::Latency => "latency",
            Metric::Bandwidth => "bandwidth",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Metric::Latency => "MPI Latency Comparison (Lower is Better)",
            Metric::Bandwidth => "MPI Bandwidth Comparison (Higher is Better)",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            Metric::Latency => "Latency (µs)",
            Metric::Bandwidth => "Bandwidth (MB/s)",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Metric::Latency => "latency_comparison.png",
            Metric::Bandwidth => "bandwidth_comparison.png",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Metric::Latency => Palette::Viridis,
            Metric::Bandwidth => Palette::Mako,
        }
    }

    /// Bar annotation, e.g. `4.02` for latency and `9876.5` for bandwidth.
    pub fn format_value(self, v: f64) -> String {
        match self {
            Metric::Latency => format!("{v:.2}"),
            Metric::Bandwidth => format!("{v:.1}"),
        }
    }

    fn annotation_pt(self) -> f64 {
        match self {
            Metric::Latency => 7.0,
            Metric::Bandwidth => 6.0,
        }
    }
}

/// Figure geometry and output location.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub out_dir: PathBuf,
    pub dpi: u32,
    /// Facet height in inches.
    pub facet_height: f64,
    /// Facet width over height.
    pub aspect: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            dpi: 150,
            facet_height: 5.0,
            aspect: 1.25,
        }
    }
}

impl ChartOptions {
    /// Points to pixels at the configured resolution.
    pub fn px(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }

    /// Whole figure in pixels, with room for the title and legend.
    pub fn figure_size(&self, facets: usize) -> (u32, u32) {
        let facet_h = self.facet_height * self.dpi as f64;
        let facet_w = facet_h * self.aspect;
        let w = facet_w * facets.max(1) as f64 / (layout::Margins::TIGHT.right - layout::Margins::TIGHT.left);
        let h = facet_h / (layout::Margins::TIGHT.top - layout::Margins::TIGHT.bottom);
        (w.round() as u32, h.round() as u32)
    }

    fn x_label_area(&self) -> u32 {
        self.px(26.0) as u32
    }

    fn y_label_area(&self) -> u32 {
        self.px(40.0) as u32
    }

    fn min_facet(&self) -> (u32, u32) {
        (
            self.y_label_area() + MIN_PLOT_PX,
            self.x_label_area() + self.px(14.0) as u32 + MIN_PLOT_PX,
        )
    }
}

/// One bar: the mean of a `(system, scenario, install method)` group.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub scenario: Scenario,
    pub install_method: InstallMethod,
    /// Index into [`ChartData::hues`].
    pub hue: usize,
    pub value: f64,
}

impl Bar {
    /// Horizontal extent on an axis where scenario `i` spans `[i, i + 1)`.
    pub fn span(&self, hues: usize) -> (f64, f64) {
        let slot = self.scenario.canonical_index().unwrap_or(0) as f64;
        let width = GROUP_WIDTH / hues.max(1) as f64;
        let x0 = slot + (1.0 - GROUP_WIDTH) / 2.0 + self.hue as f64 * width;
        (x0, x0 + width)
    }

    fn center(&self, hues: usize) -> f64 {
        let (x0, x1) = self.span(hues);
        (x0 + x1) / 2.0
    }

    fn is_annotated(&self) -> bool {
        !self.value.is_nan() && self.value != 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub system: System,
    /// Ordered by canonical scenario, then hue.
    pub bars: Vec<Bar>,
}

impl Facet {
    /// Y range with headroom for the annotations. Never empty.
    pub fn y_range(&self) -> (f64, f64) {
        let lo = self.bars.iter().map(|b| b.value).fold(0.0_f64, f64::min);
        let hi = self.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        if hi - lo <= 0.0 {
            return (0.0, 1.0);
        }
        let pad = (hi - lo) * 0.15;
        (if lo < 0.0 { lo - pad } else { 0.0 }, hi + pad)
    }
}

/// Everything needed to draw one metric, already grouped.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub metric: Metric,
    /// Install methods in first-seen order.
    pub hues: Vec<InstallMethod>,
    /// Systems in first-seen order.
    pub facets: Vec<Facet>,
}

impl ChartData {
    /// Group `records` (all of one metric). Rows with an `Unknown` scenario
    /// still decide which facets and hues exist but are not drawn.
    pub fn group<'a>(metric: Metric, records: impl IntoIterator<Item = &'a Record>) -> Self {
        let records: Vec<&Record> = records.into_iter().collect();
        let systems: Vec<System> = records.iter().map(|r| r.system).unique().collect();
        let hues: Vec<InstallMethod> = records.iter().map(|r| r.install_method).unique().collect();

        let groups: HashMap<(System, Scenario, InstallMethod), Vec<f64>> = records
            .iter()
            .filter(|r| r.scenario != Scenario::Unknown)
            .map(|r| ((r.system, r.scenario, r.install_method), r.pval))
            .into_group_map();

        let facets = systems
            .into_iter()
            .map(|system| {
                let bars = Scenario::CANONICAL
                    .into_iter()
                    .cartesian_product(hues.iter().copied().enumerate())
                    .filter_map(|(scenario, (hue, install_method))| {
                        let values = groups.get(&(system, scenario, install_method))?;
                        let value = values.iter().sum::<f64>() / values.len() as f64;
                        Some(Bar { scenario, install_method, hue, value })
                    })
                    .collect();
                Facet { system, bars }
            })
            .collect();

        ChartData { metric, hues, facets }
    }
}

/// What happened to one metric's chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Saved(PathBuf),
    /// No rows for the metric; nothing was written.
    Skipped,
}

fn chart_err<E: std::fmt::Display>(e: E) -> ReportError {
    ReportError::Chart(e.to_string())
}

/// Render the chart for `metric` into `options.out_dir`.
pub fn render_metric(dataset: &Dataset, metric: Metric, options: &ChartOptions) -> Result<RenderOutcome> {
    let records: Vec<&Record> = dataset.for_metric(metric.pvar()).collect();
    if records.is_empty() {
        tracing::warn!("No {} data found to plot.", metric.pvar());
        return Ok(RenderOutcome::Skipped);
    }
    let data = ChartData::group(metric, records);
    let path = options.out_dir.join(metric.file_name());
    draw(&data, &path, options)?;
    tracing::info!("{} plot saved as {}", metric.pvar(), path.display());
    Ok(RenderOutcome::Saved(path))
}

/// Draw `data` to a PNG at `path`.
pub fn draw(data: &ChartData, path: &Path, options: &ChartOptions) -> Result<()> {
    let size = options.figure_size(data.facets.len());
    let layout = layout::fit_or_fallback(size, data.facets.len(), options.min_facet());
    let colors = data.metric.palette().colors(data.hues.len());

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let title_style = TextStyle::from((FONT, options.px(16.0)).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        data.metric.title(),
        ((size.0 / 2) as i32, (layout.top_px / 2) as i32),
        title_style,
    ))
    .map_err(chart_err)?;

    let grid = root.margin(layout.top_px, layout.bottom_px, layout.left_px, layout.right_px);
    let cells = grid.split_evenly((1, data.facets.len().max(1)));
    for (cell, facet) in cells.iter().zip(&data.facets) {
        draw_facet(cell, facet, data, &colors, options)?;
    }

    draw_legend(&root, data, &colors, &layout, options)?;
    root.present().map_err(chart_err)?;
    Ok(())
}

fn scenario_label(x: f64) -> String {
    let slot = x - 0.5;
    if (slot - slot.round()).abs() > 1e-6 {
        return String::new();
    }
    Scenario::CANONICAL
        .get(slot.round() as usize)
        .filter(|_| slot >= 0.0)
        .map(|s| s.as_str().to_string())
        .unwrap_or_default()
}

fn draw_facet<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    facet: &Facet,
    data: &ChartData,
    colors: &[RGBColor],
    options: &ChartOptions,
) -> Result<()> {
    let slots = Scenario::CANONICAL.len();
    let hues = data.hues.len();
    let (y_lo, y_hi) = facet.y_range();

    let mut chart = ChartBuilder::on(area)
        .caption(facet.system.as_str(), (FONT, options.px(12.0)))
        .margin(options.px(4.0) as u32)
        .x_label_area_size(options.x_label_area())
        .y_label_area_size(options.y_label_area())
        .build_cartesian_2d(0f64..slots as f64, y_lo..y_hi)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(2 * slots + 1)
        .x_label_formatter(&|x| scenario_label(*x))
        .x_desc("Test Scenario")
        .y_desc(data.metric.y_label())
        .label_style((FONT, options.px(8.0)))
        .axis_desc_style((FONT, options.px(10.0)))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(facet.bars.iter().map(|b| {
            let (x0, x1) = b.span(hues);
            Rectangle::new([(x0, 0.0), (x1, b.value)], colors[b.hue].filled())
        }))
        .map_err(chart_err)?;

    let label_style = TextStyle::from((FONT, options.px(data.metric.annotation_pt())).into_font())
        .color(&DIM_GRAY)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let offset = options.px(5.0) as i32;
    chart
        .draw_series(facet.bars.iter().filter(|b| b.is_annotated()).map(|b| {
            EmptyElement::at((b.center(hues), b.value))
                + Text::new(data.metric.format_value(b.value), (0, -offset), label_style.clone())
        }))
        .map_err(chart_err)?;

    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &ChartData,
    colors: &[RGBColor],
    layout: &Layout,
    options: &ChartOptions,
) -> Result<()> {
    let x = layout.legend_x() + options.px(8.0) as i32;
    let line = options.px(14.0) as i32;
    let swatch = options.px(8.0) as i32;
    let mut y = (layout.height / 2) as i32 - line * (data.hues.len() as i32 + 1) / 2;

    let style = TextStyle::from((FONT, options.px(10.0)).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    root.draw(&Text::new("install_method", (x, y), style.clone()))
        .map_err(chart_err)?;

    for (method, color) in data.hues.iter().zip(colors) {
        y += line;
        root.draw(&Rectangle::new(
            [(x, y - swatch / 2), (x + swatch, y + swatch / 2)],
            color.filled(),
        ))
        .map_err(chart_err)?;
        root.draw(&Text::new(method.as_str(), (x + swatch + swatch / 2, y), style.clone()))
            .map_err(chart_err)?;
    }
    Ok(())
}
