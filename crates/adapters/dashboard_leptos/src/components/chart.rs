//! History chart drawn with `leptos-chartistry` SVG rendering.

use std::any::Any;

use chrono::{DateTime, Utc};
use frostwatch_app::ports::{ChartBackend, ChartError};
use frostwatch_domain::chart::{ChartSpec, PRIMARY_COLOUR, PRIMARY_LABEL, ReferenceLine};
use leptos::prelude::*;
use leptos_chartistry::*;
use web_sys::HtmlElement;

/// A single row of chart data.
#[derive(Debug, Clone, PartialEq)]
struct ChartRow {
    at: DateTime<Utc>,
    temperature: f64,
}

/// Parse a `#rrggbb` colour.
fn hex_colour(hex: &str) -> Option<Colour> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Colour::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn reference_line(line: ReferenceLine) -> Line<ChartRow, f64> {
    let value = line.value;
    Line::new(move |_: &ChartRow| value)
        .with_name(line.kind.label())
        .with_colour(hex_colour(line.kind.colour()))
        .with_width(1.5)
}

/// Build timestamp tick labels (extracted to avoid turbofish inside `view!` macro).
fn timestamp_ticks() -> TickLabels<DateTime<Utc>> {
    TickLabels::timestamps()
}

/// A chart mounted into the page; dropping it unmounts the SVG.
pub struct MountedChart {
    _handle: Box<dyn Any>,
}

/// [`ChartBackend`] rendering into the detail page's chart container.
pub struct ChartistryBackend {
    host: HtmlElement,
}

impl ChartistryBackend {
    pub fn new(host: HtmlElement) -> Self {
        Self { host }
    }
}

impl ChartBackend for ChartistryBackend {
    type Chart = MountedChart;

    fn draw(&self, spec: &ChartSpec) -> Result<MountedChart, ChartError> {
        if !self.host.is_connected() {
            return Err(ChartError("chart container is no longer in the page".to_string()));
        }

        let rows: Vec<ChartRow> = spec
            .points
            .iter()
            .map(|p| ChartRow {
                at: p.at,
                temperature: p.temperature,
            })
            .collect();

        let mut series = Series::new(|row: &ChartRow| row.at).line(
            Line::new(|row: &ChartRow| row.temperature)
                .with_name(PRIMARY_LABEL)
                .with_colour(hex_colour(PRIMARY_COLOUR))
                .with_width(2.0),
        );
        for line in &spec.reference_lines {
            series = series.line(reference_line(*line));
        }

        let data = Signal::derive(move || rows.clone());
        let handle = leptos::mount::mount_to(self.host.clone(), move || {
            let inner = vec![
                AxisMarker::left_edge().into_inner(),
                AxisMarker::bottom_edge().into_inner(),
                XGridLine::default().into_inner(),
                YGridLine::default().into_inner(),
                XGuideLine::over_data().into_inner(),
                YGuideLine::over_mouse().into_inner(),
            ];
            view! {
                <Chart
                    aspect_ratio=AspectRatio::from_env_width_apply_ratio(3.0)
                    top=Legend::start()
                    left=TickLabels::aligned_floats()
                    bottom=timestamp_ticks()
                    inner=inner
                    tooltip=Tooltip::left_cursor()
                    series=series
                    data=data
                />
            }
        });
        Ok(MountedChart {
            _handle: Box::new(handle),
        })
    }

    fn dispose(&self, chart: MountedChart) {
        drop(chart);
    }
}
