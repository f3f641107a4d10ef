use chrono::{DateTime, NaiveDateTime, Timelike};
use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::CounterColors;
use crate::data::model::{CounterTable, RidershipTable};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

/// How a chart turns a record's timestamp into an x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAxis {
    /// Hour of the day, 0..24.
    HourOfDay,
    /// Days since 1970-01-01.
    Days,
}

impl TimeAxis {
    pub fn x(self, t: NaiveDateTime) -> f64 {
        match self {
            TimeAxis::HourOfDay => t.hour() as f64 + t.minute() as f64 / 60.0,
            TimeAxis::Days => t.and_utc().timestamp() as f64 / SECONDS_PER_DAY,
        }
    }

    pub fn label(self, x: f64, date_format: &str) -> String {
        match self {
            TimeAxis::HourOfDay => hour_label(x),
            TimeAxis::Days => DateTime::from_timestamp((x * SECONDS_PER_DAY) as i64, 0)
                .map(|dt| dt.format(date_format).to_string())
                .unwrap_or_default(),
        }
    }
}

/// `7 AM`, `12 PM`, `11 PM`.
pub fn hour_label(x: f64) -> String {
    let hour = (x.floor() as i64).rem_euclid(24);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h12} {suffix}")
}

/// One (name, colour, points) triple per counter, points sorted by x.
pub fn series(
    table: &RidershipTable,
    counters: &CounterTable,
    colors: Option<&CounterColors>,
    axis: TimeAxis,
) -> Vec<(String, Color32, Vec<[f64; 2]>)> {
    table
        .series_by_counter()
        .into_iter()
        .map(|(id, records)| {
            let name = counters
                .get(id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string());
            let color = colors.map(|c| c.color_for(id)).unwrap_or(Color32::LIGHT_BLUE);
            let mut points: Vec<[f64; 2]> = records
                .iter()
                .map(|r| [axis.x(r.display_time), r.count])
                .collect();
            points.sort_by(|a, b| a[0].total_cmp(&b[0]));
            (name, color, points)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ridership charts (central panel)
// ---------------------------------------------------------------------------

/// Render the hourly, weekly and historical charts.
pub fn ridership_charts(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a data directory to view ridership  (File → Open…)");
        });
        return;
    };
    let colors = state.colors.as_ref();

    ui.heading("average hourly ridership");
    line_chart(
        ui,
        "hourly_chart",
        &view.hourly,
        &view.counters,
        colors,
        TimeAxis::HourOfDay,
        "riders per hour",
        "%-I %p",
    );

    ui.heading("average weekly ridership");
    line_chart(
        ui,
        "weekly_chart",
        &view.weekly,
        &view.counters,
        colors,
        TimeAxis::Days,
        "riders per week",
        "%d %b",
    );

    ui.heading("historical weekly ridership");
    line_chart(
        ui,
        "historical_chart",
        &view.historical,
        &view.counters,
        colors,
        TimeAxis::Days,
        "riders per week",
        "%b-%Y",
    );
}

#[allow(clippy::too_many_arguments)]
fn line_chart(
    ui: &mut Ui,
    id: &str,
    table: &RidershipTable,
    counters: &CounterTable,
    colors: Option<&CounterColors>,
    axis: TimeAxis,
    y_label: &str,
    date_format: &'static str,
) {
    if table.is_empty() {
        ui.label("No records for this selection.");
        return;
    }
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark: GridMark, _range| axis.label(mark.value, date_format))
        .label_formatter(move |name, value| {
            format!("{name}\n{}: {:.0}", axis.label(value.x, date_format), value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (name, color, points) in series(table, counters, colors, axis) {
                let line = Line::new(PlotPoints::from(points))
                    .name(&name)
                    .color(color)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
