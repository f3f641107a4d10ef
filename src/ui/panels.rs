use chrono::NaiveDate;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::ui::map;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets and map
// ---------------------------------------------------------------------------

/// Render the left panel: counter choice, month range, map.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Bike ridership in NYC");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No data loaded.");
        return;
    };
    if dataset.counters.is_empty() {
        ui.label("The loaded data has no counters.");
        return;
    }

    // Clone what we need so we can mutate state inside the loops.
    let names = dataset.counters.names();
    let swatches: Vec<Option<Color32>> = names
        .iter()
        .map(|name| {
            let id = dataset.counters.ids_for_name(name).into_iter().next()?;
            Some(state.colors.as_ref()?.color_for(&id))
        })
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let (n_selected, fallback) = state
                .view
                .as_ref()
                .map(|v| (v.selection.names.len(), v.selection.is_fallback))
                .unwrap_or((0, false));
            let header_text = format!("select counters  ({n_selected}/{})", names.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("counters")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none();
                        }
                    });

                    if fallback {
                        ui.label(RichText::new("none chosen: showing all").italics());
                    }

                    for (name, swatch) in names.iter().zip(&swatches) {
                        let mut checked = state.input.counter_names.contains(name);
                        let mut text = RichText::new(name);
                        if let Some(c) = swatch {
                            text = text.color(*c);
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_counter(name);
                        }
                    }
                });

            ui.separator();
            month_sliders(ui, state);

            ui.separator();
            map::counter_map(ui, state);
        });
}

/// Start/end month sliders over the available months.
fn month_sliders(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = &state.view else {
        return;
    };
    let options: Vec<NaiveDate> = view.month_options.clone();
    let Some(last) = options.len().checked_sub(1) else {
        ui.label("No historical data for this selection.");
        return;
    };
    let position = |d: NaiveDate| options.iter().position(|o| *o == d);
    let (mut start, mut end) = match view.months {
        Some(m) => (position(m.start).unwrap_or(0), position(m.end).unwrap_or(last)),
        None => (0, last),
    };
    let window = view.window;

    ui.strong("select historical chart dates:");
    let label = |i: f64| {
        options
            .get(i as usize)
            .map(|d| d.format("%b-%Y").to_string())
            .unwrap_or_default()
    };
    let start_changed = ui
        .add(egui::Slider::new(&mut start, 0..=last).text("from").custom_formatter(|v, _| label(v)))
        .changed();
    let end_changed = ui
        .add(egui::Slider::new(&mut end, 0..=last).text("to").custom_formatter(|v, _| label(v)))
        .changed();

    if let Some(w) = window {
        ui.label(format!("{} – {}", w.start.format("%d %b %Y"), w.end.format("%d %b %Y")));
    }

    if start_changed || end_changed {
        state.set_months(options[start], options[end]);
    }
}

// ---------------------------------------------------------------------------
// Counter summary table
// ---------------------------------------------------------------------------

/// Visible counters with their hourly totals.
pub fn counter_table(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("counter");
            });
            header.col(|ui| {
                ui.strong("daily riders");
            });
            header.col(|ui| {
                ui.strong("location");
            });
        })
        .body(|mut body| {
            for marker in &view.markers {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        let color = state
                            .colors
                            .as_ref()
                            .map(|c| c.color_for(&marker.counter_id))
                            .unwrap_or(Color32::LIGHT_BLUE);
                        ui.label(RichText::new(&marker.name).color(color));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.0}", marker.total.round()));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.4}, {:.4}", marker.latitude, marker.longitude));
                    });
                });
            }
        });

    let riders: f64 = view.totals.values().sum();
    ui.label(format!("{riders:.0} riders across {} counters", view.totals.len()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data directory…").clicked() {
                open_dir_dialog(state);
                ui.close_menu();
            }
            if let Some(dir) = state.data_dir.clone() {
                if ui.button("Reload").clicked() {
                    state.load_dir(&dir);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} counters, {} of {} records visible",
                view.counters.len(),
                view.hourly.len() + view.weekly.len() + view.historical.len(),
                ds.record_count()
            ));
            if let Some(t) = ds.retrieved_at {
                ui.separator();
                ui.label(format!("data retrieved {}", t.format("%Y-%m-%d %H:%M")));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_dir_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open bike counter data directory")
        .pick_folder();

    if let Some(path) = dir {
        state.load_dir(&path);
    }
}
