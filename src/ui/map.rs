use eframe::egui::{Color32, Ui};
use egui_plot::{MarkerShape, Plot, Points};

use crate::state::AppState;

/// Longitude degrees shrink with latitude; at New York's ~40.7°N one degree
/// of latitude spans about 1.32 degrees of longitude.
const NYC_DATA_ASPECT: f32 = 1.32;
const MIN_MARKER_RADIUS: f32 = 2.0;
const MAX_MARKER_RADIUS: f32 = 40.0;

/// Screen radius of a marker, kept visible and bounded.
pub fn marker_radius(radius: f64) -> f32 {
    (radius as f32).clamp(MIN_MARKER_RADIUS, MAX_MARKER_RADIUS)
}

/// Render the counter map: one sized marker per visible counter.
pub fn counter_map(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        return;
    };

    Plot::new("counter_map")
        .height(ui.available_width().min(360.0))
        .data_aspect(NYC_DATA_ASPECT)
        .show_axes(false)
        .show_grid(false)
        .allow_scroll(false)
        .label_formatter(|name, _value| name.to_string())
        .show(ui, |plot_ui| {
            for marker in &view.markers {
                let color = state
                    .colors
                    .as_ref()
                    .map(|c| c.color_for(&marker.counter_id))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let points = Points::new(vec![[marker.longitude, marker.latitude]])
                    .name(marker.tooltip())
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(marker_radius(marker.radius))
                    .color(color);
                plot_ui.points(points);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_radius_is_clamped() {
        assert_eq!(marker_radius(0.0), MIN_MARKER_RADIUS);
        assert_eq!(marker_radius(12.5), 12.5);
        assert_eq!(marker_radius(5_000.0), MAX_MARKER_RADIUS);
    }
}
