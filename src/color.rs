use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{CounterId, CounterTable};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#rrggbb` (or `rrggbb`) into a colour.
pub fn parse_color(s: &str) -> Option<Color32> {
    let rgb: Srgb<u8> = s.trim().parse().ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Color mapping: counter id → Color32
// ---------------------------------------------------------------------------

/// Colour of each counter, shared by the map, the charts and the legend.
#[derive(Debug, Clone)]
pub struct CounterColors {
    mapping: BTreeMap<CounterId, Color32>,
    default_color: Color32,
}

impl CounterColors {
    /// Use each counter's stored colour; counters whose colour does not parse
    /// get one from a generated palette.
    pub fn new(counters: &CounterTable) -> Self {
        let unparsed = counters
            .counters
            .iter()
            .filter(|c| parse_color(&c.color).is_none())
            .count();
        let mut fallback = generate_palette(unparsed).into_iter();

        let mapping = counters
            .counters
            .iter()
            .map(|c| {
                let color = parse_color(&c.color)
                    .or_else(|| fallback.next())
                    .unwrap_or(Color32::GRAY);
                (c.id.clone(), color)
            })
            .collect();

        if unparsed > 0 {
            log::warn!("{unparsed} counters have no usable colour; using generated ones");
        }

        CounterColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a counter.
    pub fn color_for(&self, id: &CounterId) -> Color32 {
        self.mapping.get(id).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CounterMetadata;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(parse_color("#1f77b4"), Some(Color32::from_rgb(0x1f, 0x77, 0xb4)));
        assert_eq!(parse_color("ff7f0e"), Some(Color32::from_rgb(0xff, 0x7f, 0x0e)));
        assert_eq!(parse_color("blue-ish"), None);
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn unusable_colours_fall_back_to_palette() {
        let c = |id: &str, color: &str| CounterMetadata {
            id: CounterId::new(id),
            name: id.to_string(),
            latitude: 0.0,
            longitude: 0.0,
            color: color.to_string(),
        };
        let table = CounterTable::new(vec![c("1", "#000000"), c("2", ""), c("3", "nope")]);
        let colors = CounterColors::new(&table);

        assert_eq!(colors.color_for(&CounterId::new("1")), Color32::from_rgb(0, 0, 0));
        let generated = generate_palette(2);
        assert_eq!(colors.color_for(&CounterId::new("2")), generated[0]);
        assert_eq!(colors.color_for(&CounterId::new("3")), generated[1]);
        assert_eq!(colors.color_for(&CounterId::new("9")), Color32::GRAY);
    }
}
