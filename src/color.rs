use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::rank::format_mass;

// ---------------------------------------------------------------------------
// Display tiers – magnitude → color, threshold tables
// ---------------------------------------------------------------------------

/// Mass thresholds in grams, descending. The first threshold a magnitude
/// meets or exceeds wins.
const METEORITE_THRESHOLDS: [f64; 5] = [500_000.0, 100_000.0, 50_000.0, 10_000.0, 5_000.0];
/// Diameter thresholds in km, descending.
const CRATER_THRESHOLDS: [f64; 5] = [200.0, 100.0, 50.0, 10.0, 5.0];

/// A selectable marker color scheme. Schemes are pure lookup tables evaluated
/// per render, so several can coexist without touching stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Default,
    BlueScale,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 2] = [ColorScheme::Default, ColorScheme::BlueScale];

    pub fn label(self) -> &'static str {
        match self {
            ColorScheme::Default => "Default",
            ColorScheme::BlueScale => "Blue scale",
        }
    }

    fn meteorite_palette(self) -> [Color32; 5] {
        match self {
            // red, orange, yellow, light yellow, white
            ColorScheme::Default => [
                Color32::from_rgba_unmultiplied(255, 0, 0, 153),
                Color32::from_rgba_unmultiplied(255, 165, 0, 153),
                Color32::from_rgba_unmultiplied(255, 255, 0, 153),
                Color32::from_rgba_unmultiplied(255, 255, 224, 153),
                Color32::from_rgba_unmultiplied(255, 255, 255, 153),
            ],
            // dark blue, blue, sky blue, cyan, light cyan
            ColorScheme::BlueScale => [
                Color32::from_rgba_unmultiplied(0, 0, 139, 153),
                Color32::from_rgba_unmultiplied(0, 0, 255, 153),
                Color32::from_rgba_unmultiplied(135, 206, 235, 153),
                Color32::from_rgba_unmultiplied(0, 255, 255, 153),
                Color32::from_rgba_unmultiplied(224, 255, 255, 153),
            ],
        }
    }

    fn crater_palette(self) -> [Color32; 5] {
        match self {
            // red, orange, yellow, light yellow, mint cream
            ColorScheme::Default => [
                Color32::from_rgba_unmultiplied(255, 0, 0, 204),
                Color32::from_rgba_unmultiplied(255, 165, 0, 204),
                Color32::from_rgba_unmultiplied(255, 255, 0, 204),
                Color32::from_rgba_unmultiplied(255, 255, 224, 204),
                Color32::from_rgba_unmultiplied(245, 255, 250, 204),
            ],
            // dark blue, blue, sky blue, light blue, mint cream
            ColorScheme::BlueScale => [
                Color32::from_rgba_unmultiplied(0, 0, 139, 204),
                Color32::from_rgba_unmultiplied(0, 0, 255, 204),
                Color32::from_rgba_unmultiplied(135, 206, 235, 204),
                Color32::from_rgba_unmultiplied(173, 216, 230, 204),
                Color32::from_rgba_unmultiplied(245, 255, 250, 204),
            ],
        }
    }

    /// Tier color for a meteorite mass in grams.
    pub fn meteorite_color(self, mass: f64) -> Color32 {
        tier_lookup(&METEORITE_THRESHOLDS, &self.meteorite_palette(), mass)
            .unwrap_or(Color32::from_rgba_unmultiplied(128, 128, 128, 153))
    }

    /// Tier color for a crater diameter in km.
    pub fn crater_color(self, diameter_km: f64) -> Color32 {
        tier_lookup(&CRATER_THRESHOLDS, &self.crater_palette(), diameter_km)
            .unwrap_or(Color32::from_rgba_unmultiplied(128, 128, 128, 204))
    }
}

/// Walk the descending threshold table; first threshold met or exceeded wins.
fn tier_lookup(thresholds: &[f64], palette: &[Color32], magnitude: f64) -> Option<Color32> {
    thresholds
        .iter()
        .zip(palette)
        .find(|(threshold, _)| magnitude >= **threshold)
        .map(|(_, color)| *color)
}

/// Legend label for the tier a mass lands in.
pub fn meteorite_tier_label(mass: f64) -> String {
    for threshold in METEORITE_THRESHOLDS {
        if mass >= threshold {
            return format!("≥ {}", format_mass(threshold));
        }
    }
    format!("< {}", format_mass(METEORITE_THRESHOLDS[4]))
}

/// Legend label for the tier a diameter lands in.
pub fn crater_tier_label(diameter_km: f64) -> String {
    for threshold in CRATER_THRESHOLDS {
        if diameter_km >= threshold {
            return format!("≥ {threshold} km");
        }
    }
    format!("< {} km", CRATER_THRESHOLDS[4])
}

// ---------------------------------------------------------------------------
// Marker sizing
// ---------------------------------------------------------------------------

/// Meteorite marker size in px, proportional to mass with a floor and cap.
pub fn meteorite_marker_size(mass: f64) -> f32 {
    ((mass / 10_000.0) as f32).clamp(5.0, 20.0)
}

/// Crater marker size in px, stepped by diameter.
pub fn crater_marker_size(diameter_km: f64) -> f32 {
    if diameter_km >= 300.0 {
        25.0
    } else if diameter_km >= 200.0 {
        22.0
    } else if diameter_km >= 100.0 {
        18.0
    } else if diameter_km >= 50.0 {
        14.0
    } else if diameter_km >= 10.0 {
        10.0
    } else {
        7.0
    }
}

// ---------------------------------------------------------------------------
// Color mode – scheme tiers or per-class categorical colors
// ---------------------------------------------------------------------------

/// How meteorite markers are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Scheme(ColorScheme),
    ByClass,
}

impl ColorMode {
    pub const ALL: [ColorMode; 3] = [
        ColorMode::Scheme(ColorScheme::Default),
        ColorMode::Scheme(ColorScheme::BlueScale),
        ColorMode::ByClass,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Scheme(scheme) => scheme.label(),
            ColorMode::ByClass => "By class",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-class categorical colors
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colors using evenly spaced hues.
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

/// Maps each meteorite classification to a distinct color.
#[derive(Debug, Clone, Default)]
pub struct ClassColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ClassColorMap {
    /// Build the map over the classification universe of a loaded catalogue.
    pub fn new(classes: &BTreeSet<String>) -> Self {
        let palette = generate_palette(classes.len());
        let mapping = classes
            .iter()
            .cloned()
            .zip(palette)
            .collect();
        ClassColorMap { mapping }
    }

    pub fn color_for(&self, class: &str) -> Color32 {
        self.mapping.get(class).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_lookup_is_meet_or_exceed() {
        let scheme = ColorScheme::Default;
        let top = scheme.meteorite_color(600_000.0);
        let exact = scheme.meteorite_color(500_000.0);
        assert_eq!(top, exact);

        let lowest = scheme.meteorite_color(5_000.0);
        assert_ne!(lowest, top);

        // Below every threshold: fixed gray fallback.
        let fallback = scheme.meteorite_color(4_999.0);
        assert_eq!(fallback, Color32::from_rgba_unmultiplied(128, 128, 128, 153));
    }

    #[test]
    fn schemes_disagree_on_color_not_structure() {
        let mass = 150_000.0;
        assert_ne!(
            ColorScheme::Default.meteorite_color(mass),
            ColorScheme::BlueScale.meteorite_color(mass)
        );
        assert_eq!(
            ColorScheme::Default.crater_color(0.0),
            ColorScheme::BlueScale.crater_color(0.0)
        );
    }

    #[test]
    fn tier_labels_track_thresholds() {
        assert_eq!(meteorite_tier_label(600_000.0), "≥ 500.00 kg");
        assert_eq!(meteorite_tier_label(100.0), "< 5.00 kg");
        assert_eq!(crater_tier_label(75.0), "≥ 50 km");
        assert_eq!(crater_tier_label(1.0), "< 5 km");
    }

    #[test]
    fn marker_sizes_floor_and_cap() {
        assert_eq!(meteorite_marker_size(0.0), 5.0);
        assert_eq!(meteorite_marker_size(100_000.0), 10.0);
        assert_eq!(meteorite_marker_size(10_000_000.0), 20.0);

        assert_eq!(crater_marker_size(300.0), 25.0);
        assert_eq!(crater_marker_size(55.0), 14.0);
        assert_eq!(crater_marker_size(9.9), 7.0);
    }

    #[test]
    fn class_colors_are_distinct_with_gray_fallback() {
        let classes: BTreeSet<String> =
            ["H5".to_string(), "L6".to_string(), "Iron".to_string()].into();
        let map = ClassColorMap::new(&classes);
        assert_ne!(map.color_for("H5"), map.color_for("L6"));
        assert_eq!(map.color_for("Howardite"), Color32::GRAY);
    }
}
