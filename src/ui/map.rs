use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, Points};

use crate::color::{
    crater_marker_size, crater_tier_label, meteorite_marker_size, meteorite_tier_label, ColorMode,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Impact map (central panel)
// ---------------------------------------------------------------------------

/// Markers sharing a legend label and pixel size, drawn as one plot item.
/// Bucketing by style keeps the item count bounded by tiers, not by records.
struct MarkerGroup {
    color: Color32,
    points: Vec<[f64; 2]>,
}

/// Render the filtered views as a longitude/latitude scatter map.
pub fn impact_map(ui: &mut Ui, state: &AppState) {
    if state.meteorites.is_empty() && state.craters.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data loaded  (File → Open… or Fetch)");
        });
        return;
    }

    let mut groups: BTreeMap<(String, u8), MarkerGroup> = BTreeMap::new();
    let mut push = |label: String, size: f32, color: Color32, position: [f64; 2]| {
        groups
            .entry((label, size.round() as u8))
            .or_insert_with(|| MarkerGroup {
                color,
                points: Vec::new(),
            })
            .points
            .push(position);
    };

    if state.show_meteorites {
        for &idx in &state.visible_meteorites {
            let m = &state.meteorites.records[idx];
            // Spatial rendering only: records without coordinates are skipped
            // here but still count toward rankings and totals.
            let Some(location) = m.location else {
                continue;
            };
            let mass = m.mass.unwrap_or(0.0);
            let (label, color) = match state.meteorite_colors {
                ColorMode::Scheme(scheme) => {
                    (meteorite_tier_label(mass), scheme.meteorite_color(mass))
                }
                ColorMode::ByClass => (m.class.clone(), state.class_colors.color_for(&m.class)),
            };
            push(
                label,
                meteorite_marker_size(mass),
                color,
                [location.longitude, location.latitude],
            );
        }
    }

    if state.show_craters {
        for &idx in &state.visible_craters {
            let c = &state.craters.records[idx];
            push(
                crater_tier_label(c.diameter_km),
                crater_marker_size(c.diameter_km),
                state.crater_scheme.crater_color(c.diameter_km),
                [c.location.longitude, c.location.latitude],
            );
        }
    }

    Plot::new("impact_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .data_aspect(1.0)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.2}°, {:.2}°", value.x, value.y)
            } else {
                format!("{name}\n{:.2}°, {:.2}°", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for ((label, size), group) in groups {
                plot_ui.points(
                    Points::new(group.points)
                        .color(group.color)
                        .radius(f32::from(size) / 2.0)
                        .name(label),
                );
            }
        });
}
