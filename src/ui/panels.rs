use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::color::{ColorMode, ColorScheme};
use crate::data::filter::{CategoryDimension, RangeDimension};
use crate::data::loader;
use crate::data::model::{CraterCatalog, MeteoriteCatalog};
use crate::data::rank::{format_mass, top_craters, top_meteorites};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open meteorites…").clicked() {
                open_meteorite_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open craters…").clicked() {
                open_crater_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Fetch meteorites (NASA)").clicked() {
                fetch_remote_meteorites(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} meteorites ({} shown) · {} craters ({} shown)",
            state.meteorites.len(),
            state.visible_meteorites.len(),
            state.craters.len(),
            state.visible_craters.len(),
        ));

        if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Layer visibility ----
            ui.strong("Layers");
            ui.checkbox(&mut state.show_meteorites, "Meteorites");
            ui.checkbox(&mut state.show_craters, "Impact craters");
            ui.separator();

            // ---- Marker colors ----
            ui.strong("Meteorite colors");
            let current = state.meteorite_colors;
            egui::ComboBox::from_id_salt("meteorite_colors")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for mode in ColorMode::ALL {
                        if ui.selectable_label(current == mode, mode.label()).clicked() {
                            state.meteorite_colors = mode;
                        }
                    }
                });

            ui.strong("Crater colors");
            let current = state.crater_scheme;
            egui::ComboBox::from_id_salt("crater_colors")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for scheme in ColorScheme::ALL {
                        if ui
                            .selectable_label(current == scheme, scheme.label())
                            .clicked()
                        {
                            state.crater_scheme = scheme;
                        }
                    }
                });
            ui.separator();

            // ---- Numeric ranges ----
            range_row(ui, state, "Recovery year", RangeDimension::Year, 1.0);
            range_row(ui, state, "Mass (g)", RangeDimension::Mass, 10_000.0);
            range_row(ui, state, "Diameter (km)", RangeDimension::Diameter, 1.0);
            range_row(ui, state, "Age (Myr)", RangeDimension::Age, 10.0);

            if let (Some(diameter), Some(age)) =
                (state.craters.max_diameter(), state.craters.max_age())
            {
                ui.label(
                    RichText::new(format!(
                        "Loaded craters span up to {diameter} km and {age} Myr."
                    ))
                    .weak(),
                );
            }
            ui.separator();

            // ---- Categorical selections ----
            let by_class = matches!(state.meteorite_colors, ColorMode::ByClass);
            category_section(
                ui,
                state,
                "Meteorite class",
                CategoryDimension::MeteoriteClasses,
                by_class,
            );
            category_section(ui, state, "Target rock", CategoryDimension::TargetRocks, false);
            category_section(ui, state, "Crater type", CategoryDimension::CraterTypes, false);
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

/// Min/max editors for one range dimension. Inverted edits are swapped by
/// the filter state, never rejected.
fn range_row(ui: &mut Ui, state: &mut AppState, label: &str, dimension: RangeDimension, speed: f64) {
    let current = state.filters.range(dimension);
    let mut min = current.min;
    let mut max = current.max;

    ui.strong(label);
    ui.horizontal(|ui: &mut Ui| {
        let mut changed = ui.add(DragValue::new(&mut min).speed(speed)).changed();
        ui.label("to");
        changed |= ui.add(DragValue::new(&mut max).speed(speed)).changed();
        if changed {
            state.set_range(dimension, min, max);
        }
    });
}

/// Collapsible checkbox list over one categorical dimension's universe.
fn category_section(
    ui: &mut Ui,
    state: &mut AppState,
    title: &str,
    dimension: CategoryDimension,
    colorize: bool,
) {
    let universe = state.category_universe(dimension).clone();
    if universe.is_empty() {
        return;
    }
    let selected = state.filters.categories(dimension).clone();

    let header = format!("{title}  ({}/{})", selected.len(), universe.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(dimension);
                }
                // Clearing widens: an empty selection restricts nothing.
                if ui.small_button("Clear").clicked() {
                    state.clear_selection(dimension);
                }
            });

            for value in &universe {
                let mut checked = selected.contains(value);
                let mut text = RichText::new(value.as_str());
                if colorize {
                    text = text.color(state.class_colors.color_for(value));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_category(dimension, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Right side panel – rankings
// ---------------------------------------------------------------------------

/// Render the top-10 summaries for the current filtered views.
pub fn summary_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Top 10");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Heaviest meteorites");
            let top = top_meteorites(&state.meteorites, &state.visible_meteorites, 10);
            if top.is_empty() {
                ui.label("No meteorites match.");
            }
            for (rank, m) in top.iter().enumerate() {
                let mass = m.mass.map(format_mass).unwrap_or_else(|| "Unknown".into());
                ui.label(format!("{}. {} ({mass})", rank + 1, m.name))
                    .on_hover_text(m.describe());
            }
            ui.separator();

            ui.strong("Widest craters");
            let top = top_craters(&state.craters, &state.visible_craters, 10);
            if top.is_empty() {
                ui.label("No craters match.");
            }
            for (rank, c) in top.iter().enumerate() {
                ui.label(format!("{}. {} ({} km)", rank + 1, c.name, c.diameter_km))
                    .on_hover_text(c.describe());
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs and remote fetch
// ---------------------------------------------------------------------------

pub fn open_meteorite_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open meteorite catalogue")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match loader::load_meteorite_file(&path) {
            Ok(records) => {
                log::info!("Loaded {} meteorites from {}", records.len(), path.display());
                state.set_meteorites(MeteoriteCatalog::from_records(records));
            }
            Err(e) => {
                log::error!("Failed to load meteorites: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

pub fn open_crater_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open crater dataset")
        .add_filter("Supported files", &["geojson", "json", "csv"])
        .add_filter("GeoJSON", &["geojson", "json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match loader::load_crater_file(&path) {
            Ok(records) => {
                log::info!("Loaded {} craters from {}", records.len(), path.display());
                state.set_craters(CraterCatalog::from_records(records));
            }
            Err(e) => {
                log::error!("Failed to load craters: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

pub fn fetch_remote_meteorites(state: &mut AppState) {
    state.loading = true;
    match loader::fetch_meteorites(loader::METEORITE_API_LIMIT) {
        Ok(records) => {
            log::info!("Fetched {} meteorites", records.len());
            state.set_meteorites(MeteoriteCatalog::from_records(records));
        }
        Err(e) => {
            log::error!("Meteorite download failed: {e}");
            state.status_message = Some(format!("Error: {e}"));
            state.loading = false;
        }
    }
}
