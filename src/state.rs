use std::collections::BTreeSet;

use crate::color::{ClassColorMap, ColorMode, ColorScheme};
use crate::data::filter::{
    filter_craters, filter_meteorites, CategoryDimension, FilterState, RangeDimension,
};
use crate::data::model::{CraterCatalog, MeteoriteCatalog};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Owns the loaded catalogues,
/// the single authoritative filter state, and the current filtered views.
pub struct AppState {
    /// Loaded datasets, read-only after ingestion.
    pub meteorites: MeteoriteCatalog,
    pub craters: CraterCatalog,

    /// The one source of truth for all range and category constraints.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached views).
    pub visible_meteorites: Vec<usize>,
    pub visible_craters: Vec<usize>,

    /// Layer visibility toggles.
    pub show_meteorites: bool,
    pub show_craters: bool,

    /// Marker coloring, selectable per dataset.
    pub meteorite_colors: ColorMode,
    pub crater_scheme: ColorScheme,
    pub class_colors: ClassColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            meteorites: MeteoriteCatalog::default(),
            craters: CraterCatalog::default(),
            filters: FilterState::default(),
            visible_meteorites: Vec::new(),
            visible_craters: Vec::new(),
            show_meteorites: true,
            show_craters: true,
            meteorite_colors: ColorMode::Scheme(ColorScheme::Default),
            crater_scheme: ColorScheme::Default,
            class_colors: ClassColorMap::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Build the state around the initially loaded catalogues and run the
    /// first filter pass.
    pub fn new(meteorites: MeteoriteCatalog, craters: CraterCatalog) -> Self {
        let mut state = AppState {
            class_colors: ClassColorMap::new(&meteorites.classes),
            meteorites,
            craters,
            ..AppState::default()
        };
        state.refilter();
        state
    }

    /// Replace the meteorite catalogue (File → Open / re-fetch).
    pub fn set_meteorites(&mut self, catalog: MeteoriteCatalog) {
        self.class_colors = ClassColorMap::new(&catalog.classes);
        self.meteorites = catalog;
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Replace the crater catalogue.
    pub fn set_craters(&mut self, catalog: CraterCatalog) {
        self.craters = catalog;
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Recompute both filtered views. Called after every filter mutation;
    /// the views are replaced wholesale, never patched.
    pub fn refilter(&mut self) {
        self.visible_meteorites = filter_meteorites(&self.meteorites, &self.filters);
        self.visible_craters = filter_craters(&self.craters, &self.filters);
        log::debug!(
            "filter pass: {}/{} meteorites, {}/{} craters visible",
            self.visible_meteorites.len(),
            self.meteorites.len(),
            self.visible_craters.len(),
            self.craters.len(),
        );
    }

    /// Apply a range edit (inverted bounds swap) and refilter.
    pub fn set_range(&mut self, dimension: RangeDimension, min: f64, max: f64) {
        self.filters.set_range(dimension, min, max);
        self.refilter();
    }

    /// Toggle a single category value in a selection set.
    pub fn toggle_category(&mut self, dimension: CategoryDimension, value: &str) {
        let selected = self.filters.categories_mut(dimension);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every known value in a dimension's universe.
    pub fn select_all(&mut self, dimension: CategoryDimension) {
        let universe = self.category_universe(dimension).clone();
        self.filters.set_categories(dimension, universe);
        self.refilter();
    }

    /// Clear a selection set. An empty set is "no restriction", so this
    /// widens the view rather than emptying it.
    pub fn clear_selection(&mut self, dimension: CategoryDimension) {
        self.filters.set_categories(dimension, BTreeSet::new());
        self.refilter();
    }

    /// Restore default ranges, clear all selections, refilter.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.refilter();
    }

    /// The set of known values for a categorical dimension.
    pub fn category_universe(&self, dimension: CategoryDimension) -> &BTreeSet<String> {
        match dimension {
            CategoryDimension::MeteoriteClasses => &self.meteorites.classes,
            CategoryDimension::TargetRocks => &self.craters.target_rocks,
            CategoryDimension::CraterTypes => &self.craters.crater_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{crater, meteorite};

    fn state_fixture() -> AppState {
        AppState::new(
            MeteoriteCatalog::from_records(vec![
                meteorite("a", Some(100.0), Some(1900), "L6"),
                meteorite("b", Some(9000.0), Some(1990), "H5"),
            ]),
            CraterCatalog::from_records(vec![
                crater("x", 10.0, (0.0, 50.0), "Sedimentary", "Simple"),
                crater("y", 120.0, (100.0, 200.0), "Crystalline", "Complex"),
            ]),
        )
    }

    #[test]
    fn initial_pass_shows_everything() {
        let state = state_fixture();
        assert_eq!(state.visible_meteorites, vec![0, 1]);
        assert_eq!(state.visible_craters, vec![0, 1]);
    }

    #[test]
    fn mutations_recompute_views() {
        let mut state = state_fixture();

        state.set_range(RangeDimension::Mass, 1000.0, 10_000.0);
        assert_eq!(state.visible_meteorites, vec![1]);
        // Crater view untouched by a meteorite-only dimension.
        assert_eq!(state.visible_craters, vec![0, 1]);

        state.toggle_category(CategoryDimension::CraterTypes, "Simple");
        assert_eq!(state.visible_craters, vec![0]);
        state.toggle_category(CategoryDimension::CraterTypes, "Simple");
        assert_eq!(state.visible_craters, vec![0, 1]);
    }

    #[test]
    fn select_all_matches_clear_on_the_visible_set() {
        let mut state = state_fixture();
        state.select_all(CategoryDimension::TargetRocks);
        let with_all = state.visible_craters.clone();
        state.clear_selection(CategoryDimension::TargetRocks);
        assert_eq!(with_all, state.visible_craters);
    }

    #[test]
    fn reset_restores_the_full_view() {
        let mut state = state_fixture();
        state.set_range(RangeDimension::Diameter, 0.0, 5.0);
        state.toggle_category(CategoryDimension::MeteoriteClasses, "L6");
        assert_eq!(state.visible_craters.len(), 0);
        assert_eq!(state.visible_meteorites, vec![0]);

        state.reset_filters();
        assert_eq!(state.visible_meteorites, vec![0, 1]);
        assert_eq!(state.visible_craters, vec![0, 1]);
    }
}
