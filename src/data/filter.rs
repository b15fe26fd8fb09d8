use std::collections::BTreeSet;

use super::model::{Crater, CraterCatalog, Meteorite, MeteoriteCatalog};

// ---------------------------------------------------------------------------
// Default filter bounds
// ---------------------------------------------------------------------------

pub const YEAR_RANGE: (f64, f64) = (860.0, 2023.0);
pub const MASS_RANGE: (f64, f64) = (0.0, 60_000_000.0);
pub const DIAMETER_RANGE: (f64, f64) = (0.0, 300.0);
pub const AGE_RANGE: (f64, f64) = (0.0, 3000.0);

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// One numeric constraint. `min <= max` always holds: construction swaps
/// inverted inputs instead of rejecting them, so a careless edit can never
/// produce an always-empty result set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    pub min: f64,
    pub max: f64,
}

impl RangeFilter {
    pub fn new(min: f64, max: f64) -> Self {
        if min > max {
            RangeFilter { min: max, max: min }
        } else {
            RangeFilter { min, max }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Interval-overlap test: any intersection with `[min, max]` counts.
    pub fn overlaps(&self, min: f64, max: f64) -> bool {
        max >= self.min && min <= self.max
    }
}

/// The numeric dimensions a range edit can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDimension {
    Year,
    Mass,
    Diameter,
    Age,
}

/// The categorical dimensions a selection edit can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDimension {
    MeteoriteClasses,
    TargetRocks,
    CraterTypes,
}

/// The complete set of constraints applied to both datasets.
///
/// An empty selection set means "no restriction", not "exclude all" — the UI
/// starts with nothing selected and must show everything.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub year: RangeFilter,
    pub mass: RangeFilter,
    pub diameter: RangeFilter,
    pub age: RangeFilter,
    pub meteorite_classes: BTreeSet<String>,
    pub target_rocks: BTreeSet<String>,
    pub crater_types: BTreeSet<String>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            year: RangeFilter::new(YEAR_RANGE.0, YEAR_RANGE.1),
            mass: RangeFilter::new(MASS_RANGE.0, MASS_RANGE.1),
            diameter: RangeFilter::new(DIAMETER_RANGE.0, DIAMETER_RANGE.1),
            age: RangeFilter::new(AGE_RANGE.0, AGE_RANGE.1),
            meteorite_classes: BTreeSet::new(),
            target_rocks: BTreeSet::new(),
            crater_types: BTreeSet::new(),
        }
    }
}

impl FilterState {
    pub fn range(&self, dimension: RangeDimension) -> RangeFilter {
        match dimension {
            RangeDimension::Year => self.year,
            RangeDimension::Mass => self.mass,
            RangeDimension::Diameter => self.diameter,
            RangeDimension::Age => self.age,
        }
    }

    /// Store a range edit, swapping inverted bounds.
    pub fn set_range(&mut self, dimension: RangeDimension, min: f64, max: f64) {
        let slot = match dimension {
            RangeDimension::Year => &mut self.year,
            RangeDimension::Mass => &mut self.mass,
            RangeDimension::Diameter => &mut self.diameter,
            RangeDimension::Age => &mut self.age,
        };
        *slot = RangeFilter::new(min, max);
    }

    pub fn categories(&self, dimension: CategoryDimension) -> &BTreeSet<String> {
        match dimension {
            CategoryDimension::MeteoriteClasses => &self.meteorite_classes,
            CategoryDimension::TargetRocks => &self.target_rocks,
            CategoryDimension::CraterTypes => &self.crater_types,
        }
    }

    pub fn categories_mut(&mut self, dimension: CategoryDimension) -> &mut BTreeSet<String> {
        match dimension {
            CategoryDimension::MeteoriteClasses => &mut self.meteorite_classes,
            CategoryDimension::TargetRocks => &mut self.target_rocks,
            CategoryDimension::CraterTypes => &mut self.crater_types,
        }
    }

    /// Replace a selection set verbatim. Unknown values are kept; they simply
    /// never match any record.
    pub fn set_categories(&mut self, dimension: CategoryDimension, values: BTreeSet<String>) {
        *self.categories_mut(dimension) = values;
    }

    /// Restore default bounds and clear all selections.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }
}

// ---------------------------------------------------------------------------
// Filter engine – pure functions over catalogue + state
// ---------------------------------------------------------------------------

/// Absent year or mass is "not excluded by this dimension", never a failure.
fn meteorite_passes(meteorite: &Meteorite, filters: &FilterState) -> bool {
    let year_ok = meteorite
        .year
        .is_none_or(|y| filters.year.contains(f64::from(y)));
    let mass_ok = meteorite.mass.is_none_or(|m| filters.mass.contains(m));
    let class_ok = filters.meteorite_classes.is_empty()
        || filters.meteorite_classes.contains(&meteorite.class);
    year_ok && mass_ok && class_ok
}

/// A crater with uncertain dating matches when any part of its age bracket
/// intersects the requested range.
fn crater_passes(crater: &Crater, filters: &FilterState) -> bool {
    let diameter_ok = filters.diameter.contains(crater.diameter_km);
    let age_ok = filters.age.overlaps(crater.age.min, crater.age.max);
    let rock_ok =
        filters.target_rocks.is_empty() || filters.target_rocks.contains(&crater.target_rock);
    let type_ok =
        filters.crater_types.is_empty() || filters.crater_types.contains(&crater.crater_type);
    diameter_ok && age_ok && rock_ok && type_ok
}

/// Indices of meteorites satisfying all active predicates.
pub fn filter_meteorites(catalog: &MeteoriteCatalog, filters: &FilterState) -> Vec<usize> {
    catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, m)| meteorite_passes(m, filters))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of craters satisfying all active predicates.
pub fn filter_craters(catalog: &CraterCatalog, filters: &FilterState) -> Vec<usize> {
    catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, c)| crater_passes(c, filters))
        .map(|(i, _)| i)
        .collect()
}
