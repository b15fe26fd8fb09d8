use std::collections::BTreeSet;

use super::rank::format_mass;

// ---------------------------------------------------------------------------
// Coordinates – one resolved map position
// ---------------------------------------------------------------------------

/// A resolved longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

// ---------------------------------------------------------------------------
// AgeInterval – derived crater dating, annotated once at load
// ---------------------------------------------------------------------------

/// Numeric age bracket in Myr derived from a crater's free-text age field.
/// Computed exactly once at load time; filter passes only read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeInterval {
    pub min: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// Meteorite – one landing record
// ---------------------------------------------------------------------------

/// A single meteorite landing from the NASA catalogue.
#[derive(Debug, Clone)]
pub struct Meteorite {
    pub id: String,
    pub name: String,
    /// Mass in grams. Absent when the source field is missing or unparsable.
    pub mass: Option<f64>,
    /// Recovery year extracted from the date-like source field.
    pub year: Option<i32>,
    /// Classification, `"Unknown"` when the source omits it.
    pub class: String,
    /// `"Fell"` / `"Found"` marker from the source.
    pub fall: Option<String>,
    /// Records without a resolvable pair stay in the catalogue and in all
    /// non-spatial aggregates; only the map skips them.
    pub location: Option<Coordinates>,
}

impl Meteorite {
    /// Plain-text detail block shown on hover.
    pub fn describe(&self) -> String {
        format!(
            "Name: {}\nID: {}\nMass: {}\nClass: {}\nYear: {}\nFall/Find: {}",
            self.name,
            self.id,
            self.mass.map(format_mass).unwrap_or_else(|| "Unknown".into()),
            self.class,
            self.year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "Unknown".into()),
            self.fall.as_deref().unwrap_or("Unknown"),
        )
    }
}

// ---------------------------------------------------------------------------
// Crater – one impact structure record
// ---------------------------------------------------------------------------

/// A single impact crater from the Earth Impact Database export.
#[derive(Debug, Clone)]
pub struct Crater {
    pub id: Option<String>,
    pub name: String,
    /// Diameter in km, 0 when the source value is missing or unparsable.
    pub diameter_km: f64,
    /// Derived dating bracket, see [`AgeInterval`].
    pub age: AgeInterval,
    /// The original free-text age, kept for display.
    pub age_text: Option<String>,
    pub target_rock: String,
    pub crater_type: String,
    pub country: String,
    /// Point geometry is required; features without one are dropped at load.
    pub location: Coordinates,
}

impl Crater {
    pub fn describe(&self) -> String {
        format!(
            "Name: {}\nID: {}\nDiameter: {} km\nAge: {} Myr\nCountry: {}\nTarget: {}\nType: {}",
            self.name,
            self.id.as_deref().unwrap_or("Unknown"),
            self.diameter_km,
            self.age_text.as_deref().unwrap_or("Unknown"),
            self.country,
            self.target_rock,
            self.crater_type,
        )
    }
}

// ---------------------------------------------------------------------------
// Catalogues – the complete loaded datasets plus categorical universes
// ---------------------------------------------------------------------------

/// All loaded meteorites plus the set of classifications seen in the data.
#[derive(Debug, Clone, Default)]
pub struct MeteoriteCatalog {
    pub records: Vec<Meteorite>,
    pub classes: BTreeSet<String>,
}

impl MeteoriteCatalog {
    pub fn from_records(records: Vec<Meteorite>) -> Self {
        let classes = records.iter().map(|m| m.class.clone()).collect();
        MeteoriteCatalog { records, classes }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// All loaded craters plus the category universes used by the filter panel.
#[derive(Debug, Clone, Default)]
pub struct CraterCatalog {
    pub records: Vec<Crater>,
    pub target_rocks: BTreeSet<String>,
    pub crater_types: BTreeSet<String>,
}

impl CraterCatalog {
    pub fn from_records(records: Vec<Crater>) -> Self {
        let target_rocks = records.iter().map(|c| c.target_rock.clone()).collect();
        let crater_types = records.iter().map(|c| c.crater_type.clone()).collect();
        CraterCatalog {
            records,
            target_rocks,
            crater_types,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest diameter in the dataset, for slider upper bounds.
    pub fn max_diameter(&self) -> Option<f64> {
        self.records.iter().map(|c| c.diameter_km).reduce(f64::max)
    }

    /// Largest annotated age bound in the dataset.
    pub fn max_age(&self) -> Option<f64> {
        self.records.iter().map(|c| c.age.max).reduce(f64::max)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn meteorite(
        name: &str,
        mass: Option<f64>,
        year: Option<i32>,
        class: &str,
    ) -> Meteorite {
        Meteorite {
            id: name.to_string(),
            name: name.to_string(),
            mass,
            year,
            class: class.to_string(),
            fall: None,
            location: Some(Coordinates {
                longitude: 0.0,
                latitude: 0.0,
            }),
        }
    }

    pub(crate) fn crater(
        name: &str,
        diameter_km: f64,
        age: (f64, f64),
        target: &str,
        kind: &str,
    ) -> Crater {
        Crater {
            id: None,
            name: name.to_string(),
            diameter_km,
            age: AgeInterval {
                min: age.0,
                max: age.1,
            },
            age_text: None,
            target_rock: target.to_string(),
            crater_type: kind.to_string(),
            country: "Unknown".to_string(),
            location: Coordinates {
                longitude: 0.0,
                latitude: 0.0,
            },
        }
    }

    #[test]
    fn meteorite_catalog_indexes_classes() {
        let catalog = MeteoriteCatalog::from_records(vec![
            meteorite("a", None, None, "L6"),
            meteorite("b", None, None, "H5"),
            meteorite("c", None, None, "L6"),
        ]);
        assert_eq!(catalog.len(), 3);
        let classes: Vec<&str> = catalog.classes.iter().map(String::as_str).collect();
        assert_eq!(classes, vec!["H5", "L6"]);
    }

    #[test]
    fn crater_catalog_indexes_categories_and_bounds() {
        let catalog = CraterCatalog::from_records(vec![
            crater("a", 100.0, (0.0, 50.0), "Sedimentary", "Simple"),
            crater("b", 12.5, (300.0, 450.0), "Crystalline", "Complex"),
        ]);
        assert!(catalog.target_rocks.contains("Crystalline"));
        assert!(catalog.crater_types.contains("Simple"));
        assert_eq!(catalog.max_diameter(), Some(100.0));
        assert_eq!(catalog.max_age(), Some(450.0));
    }

    #[test]
    fn empty_catalog_has_no_bounds() {
        let catalog = CraterCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.max_diameter(), None);
        assert_eq!(catalog.max_age(), None);
    }

    #[test]
    fn describe_falls_back_to_unknown() {
        let m = meteorite("Aachen", None, None, "L5");
        let text = m.describe();
        assert!(text.contains("Mass: Unknown"));
        assert!(text.contains("Year: Unknown"));

        let m = meteorite("Hoba", Some(60_000_000.0), Some(1920), "Ataxite");
        assert!(m.describe().contains("Mass: 60.00 tonnes"));
    }
}
