use super::model::{Crater, CraterCatalog, Meteorite, MeteoriteCatalog};

// ---------------------------------------------------------------------------
// Top-N rankings over a filtered view
// ---------------------------------------------------------------------------

/// The `count` heaviest meteorites in the view, descending by mass.
///
/// Records without a mass stay in the filtered view but are excluded from
/// this ranking — there is nothing to rank them by.
pub fn top_meteorites<'a>(
    catalog: &'a MeteoriteCatalog,
    view: &[usize],
    count: usize,
) -> Vec<&'a Meteorite> {
    let mut ranked: Vec<&Meteorite> = view
        .iter()
        .filter_map(|&i| catalog.records.get(i))
        .filter(|m| m.mass.is_some())
        .collect();
    ranked.sort_by(|a, b| {
        b.mass
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&a.mass.unwrap_or(f64::NEG_INFINITY))
    });
    ranked.truncate(count);
    ranked
}

/// The `count` widest craters in the view, descending by diameter.
pub fn top_craters<'a>(catalog: &'a CraterCatalog, view: &[usize], count: usize) -> Vec<&'a Crater> {
    let mut ranked: Vec<&Crater> = view.iter().filter_map(|&i| catalog.records.get(i)).collect();
    ranked.sort_by(|a, b| b.diameter_km.total_cmp(&a.diameter_km));
    ranked.truncate(count);
    ranked
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

/// Format a mass in grams with a unit readers can take in at a glance.
pub fn format_mass(grams: f64) -> String {
    if grams >= 1_000_000.0 {
        format!("{:.2} tonnes", grams / 1_000_000.0)
    } else if grams >= 1_000.0 {
        format!("{:.2} kg", grams / 1_000.0)
    } else {
        format!("{grams:.0} g")
    }
}
