use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Crater, Meteorite};
use super::normalize::{
    self, coerce_number, parse_recovery_year, resolve_coordinates, NumericField, RawGeolocation,
};

// ---------------------------------------------------------------------------
// Meteorite source (NASA open-data endpoint)
// ---------------------------------------------------------------------------

pub const METEORITE_API_URL: &str = "https://data.nasa.gov/resource/gh4g-9sfh.json";
pub const METEORITE_API_LIMIT: u32 = 50_000;

/// Why a remote catalogue download failed. Transport errors and unsuccessful
/// HTTP statuses are the only detection we have; neither is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("meteorite request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("meteorite endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// One record as served by the NASA feed. Every numeric field may arrive as
/// a string, and the location comes in one of three shapes.
#[derive(Debug, Clone, Deserialize)]
struct RawMeteorite {
    #[serde(default)]
    id: Option<NumericField>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    mass: Option<NumericField>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    recclass: Option<String>,
    #[serde(default)]
    fall: Option<String>,
    #[serde(default)]
    geolocation: Option<RawGeolocation>,
    #[serde(default)]
    reclat: Option<NumericField>,
    #[serde(default)]
    reclong: Option<NumericField>,
}

impl RawMeteorite {
    fn into_record(self) -> Meteorite {
        let location = resolve_coordinates(
            self.geolocation.as_ref(),
            self.reclat.as_ref(),
            self.reclong.as_ref(),
        );
        Meteorite {
            id: self
                .id
                .map(|v| v.to_string())
                .unwrap_or_else(|| "Unknown".into()),
            name: self.name.unwrap_or_else(|| "Unknown".into()),
            mass: coerce_number(self.mass.as_ref()),
            year: self.year.as_deref().and_then(parse_recovery_year),
            class: self.recclass.unwrap_or_else(|| "Unknown".into()),
            fall: self.fall,
            location,
        }
    }
}

/// Download the meteorite catalogue. Blocking; run off the UI thread.
pub fn fetch_meteorites(limit: u32) -> Result<Vec<Meteorite>, FetchError> {
    let url = format!("{METEORITE_API_URL}?$limit={limit}");
    let response = reqwest::blocking::get(&url)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }
    let raw: Vec<RawMeteorite> = response.json()?;
    Ok(raw.into_iter().map(RawMeteorite::into_record).collect())
}

/// Load a previously saved meteorite catalogue (same JSON shape as the feed).
pub fn load_meteorite_file(path: &Path) -> Result<Vec<Meteorite>> {
    match extension(path).as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading meteorite JSON")?;
            parse_meteorite_json(&text)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn parse_meteorite_json(text: &str) -> Result<Vec<Meteorite>> {
    let raw: Vec<RawMeteorite> =
        serde_json::from_str(text).context("parsing meteorite records")?;
    Ok(raw.into_iter().map(RawMeteorite::into_record).collect())
}

// ---------------------------------------------------------------------------
// Crater source (Earth Impact Database export)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<NumericField>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<RawCraterProperties>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Vec<NumericField>,
}

/// Property keys exactly as they appear in the dataset, misspelling included.
#[derive(Debug, Default, Deserialize)]
struct RawCraterProperties {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Crater diamter [km]", default)]
    diameter_km: Option<NumericField>,
    #[serde(rename = "Age [Myr]", default)]
    age: Option<NumericField>,
    #[serde(rename = "Target", default)]
    target: Option<String>,
    #[serde(rename = "Crater type", default)]
    crater_type: Option<String>,
    #[serde(rename = "Country", default)]
    country: Option<String>,
}

fn feature_into_crater(feature: RawFeature) -> Option<Crater> {
    let geometry = RawGeolocation::Point {
        coordinates: feature.geometry?.coordinates,
    };
    let location = resolve_coordinates(Some(&geometry), None, None)?;

    let props = feature.properties.unwrap_or_default();
    let age_text = props.age.map(|v| v.to_string());
    Some(Crater {
        id: feature.id.map(|v| v.to_string()),
        name: props.name.unwrap_or_else(|| "Unknown".into()),
        diameter_km: coerce_number(props.diameter_km.as_ref()).unwrap_or(0.0),
        age: normalize::age_interval(age_text.as_deref()),
        age_text,
        target_rock: props.target.unwrap_or_else(|| "Unknown".into()),
        crater_type: props.crater_type.unwrap_or_else(|| "Unknown".into()),
        country: props.country.unwrap_or_else(|| "Unknown".into()),
        location,
    })
}

/// Load a crater dataset. Dispatch by extension.
///
/// Supported formats:
/// * `.geojson` / `.json` – feature collection with point geometries
/// * `.csv`               – same property names as headers, plus
///                          `Longitude` / `Latitude` columns
pub fn load_crater_file(path: &Path) -> Result<Vec<Crater>> {
    match extension(path).as_str() {
        "geojson" | "json" => {
            let text = std::fs::read_to_string(path).context("reading crater GeoJSON")?;
            parse_crater_geojson(&text)
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening crater CSV")?;
            parse_crater_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn parse_crater_geojson(text: &str) -> Result<Vec<Crater>> {
    let collection: RawFeatureCollection =
        serde_json::from_str(text).context("parsing crater feature collection")?;

    let total = collection.features.len();
    let craters: Vec<Crater> = collection
        .features
        .into_iter()
        .filter_map(feature_into_crater)
        .collect();

    let dropped = total - craters.len();
    if dropped > 0 {
        log::warn!("{dropped} crater features lacked a usable point geometry and were dropped");
    }
    Ok(craters)
}

/// One crater row in the CSV rendition of the dataset. CSV is not
/// self-describing, so fields stay text until coerced.
#[derive(Debug, Deserialize)]
struct RawCraterRow {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Crater diamter [km]", default)]
    diameter_km: Option<String>,
    #[serde(rename = "Age [Myr]", default)]
    age: Option<String>,
    #[serde(rename = "Target", default)]
    target: Option<String>,
    #[serde(rename = "Crater type", default)]
    crater_type: Option<String>,
    #[serde(rename = "Country", default)]
    country: Option<String>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<String>,
    #[serde(rename = "Latitude", default)]
    latitude: Option<String>,
}

impl RawCraterRow {
    fn into_crater(self) -> Option<Crater> {
        let longitude: f64 = self.longitude?.trim().parse().ok()?;
        let latitude: f64 = self.latitude?.trim().parse().ok()?;

        let age_text = non_empty(self.age);
        Some(Crater {
            id: None,
            name: non_empty(self.name).unwrap_or_else(|| "Unknown".into()),
            diameter_km: self
                .diameter_km
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0.0),
            age: normalize::age_interval(age_text.as_deref()),
            age_text,
            target_rock: non_empty(self.target).unwrap_or_else(|| "Unknown".into()),
            crater_type: non_empty(self.crater_type).unwrap_or_else(|| "Unknown".into()),
            country: non_empty(self.country).unwrap_or_else(|| "Unknown".into()),
            location: super::model::Coordinates {
                longitude,
                latitude,
            },
        })
    }
}

fn parse_crater_csv<R: Read>(reader: R) -> Result<Vec<Crater>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut craters = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.deserialize::<RawCraterRow>().enumerate() {
        let row = result.with_context(|| format!("crater CSV row {row_no}"))?;
        match row.into_crater() {
            Some(crater) => craters.push(crater),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        log::warn!("{dropped} crater CSV rows lacked usable coordinates and were dropped");
    }
    Ok(craters)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const METEORITE_JSON: &str = r#"[
        {
            "id": "1",
            "name": "Aachen",
            "mass": "21",
            "year": "1880-01-01T00:00:00.000",
            "recclass": "L5",
            "fall": "Fell",
            "geolocation": {"latitude": "50.775", "longitude": "6.08333"}
        },
        {
            "id": "370",
            "name": "Allende",
            "mass": "2000000",
            "year": "1969-01-01T00:00:00.000",
            "recclass": "CV3",
            "geolocation": {"type": "Point", "coordinates": [-105.31667, 26.96667]}
        },
        {
            "id": "392",
            "name": "Alta'ameem",
            "mass": "6000",
            "year": "1977-01-01T00:00:00.000",
            "recclass": "LL5",
            "reclat": "35.27333",
            "reclong": "44.21556"
        },
        {
            "name": "Nameless",
            "mass": "heavy-ish",
            "geolocation": {"type": "Point"}
        }
    ]"#;

    #[test]
    fn meteorite_json_normalizes_all_shapes() {
        let records = parse_meteorite_json(METEORITE_JSON).unwrap();
        assert_eq!(records.len(), 4);

        let aachen = &records[0];
        assert_eq!(aachen.mass, Some(21.0));
        assert_eq!(aachen.year, Some(1880));
        assert_eq!(aachen.class, "L5");
        let loc = aachen.location.unwrap();
        assert_eq!(loc.latitude, 50.775);

        let allende = &records[1];
        let loc = allende.location.unwrap();
        assert_eq!(loc.longitude, -105.31667);
        assert_eq!(loc.latitude, 26.96667);

        let altaameem = &records[2];
        assert_eq!(altaameem.location.unwrap().longitude, 44.21556);
    }

    #[test]
    fn malformed_meteorite_fields_fall_back() {
        let records = parse_meteorite_json(METEORITE_JSON).unwrap();
        let nameless = &records[3];
        assert_eq!(nameless.id, "Unknown");
        assert_eq!(nameless.class, "Unknown");
        assert_eq!(nameless.mass, None);
        assert_eq!(nameless.year, None);
        assert!(nameless.location.is_none());
    }

    const CRATER_GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [27.5, -27.0]},
                "properties": {
                    "Name": "Vredefort",
                    "Crater diamter [km]": "160",
                    "Age [Myr]": "2023 ± 4",
                    "Target": "Crystalline",
                    "Crater type": "Complex",
                    "Country": "South Africa"
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [1.75, 42.8]},
                "properties": {"Name": "Azuara", "Crater diamter [km]": 30}
            },
            {
                "type": "Feature",
                "properties": {"Name": "No geometry"}
            }
        ]
    }"#;

    #[test]
    fn crater_geojson_annotates_and_drops() {
        let craters = parse_crater_geojson(CRATER_GEOJSON).unwrap();
        assert_eq!(craters.len(), 2);

        let vredefort = &craters[0];
        assert_eq!(vredefort.diameter_km, 160.0);
        assert_eq!(vredefort.age.min, 2019.0);
        assert_eq!(vredefort.age.max, 2027.0);
        assert_eq!(vredefort.age_text.as_deref(), Some("2023 ± 4"));
        assert_eq!(vredefort.location.longitude, 27.5);

        let azuara = &craters[1];
        assert_eq!(azuara.diameter_km, 30.0);
        assert_eq!(azuara.target_rock, "Unknown");
        // No age field: full default bracket.
        assert_eq!(azuara.age.min, 0.0);
        assert_eq!(azuara.age.max, 2500.0);
    }

    const CRATER_CSV: &str = "\
Name,Crater diamter [km],Age [Myr],Target,Crater type,Country,Longitude,Latitude
Barringer,1.186,0.049 ± 0.003,Sedimentary,Simple,U.S.A.,-111.022,35.027
Rowless,10,,Unknown,Unknown,Nowhere,,
";

    #[test]
    fn crater_csv_parses_and_drops_rowless() {
        let craters = parse_crater_csv(CRATER_CSV.as_bytes()).unwrap();
        assert_eq!(craters.len(), 1);

        let barringer = &craters[0];
        assert_eq!(barringer.name, "Barringer");
        assert_eq!(barringer.diameter_km, 1.186);
        assert!((barringer.age.min - 0.046).abs() < 1e-9);
        assert!((barringer.age.max - 0.052).abs() < 1e-9);
        assert_eq!(barringer.location.latitude, 35.027);
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        assert!(load_crater_file(Path::new("craters.parquet")).is_err());
        assert!(load_meteorite_file(Path::new("meteorites.xml")).is_err());
    }
}
