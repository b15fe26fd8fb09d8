use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::model::Coordinates;

// ---------------------------------------------------------------------------
// Permissive numeric coercion
// ---------------------------------------------------------------------------

/// A field that may arrive as a JSON number, a numeric string, or junk.
/// The NASA feed serves most numbers as strings; the crater export mixes both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumericField {
    /// Interpret the field as an `f64`. Non-numeric text coerces to `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumericField::Number(v) => Some(*v),
            NumericField::Text(s) => s.trim().parse().ok(),
            NumericField::Other(_) => None,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericField::Number(v) => write!(f, "{v}"),
            NumericField::Text(s) => write!(f, "{s}"),
            NumericField::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Coerce an optional raw field to a number, `None` on failure or absence.
pub fn coerce_number(field: Option<&NumericField>) -> Option<f64> {
    field.and_then(NumericField::as_f64)
}

// ---------------------------------------------------------------------------
// Coordinate resolution
// ---------------------------------------------------------------------------

/// The `geolocation` object as served over the years: either named fields or
/// a GeoJSON-style `[lon, lat]` pair. Anything else is unresolvable.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawGeolocation {
    Named {
        latitude: NumericField,
        longitude: NumericField,
    },
    Point {
        coordinates: Vec<NumericField>,
    },
    Other(serde_json::Value),
}

/// Resolve one of the three documented coordinate shapes to a canonical pair.
///
/// Priority: `geolocation.{latitude,longitude}`, then
/// `geolocation.coordinates: [lon, lat]`, then top-level `reclat`/`reclong`.
/// A coercion failure inside a present shape counts as unresolvable.
pub fn resolve_coordinates(
    geolocation: Option<&RawGeolocation>,
    reclat: Option<&NumericField>,
    reclong: Option<&NumericField>,
) -> Option<Coordinates> {
    match geolocation {
        Some(RawGeolocation::Named {
            latitude,
            longitude,
        }) => Some(Coordinates {
            longitude: longitude.as_f64()?,
            latitude: latitude.as_f64()?,
        }),
        Some(RawGeolocation::Point { coordinates }) => match coordinates.as_slice() {
            [lon, lat] => Some(Coordinates {
                longitude: lon.as_f64()?,
                latitude: lat.as_f64()?,
            }),
            _ => None,
        },
        Some(RawGeolocation::Other(_)) => None,
        None => Some(Coordinates {
            longitude: reclong?.as_f64()?,
            latitude: reclat?.as_f64()?,
        }),
    }
}

// ---------------------------------------------------------------------------
// Recovery year
// ---------------------------------------------------------------------------

/// Extract the year from a date-like string such as
/// `"1880-01-01T00:00:00.000"`: the first four characters, parsed as a number.
pub fn parse_recovery_year(text: &str) -> Option<i32> {
    let prefix: String = text.chars().take(4).collect();
    prefix.parse::<f64>().ok().map(|v| v as i32)
}

// ---------------------------------------------------------------------------
// Age-string grammar
// ---------------------------------------------------------------------------

pub const AGE_MIN_DEFAULT: f64 = 0.0;
pub const AGE_MAX_DEFAULT: f64 = 2500.0;

static AGE_PLUS_MINUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*±\s*(\d+(?:\.\d+)?)").expect("valid regex")
});
static AGE_EXPLICIT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^~?(\d+(?:\.\d+)?)-(\d+(?:\.\d+)?)").expect("valid regex")
});
static AGE_BOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[<>]?(\d+(?:\.\d+)?)").expect("valid regex"));
static AGE_APPROX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~?(\d+(?:\.\d+)?)").expect("valid regex"));

fn capture_number(captures: &regex::Captures<'_>, index: usize) -> Option<f64> {
    captures.get(index).and_then(|m| m.as_str().parse().ok())
}

/// Parse a free-text crater age such as `"35 ± 5"`, `"~10-20"`, `"<50"` or
/// `"~120"` into a numeric bracket. Ordered, first match wins; earlier
/// patterns are syntactic subsets of later ones, so the order is load-bearing.
///
/// The bound pattern accepts `<`, `>` and no operator alike and always yields
/// `[0, value]` — the direction of the inequality is discarded. That matches
/// the upstream datasets' established behaviour and is kept for compatibility,
/// suspect as it looks.
pub fn parse_age_interval(text: &str) -> (Option<f64>, Option<f64>) {
    let text = text.trim();
    if text.is_empty() {
        return (None, None);
    }

    if let Some(c) = AGE_PLUS_MINUS.captures(text) {
        if let (Some(value), Some(tolerance)) = (capture_number(&c, 1), capture_number(&c, 2)) {
            return (Some(value - tolerance), Some(value + tolerance));
        }
    }
    if let Some(c) = AGE_EXPLICIT_RANGE.captures(text) {
        if let (Some(min), Some(max)) = (capture_number(&c, 1), capture_number(&c, 2)) {
            return (Some(min), Some(max));
        }
    }
    if let Some(c) = AGE_BOUND.captures(text) {
        if let Some(value) = capture_number(&c, 1) {
            return (Some(0.0), Some(value));
        }
    }
    if let Some(c) = AGE_APPROX.captures(text) {
        if let Some(value) = capture_number(&c, 1) {
            return (Some(value), Some(value));
        }
    }

    (None, None)
}

/// Parse and substitute the fixed defaults for unresolved bounds. This runs
/// once per record at load time; the result is stored on the record.
pub fn age_interval(text: Option<&str>) -> super::model::AgeInterval {
    let (min, max) = text.map(parse_age_interval).unwrap_or((None, None));
    super::model::AgeInterval {
        min: min.unwrap_or(AGE_MIN_DEFAULT),
        max: max.unwrap_or(AGE_MAX_DEFAULT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NumericField {
        NumericField::Text(s.to_string())
    }

    #[test]
    fn age_plus_minus() {
        assert_eq!(parse_age_interval("35 ± 5"), (Some(30.0), Some(40.0)));
        assert_eq!(parse_age_interval("455.0 ± 2.5"), (Some(452.5), Some(457.5)));
    }

    #[test]
    fn age_explicit_range() {
        assert_eq!(parse_age_interval("~10-20"), (Some(10.0), Some(20.0)));
        assert_eq!(parse_age_interval("120-200"), (Some(120.0), Some(200.0)));
    }

    #[test]
    fn age_bound_discards_direction() {
        assert_eq!(parse_age_interval("<50"), (Some(0.0), Some(50.0)));
        // '>' collapses to the same upper bound, same as the source datasets.
        assert_eq!(parse_age_interval(">50"), (Some(0.0), Some(50.0)));
        // A bare number is caught by the optional-operator bound pattern.
        assert_eq!(parse_age_interval("120"), (Some(0.0), Some(120.0)));
    }

    #[test]
    fn age_approx_single_value() {
        assert_eq!(parse_age_interval("~120"), (Some(120.0), Some(120.0)));
        assert_eq!(parse_age_interval("~3.5"), (Some(3.5), Some(3.5)));
    }

    #[test]
    fn age_unparsable() {
        assert_eq!(parse_age_interval(""), (None, None));
        assert_eq!(parse_age_interval("Proterozoic"), (None, None));
    }

    #[test]
    fn age_interval_substitutes_defaults() {
        let interval = age_interval(None);
        assert_eq!(interval.min, 0.0);
        assert_eq!(interval.max, 2500.0);

        let interval = age_interval(Some("not a date"));
        assert_eq!(interval.min, 0.0);
        assert_eq!(interval.max, 2500.0);

        let interval = age_interval(Some("35 ± 5"));
        assert_eq!(interval.min, 30.0);
        assert_eq!(interval.max, 40.0);
    }

    #[test]
    fn coercion_is_permissive_about_text() {
        assert_eq!(coerce_number(Some(&text(" 1200.5 "))), Some(1200.5));
        assert_eq!(coerce_number(Some(&NumericField::Number(12.0))), Some(12.0));
        assert_eq!(coerce_number(Some(&text("12g"))), None);
        assert_eq!(coerce_number(None), None);
    }

    #[test]
    fn resolves_named_geolocation() {
        let geo = RawGeolocation::Named {
            latitude: text("50.775"),
            longitude: text("6.08333"),
        };
        let coords = resolve_coordinates(Some(&geo), None, None).unwrap();
        assert_eq!(coords.latitude, 50.775);
        assert_eq!(coords.longitude, 6.08333);
    }

    #[test]
    fn resolves_coordinate_pair() {
        let geo = RawGeolocation::Point {
            coordinates: vec![NumericField::Number(6.08333), NumericField::Number(50.775)],
        };
        let coords = resolve_coordinates(Some(&geo), None, None).unwrap();
        // GeoJSON order: longitude first.
        assert_eq!(coords.longitude, 6.08333);
        assert_eq!(coords.latitude, 50.775);

        let short = RawGeolocation::Point {
            coordinates: vec![NumericField::Number(6.0)],
        };
        assert!(resolve_coordinates(Some(&short), None, None).is_none());
    }

    #[test]
    fn resolves_top_level_fields() {
        let coords = resolve_coordinates(None, Some(&text("50.775")), Some(&text("6.08333")));
        assert_eq!(
            coords,
            Some(Coordinates {
                longitude: 6.08333,
                latitude: 50.775,
            })
        );
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        let geo = RawGeolocation::Named {
            latitude: text("fifty"),
            longitude: text("6.0"),
        };
        assert!(resolve_coordinates(Some(&geo), None, None).is_none());
        assert!(resolve_coordinates(None, Some(&text("n/a")), Some(&text("6.0"))).is_none());
        assert!(resolve_coordinates(None, None, None).is_none());
    }

    #[test]
    fn recovery_year_takes_leading_digits() {
        assert_eq!(parse_recovery_year("1880-01-01T00:00:00.000"), Some(1880));
        assert_eq!(parse_recovery_year("0860-01-01T00:00:00.000"), Some(860));
        assert_eq!(parse_recovery_year("2023"), Some(2023));
        assert_eq!(parse_recovery_year("Unknown"), None);
    }
}
