use anyhow::{Context, Result};
use serde_json::{json, Value};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Dense recovery regions: (longitude, latitude) centres for landing spots.
const HOTSPOTS: [(f64, f64); 5] = [
    (10.0, 25.0),    // Sahara
    (60.0, -78.0),   // Antarctica
    (56.0, 20.0),    // Oman
    (133.0, -25.0),  // Australian outback
    (-105.0, 33.0),  // American southwest
];

const CLASSES: [&str; 10] = [
    "L6", "H5", "LL5", "H6", "L5", "CM2", "CV3", "Iron, IIAB", "Eucrite", "Ureilite",
];

fn generate_meteorites(rng: &mut SimpleRng, count: usize) -> Vec<Value> {
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        let (lon_c, lat_c) = *rng.pick(&HOTSPOTS);
        let longitude = rng.gauss(lon_c, 6.0);
        let latitude = rng.gauss(lat_c, 4.0).clamp(-89.0, 89.0);
        let mass_g = 10f64.powf(rng.next_f64() * 7.0);
        let year = 1800 + (rng.next_f64() * 223.0) as i32;

        let mut record = json!({
            "id": format!("{}", 1000 + i),
            "name": format!("Sample {:04}", i),
            "recclass": rng.pick(&CLASSES),
            "fall": if rng.next_f64() < 0.2 { "Fell" } else { "Found" },
        });
        let obj = record.as_object_mut().expect("record is an object");

        if rng.next_f64() > 0.08 {
            obj.insert("mass".into(), json!(format!("{mass_g:.1}")));
        }
        if rng.next_f64() > 0.05 {
            obj.insert("year".into(), json!(format!("{year:04}-01-01T00:00:00.000")));
        }

        // Rotate through the three location shapes the real feed serves;
        // a few records carry no location at all.
        if rng.next_f64() > 0.04 {
            match i % 3 {
                0 => {
                    obj.insert(
                        "geolocation".into(),
                        json!({
                            "latitude": format!("{latitude:.5}"),
                            "longitude": format!("{longitude:.5}"),
                        }),
                    );
                }
                1 => {
                    obj.insert(
                        "geolocation".into(),
                        json!({ "type": "Point", "coordinates": [longitude, latitude] }),
                    );
                }
                _ => {
                    obj.insert("reclat".into(), json!(format!("{latitude:.5}")));
                    obj.insert("reclong".into(), json!(format!("{longitude:.5}")));
                }
            }
        }

        records.push(record);
    }
    records
}

const TARGETS: [&str; 4] = ["Sedimentary", "Crystalline", "Mixed", "Unknown"];
const TYPES: [&str; 3] = ["Simple", "Complex", "Unknown"];
const COUNTRIES: [&str; 8] = [
    "Canada", "Australia", "U.S.A.", "South Africa", "Finland", "Russia", "Brazil", "Ghana",
];

fn age_text(rng: &mut SimpleRng, index: usize) -> Option<String> {
    let value = (rng.next_f64() * 2400.0).round();
    let tolerance = (rng.next_f64() * 20.0).round().max(1.0);
    match index % 6 {
        0 => Some(format!("{value} ± {tolerance}")),
        1 => Some(format!("~{value}-{}", value + tolerance)),
        2 => Some(format!("<{value}")),
        3 => Some(format!("~{value}")),
        4 => Some(format!("{value}")),
        // Leave some craters undated to exercise the default bracket.
        _ => None,
    }
}

fn generate_craters(rng: &mut SimpleRng, count: usize) -> Vec<Value> {
    let mut features = Vec::with_capacity(count);

    for i in 0..count {
        let longitude = rng.next_f64() * 360.0 - 180.0;
        let latitude = rng.next_f64() * 135.0 - 60.0;
        let diameter_km = 10f64.powf(rng.next_f64() * 2.5);

        let mut properties = json!({
            "Name": format!("Crater {:03}", i),
            "Crater diamter [km]": format!("{diameter_km:.2}"),
            "Target": rng.pick(&TARGETS),
            "Crater type": rng.pick(&TYPES),
            "Country": rng.pick(&COUNTRIES),
        });
        if let Some(age) = age_text(rng, i) {
            properties
                .as_object_mut()
                .expect("properties is an object")
                .insert("Age [Myr]".into(), json!(age));
        }

        features.push(json!({
            "type": "Feature",
            "id": format!("{i}"),
            "geometry": { "type": "Point", "coordinates": [longitude, latitude] },
            "properties": properties,
        }));
    }
    features
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    std::fs::create_dir_all("data").context("creating data directory")?;

    let meteorites = generate_meteorites(&mut rng, 400);
    let meteorite_path = "data/meteorites.json";
    std::fs::write(
        meteorite_path,
        serde_json::to_string_pretty(&meteorites).context("serializing meteorites")?,
    )
    .with_context(|| format!("writing {meteorite_path}"))?;

    let craters = generate_craters(&mut rng, 60);
    let crater_path = "data/earth-impact-craters.geojson";
    let collection = json!({ "type": "FeatureCollection", "features": craters });
    std::fs::write(
        crater_path,
        serde_json::to_string_pretty(&collection).context("serializing craters")?,
    )
    .with_context(|| format!("writing {crater_path}"))?;

    println!("Wrote {} meteorites to {meteorite_path}", meteorites.len());
    println!(
        "Wrote {} crater features to {crater_path} (picked up automatically at startup)",
        collection["features"].as_array().map_or(0, Vec::len),
    );
    println!("Load the meteorite file in the app via File → Open meteorites…");
    Ok(())
}
