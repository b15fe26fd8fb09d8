mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;
use std::thread;

use app::ImpactAtlasApp;
use data::loader;
use data::model::{CraterCatalog, MeteoriteCatalog};
use eframe::egui;
use state::AppState;

/// Bundled crater dataset, loaded at startup when present.
const CRATER_DATA_PATH: &str = "data/earth-impact-craters.geojson";

/// Start both dataset loads, wait for both, degrade failures to empty sets.
fn load_initial_data() -> (MeteoriteCatalog, CraterCatalog) {
    let meteorites = thread::spawn(|| {
        match loader::fetch_meteorites(loader::METEORITE_API_LIMIT) {
            Ok(records) => {
                log::info!("Fetched {} meteorites", records.len());
                records
            }
            Err(e) => {
                log::error!("Meteorite download failed, starting empty: {e}");
                Vec::new()
            }
        }
    });

    let craters = thread::spawn(|| {
        let path = Path::new(CRATER_DATA_PATH);
        if !path.exists() {
            log::warn!("{CRATER_DATA_PATH} not found. Impact craters will not be displayed.");
            return Vec::new();
        }
        match loader::load_crater_file(path) {
            Ok(records) => {
                log::info!("Loaded {} craters", records.len());
                records
            }
            Err(e) => {
                log::error!("Crater load failed, starting empty: {e:#}");
                Vec::new()
            }
        }
    });

    (
        MeteoriteCatalog::from_records(meteorites.join().unwrap_or_default()),
        CraterCatalog::from_records(craters.join().unwrap_or_default()),
    )
}

fn main() -> eframe::Result {
    env_logger::init();

    let (meteorites, craters) = load_initial_data();
    let state = AppState::new(meteorites, craters);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Impact Atlas",
        options,
        Box::new(|_cc| Ok(Box::new(ImpactAtlasApp::new(state)))),
    )
}
