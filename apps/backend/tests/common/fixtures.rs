//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use trainer_core::{Catalog, Specimen};

/// Every image in the `general` pool.
pub const GENERAL_IMAGES: [&str; 4] = ["quartz-1.jpg", "quartz-2.jpg", "calcite-1.jpg", "galena-1.jpg"];

/// Catalog used by the integration tests.
///
/// - `general`: quartz, calcite, galena (gold has no images)
/// - `ores`: galena only
/// - obsidian belongs to no mode
pub fn catalog() -> Catalog {
    Catalog::from_specimens(vec![
        Specimen::new("quartz", "Quartz")
            .with_aliases(["Rock Crystal"])
            .with_images(["quartz-1.jpg", "quartz-2.jpg"])
            .with_modes(["general"]),
        Specimen::new("calcite", "Calcite")
            .with_images(["calcite-1.jpg"])
            .with_modes(["general"]),
        Specimen::new("galena", "Galena")
            .with_images(["galena-1.jpg"])
            .with_modes(["general", "ores"]),
        Specimen::new("gold", "Gold").with_modes(["general"]),
        Specimen::new("obsidian", "Obsidian").with_images(["obsidian-1.jpg"]),
    ])
    .expect("fixture catalog is valid")
}

/// Create a session request body.
pub fn create_session_request(mode: Option<&str>) -> serde_json::Value {
    match mode {
        Some(m) => json!({ "mode": m }),
        None => json!({}),
    }
}

/// Create a check request body.
pub fn check_request(guess: &str) -> serde_json::Value {
    json!({ "guess": guess })
}

/// Create a switch mode request body.
pub fn switch_mode_request(mode: &str) -> serde_json::Value {
    json!({ "mode": mode })
}
