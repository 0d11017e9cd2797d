//! Specimen catalog loading.
//!
//! # Format
//! ```json
//! {
//!   "specimens": [
//!     {
//!       "id": "quartz",
//!       "display": "Quartz",
//!       "aliases": ["Rock Crystal"],
//!       "images": ["images/quartz/1.jpg", "images/quartz/2.jpg"],
//!       "modes": ["general", "silicates"]
//!     }
//!   ]
//! }
//! ```
//!
//! `aliases`, `images` and `modes` may be omitted.

use crate::error::{CatalogError, Result};
use crate::types::Specimen;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    specimens: Vec<Specimen>,
}

/// Validated, ordered list of specimens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    specimens: Vec<Specimen>,
}

/// Parse catalog JSON.
pub fn parse(content: &str) -> Result<Catalog> {
    if content.trim().is_empty() {
        return Ok(Catalog::default());
    }

    let file: CatalogFile = serde_json::from_str(content)?;
    Catalog::from_specimens(file.specimens)
}

impl Catalog {
    /// Build a catalog, rejecting blank names and duplicate ids.
    pub fn from_specimens(specimens: Vec<Specimen>) -> Result<Self> {
        let mut seen_ids = HashSet::new();

        for (index, specimen) in specimens.iter().enumerate() {
            if specimen.display.trim().is_empty() {
                return Err(CatalogError::MissingDisplay { index });
            }
            if !seen_ids.insert(specimen.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: specimen.id.clone(),
                    index,
                });
            }
        }

        Ok(Self { specimens })
    }

    /// Read and parse a catalog file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = parse(&content)?;
        tracing::info!(
            path = %path.display(),
            specimens = catalog.len(),
            "loaded specimen catalog"
        );
        Ok(catalog)
    }

    pub fn specimens(&self) -> &[Specimen] {
        &self.specimens
    }

    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Specimen> {
        self.specimens.iter().find(|s| s.id == id)
    }

    /// Every mode tag used in the catalog, sorted and de-duplicated.
    pub fn modes(&self) -> Vec<String> {
        self.specimens
            .iter()
            .flat_map(|s| s.modes.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `preferred` if any specimen uses it, else the first mode in sort order.
    pub fn default_mode(&self, preferred: &str) -> String {
        let modes = self.modes();
        if modes.iter().any(|m| m == preferred) {
            return preferred.to_string();
        }
        modes
            .into_iter()
            .next()
            .unwrap_or_else(|| preferred.to_string())
    }

    /// Specimens eligible for `mode`, in catalog order.
    pub fn pool(&self, mode: &str) -> Vec<Specimen> {
        self.specimens
            .iter()
            .filter(|s| s.is_eligible(mode))
            .cloned()
            .collect()
    }
}
