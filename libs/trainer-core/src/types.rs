//! Core types for the specimen trainer.

use crate::matching::DEFAULT_MATCH_THRESHOLD;
use serde::{Deserialize, Deserializer, Serialize};

/// An identifiable item the user must name from a picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specimen {
    pub id: String,
    #[serde(default)]
    pub display: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub aliases: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub modes: Vec<String>,
}

impl Specimen {
    /// Create a specimen with no aliases, images or modes.
    pub fn new(id: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display: display.into(),
            aliases: Vec::new(),
            images: Vec::new(),
            modes: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = modes.into_iter().map(Into::into).collect();
        self
    }

    /// Every acceptable answer, display name first.
    pub fn accepted_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.display.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn in_mode(&self, mode: &str) -> bool {
        self.modes.iter().any(|m| m == mode)
    }

    /// Whether the specimen can be drawn for the given mode.
    pub fn is_eligible(&self, mode: &str) -> bool {
        self.in_mode(mode) && !self.images.is_empty()
    }
}

/// Treat an explicit `null` the same as a missing list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordering used for the review listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOrder {
    /// Highest accuracy first, never-attempted specimens last.
    StrongestFirst,
    /// Never-attempted specimens first, then lowest accuracy.
    WeakestFirst,
}

impl Default for ReviewOrder {
    fn default() -> Self {
        Self::StrongestFirst
    }
}

impl ReviewOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongestFirst => "strongest_first",
            Self::WeakestFirst => "weakest_first",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "strongest_first" => Some(Self::StrongestFirst),
            "weakest_first" => Some(Self::WeakestFirst),
            _ => None,
        }
    }
}

/// Trainer-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerSettings {
    /// Minimum similarity for a guess to count as correct.
    pub match_threshold: f64,
    /// Mode selected when a session starts without one.
    pub default_mode: String,
    pub review_order: ReviewOrder,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            default_mode: "general".to_string(),
            review_order: ReviewOrder::default(),
        }
    }
}
