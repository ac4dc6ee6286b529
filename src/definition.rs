//! Model metadata records shared with the hosting model registry.
//!
//! The serialized shape (camelCase fields, lowercase modality names) is the
//! provider-facing config format; the embedded catalog document and any
//! external catalog file use the same representation.

use serde::{Deserialize, Serialize};

/// Input modality a model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputModality {
    Text,
    Image,
}

/// Per-unit pricing for a model.
///
/// DigitalOcean bills Gradient inference through account credits rather than
/// per-token prices, so every catalog entry carries [`ModelCost::ZERO`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
}

impl ModelCost {
    pub const ZERO: ModelCost = ModelCost {
        input: 0.0,
        output: 0.0,
        cache_read: 0.0,
        cache_write: 0.0,
    };

    /// True when no field is negative. Negative prices are rejected at
    /// catalog load time.
    pub(crate) fn is_non_negative(&self) -> bool {
        self.input >= 0.0 && self.output >= 0.0 && self.cache_read >= 0.0 && self.cache_write >= 0.0
    }
}

/// One model entry, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    /// Stable identifier, used as the merge key against the live listing.
    pub id: String,
    /// Human-readable display label.
    pub name: String,
    /// Whether the model performs extended/chain-of-thought inference.
    pub reasoning: bool,
    /// Supported input modalities; never empty.
    pub input: Vec<InputModality>,
    /// Omitted in catalog documents when zero, which is every current entry.
    #[serde(default)]
    pub cost: ModelCost,
    /// Maximum combined input and output tokens.
    pub context_window: u32,
    /// Maximum output tokens per request.
    pub max_tokens: u32,
}

impl ModelDefinition {
    pub fn supports_vision(&self) -> bool {
        self.input.contains(&InputModality::Image)
    }
}
