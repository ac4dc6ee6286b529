//! Versioned catalog of known DigitalOcean Gradient models.
//!
//! The builtin catalog is embedded from `assets/models.json` and parsed once
//! on first use. The same document format loads from disk through
//! [`Catalog::from_path`], so catalog updates can ship as data without a
//! rebuild. Every load path validates the record invariants (unique ids,
//! non-empty modalities, positive token limits, non-negative costs) before a
//! catalog is handed out; discovery and merge code can rely on them.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

use crate::definition::ModelDefinition;

/// Catalog document format version this crate understands.
pub const CATALOG_FORMAT_VERSION: u32 = 1;

const EMBEDDED_CATALOG: &str = include_str!("../assets/models.json");

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json_str(EMBEDDED_CATALOG).expect("embedded model catalog is valid")
});

/// On-disk and embedded representation of a catalog.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    version: u32,
    models: Vec<ModelDefinition>,
}

/// Problems loading or validating a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported catalog version {found}, expected {expected}", expected = CATALOG_FORMAT_VERSION)]
    UnsupportedVersion { found: u32 },
    #[error("duplicate model id `{0}`")]
    DuplicateId(String),
    #[error("model `{0}` lists no input modalities")]
    EmptyInput(String),
    #[error("model `{0}` has a zero context window or max tokens")]
    InvalidLimits(String),
    #[error("model `{0}` has a negative cost")]
    NegativeCost(String),
}

/// Ordered, read-only collection of model definitions.
///
/// Construction validates; once built, a catalog never changes. Merging with
/// a live listing always produces a new list.
#[derive(Debug, Clone)]
pub struct Catalog {
    models: Vec<ModelDefinition>,
}

impl Catalog {
    /// The catalog embedded at compile time, shared for the process lifetime.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parse and validate a catalog document.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        if document.version != CATALOG_FORMAT_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: document.version,
            });
        }
        Self::from_models(document.models)
    }

    /// Load and validate a catalog document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Validate an explicit model list, preserving its order.
    pub fn from_models(models: Vec<ModelDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for model in &models {
            if !seen.insert(model.id.as_str()) {
                return Err(CatalogError::DuplicateId(model.id.clone()));
            }
            if model.input.is_empty() {
                return Err(CatalogError::EmptyInput(model.id.clone()));
            }
            if model.context_window == 0 || model.max_tokens == 0 {
                return Err(CatalogError::InvalidLimits(model.id.clone()));
            }
            if !model.cost.is_non_negative() {
                return Err(CatalogError::NegativeCost(model.id.clone()));
            }
        }
        Ok(Self { models })
    }

    pub fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    pub fn get(&self, id: &str) -> Option<&ModelDefinition> {
        self.models.iter().find(|model| model.id == id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDefinition> {
        self.models.iter()
    }

    /// Owned snapshot, used for fallback results.
    pub(crate) fn to_vec(&self) -> Vec<ModelDefinition> {
        self.models.clone()
    }
}
