//! Live model discovery with catalog merge and static fallback.
//!
//! One `GET {base}/models` request against the OpenAI-compatible listing
//! endpoint, bounded by a fixed five-second budget. The contract is
//! degrade-only: a discovery call never fails. Whatever goes wrong (offline
//! mode, transport failure, bad status, malformed or empty payload), the
//! caller receives the catalog snapshot, and the taken path is recorded as a
//! [`FallbackReason`] instead of surfacing through logs alone.

use std::collections::{HashMap, HashSet};
use std::env;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::capabilities::{infer_input_modalities, is_reasoning_id};
use crate::catalog::Catalog;
use crate::constants::{defaults, env_vars, urls};
use crate::definition::{ModelCost, ModelDefinition};

/// Execution mode for a [`DiscoveryClient`].
///
/// Offline short-circuits to the catalog without touching the network,
/// keeping test suites deterministic. The mode is fixed at construction;
/// nothing on the discovery path consults the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiscoveryMode {
    #[default]
    Live,
    Offline,
}

impl DiscoveryMode {
    /// Map the process environment onto a mode: either flag in
    /// [`env_vars`](crate::constants::env_vars) being present selects
    /// [`DiscoveryMode::Offline`]. This is the only place the crate reads
    /// the environment.
    pub fn from_env() -> Self {
        if env::var_os(env_vars::DIGITALOCEAN_MODELS_OFFLINE).is_some()
            || env::var_os(env_vars::NEXTEST).is_some()
        {
            DiscoveryMode::Offline
        } else {
            DiscoveryMode::Live
        }
    }

    pub fn is_offline(self) -> bool {
        matches!(self, DiscoveryMode::Offline)
    }
}

/// Why a discovery call fell back to the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    /// The client runs offline; no request was attempted.
    #[error("live discovery is disabled")]
    Offline,
    /// Connect failure, timeout, or body-read failure.
    #[error("request failed: {0}")]
    Network(String),
    /// The endpoint answered outside the 2xx range.
    #[error("endpoint returned HTTP {0}")]
    Status(u16),
    /// The body was not the expected listing shape.
    #[error("malformed model listing: {0}")]
    MalformedListing(String),
    /// The listing (or the merged result) contained no models.
    #[error("model listing was empty")]
    EmptyListing,
}

/// Outcome of one discovery call.
///
/// Both variants carry a usable model list; the variant records which path
/// produced it. Callers that only want models use [`Discovery::into_models`].
#[derive(Debug, Clone, PartialEq)]
pub enum Discovery {
    /// Live listing merged with catalog metadata.
    Live(Vec<ModelDefinition>),
    /// Catalog snapshot, with the reason live discovery was abandoned.
    Fallback {
        models: Vec<ModelDefinition>,
        reason: FallbackReason,
    },
}

impl Discovery {
    pub fn models(&self) -> &[ModelDefinition] {
        match self {
            Discovery::Live(models) => models,
            Discovery::Fallback { models, .. } => models,
        }
    }

    pub fn into_models(self) -> Vec<ModelDefinition> {
        match self {
            Discovery::Live(models) => models,
            Discovery::Fallback { models, .. } => models,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Discovery::Live(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Discovery::Live(_) => None,
            Discovery::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// OpenAI-compatible `/models` listing. Entries also carry `object`,
/// `created`, and `owned_by`, none of which matter for the merge.
#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<RemoteModel>,
}

#[derive(Debug, Deserialize)]
struct RemoteModel {
    id: String,
}

/// Client for the model listing of one DigitalOcean Gradient account.
///
/// Stateless across calls and reentrant; each [`discover`](Self::discover)
/// call performs at most one request.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: Client,
    api_key: String,
    base_url: String,
    mode: DiscoveryMode,
    catalog: Catalog,
}

impl DiscoveryClient {
    /// Client against the production endpoint with the builtin catalog.
    /// The execution mode comes from [`DiscoveryMode::from_env`]; use
    /// [`with_mode`](Self::with_mode) to pin it explicitly.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(defaults::DISCOVERY_TIMEOUT)
            .connect_timeout(defaults::DISCOVERY_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_key: api_key.into(),
            base_url: urls::DIGITALOCEAN_API_BASE.to_string(),
            mode: DiscoveryMode::from_env(),
            catalog: Catalog::builtin().clone(),
        }
    }

    /// Pin the execution mode instead of deriving it from the environment.
    pub fn with_mode(mut self, mode: DiscoveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Point the client at a different listing endpoint, primarily for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the catalog backing merges and fallbacks, e.g. one loaded
    /// through [`Catalog::from_path`].
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run one discovery attempt.
    ///
    /// Never fails and never retries. Fallbacks other than
    /// [`FallbackReason::Offline`] log a single warning; the success path
    /// logs nothing.
    pub async fn discover(&self) -> Discovery {
        if self.mode.is_offline() {
            return Discovery::Fallback {
                models: self.catalog.to_vec(),
                reason: FallbackReason::Offline,
            };
        }

        match self.fetch_and_merge().await {
            Ok(models) => Discovery::Live(models),
            Err(reason) => {
                warn!("Failed to discover DigitalOcean models: {reason}; using static catalog");
                Discovery::Fallback {
                    models: self.catalog.to_vec(),
                    reason,
                }
            }
        }
    }

    async fn fetch_and_merge(&self) -> Result<Vec<ModelDefinition>, FallbackReason> {
        let url = format!("{}/models", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.trim()))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FallbackReason::Status(status.as_u16()));
        }

        let listing: ModelsResponse = response.json().await.map_err(map_reqwest_error)?;
        if listing.data.is_empty() {
            return Err(FallbackReason::EmptyListing);
        }

        let merged = merge_listing(&self.catalog, &listing.data);
        if merged.is_empty() {
            return Err(FallbackReason::EmptyListing);
        }
        Ok(merged)
    }
}

/// Discover models with the original degrade-only surface: environment
/// -selected mode, production endpoint, builtin catalog, plain list out.
/// Inspect the taken path through [`DiscoveryClient::discover`] instead when
/// it matters.
pub async fn discover(api_key: impl Into<String>) -> Vec<ModelDefinition> {
    DiscoveryClient::new(api_key).discover().await.into_models()
}

fn map_reqwest_error(err: reqwest::Error) -> FallbackReason {
    if err.is_timeout() {
        FallbackReason::Network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        FallbackReason::Network(format!("connection failed: {err}"))
    } else if err.is_decode() {
        FallbackReason::MalformedListing(err.to_string())
    } else {
        FallbackReason::Network(err.to_string())
    }
}

/// Merge a live listing with catalog metadata.
///
/// Known ids take the catalog record unchanged; unknown ids are synthesized
/// from provider defaults and the marker tables. Provider order is kept, and
/// a repeated id is emitted once (first occurrence wins) so the result
/// upholds the id-uniqueness invariant.
fn merge_listing(catalog: &Catalog, listing: &[RemoteModel]) -> Vec<ModelDefinition> {
    let by_id: HashMap<&str, &ModelDefinition> = catalog
        .iter()
        .map(|model| (model.id.as_str(), model))
        .collect();

    let mut seen = HashSet::with_capacity(listing.len());
    let mut merged = Vec::with_capacity(listing.len());
    for remote in listing {
        if !seen.insert(remote.id.as_str()) {
            continue;
        }
        match by_id.get(remote.id.as_str()) {
            Some(known) => merged.push((*known).clone()),
            None => merged.push(synthesize_definition(&remote.id)),
        }
    }
    merged
}

/// Definition for an id the catalog does not know: the id doubles as the
/// display name, capabilities come from the best-effort marker tables, and
/// limits and cost come from provider-wide defaults.
fn synthesize_definition(id: &str) -> ModelDefinition {
    ModelDefinition {
        id: id.to_string(),
        name: id.to_string(),
        reasoning: is_reasoning_id(id),
        input: infer_input_modalities(id),
        cost: ModelCost::ZERO,
        context_window: defaults::DEFAULT_CONTEXT_WINDOW,
        max_tokens: defaults::DEFAULT_MAX_TOKENS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::InputModality;

    fn listing(ids: &[&str]) -> Vec<RemoteModel> {
        ids.iter()
            .map(|id| RemoteModel { id: (*id).to_string() })
            .collect()
    }

    #[test]
    fn offline_flag_selects_offline_mode() {
        env::set_var(env_vars::DIGITALOCEAN_MODELS_OFFLINE, "1");
        assert_eq!(DiscoveryMode::from_env(), DiscoveryMode::Offline);
        env::remove_var(env_vars::DIGITALOCEAN_MODELS_OFFLINE);
    }

    #[test]
    fn catalog_records_win_for_known_ids() {
        let catalog = Catalog::builtin();
        let remote = listing(&["openai-gpt-4o", "anthropic-claude-4.5-sonnet"]);

        let merged = merge_listing(catalog, &remote);

        let expected: Vec<ModelDefinition> = remote
            .iter()
            .map(|entry| catalog.get(&entry.id).expect("catalog entry").clone())
            .collect();
        assert_eq!(merged, expected);
    }

    #[test]
    fn unknown_ids_get_synthesized_defaults() {
        let merged = merge_listing(Catalog::builtin(), &listing(&["some-new-model-x"]));

        match merged.as_slice() {
            [only] => {
                assert_eq!(only.id, "some-new-model-x");
                assert_eq!(only.name, "some-new-model-x");
                assert!(!only.reasoning);
                assert_eq!(only.input, vec![InputModality::Text]);
                assert_eq!(only.cost, ModelCost::ZERO);
                assert_eq!(only.context_window, 128_000);
                assert_eq!(only.max_tokens, 8_192);
            }
            other => panic!("expected a single synthesized record, found {other:?}"),
        }
    }

    #[test]
    fn synthesis_applies_capability_markers() {
        let merged = merge_listing(
            Catalog::builtin(),
            &listing(&["deepseek-r1-0528", "anthropic-claude-haiku-5"]),
        );

        let distill = merged
            .iter()
            .find(|model| model.id == "deepseek-r1-0528")
            .expect("synthesized distill record");
        assert!(distill.reasoning);
        assert_eq!(distill.input, vec![InputModality::Text]);

        let haiku = merged
            .iter()
            .find(|model| model.id == "anthropic-claude-haiku-5")
            .expect("synthesized haiku record");
        assert!(!haiku.reasoning);
        assert_eq!(
            haiku.input,
            vec![InputModality::Text, InputModality::Image]
        );
    }

    #[test]
    fn repeated_ids_are_emitted_once() {
        let merged = merge_listing(
            Catalog::builtin(),
            &listing(&["openai-gpt-4o", "some-new-model-x", "openai-gpt-4o"]),
        );

        let ids: Vec<&str> = merged.iter().map(|model| model.id.as_str()).collect();
        assert_eq!(ids, vec!["openai-gpt-4o", "some-new-model-x"]);
    }

    #[test]
    fn fallback_outcome_exposes_reason_and_models() {
        let outcome = Discovery::Fallback {
            models: Catalog::builtin().to_vec(),
            reason: FallbackReason::Status(500),
        };

        assert!(!outcome.is_live());
        assert_eq!(outcome.fallback_reason(), Some(&FallbackReason::Status(500)));
        assert_eq!(outcome.models().len(), Catalog::builtin().len());
        assert_eq!(outcome.into_models(), Catalog::builtin().to_vec());
    }
}
