//! DigitalOcean Gradient model catalog with best-effort live discovery.
//!
//! The crate ships a hand-maintained, versioned catalog of the models served
//! through DigitalOcean's Gradient inference endpoint, plus a discovery
//! client that refreshes that catalog from the live `/models` listing.
//! Discovery is degrade-only: transport failures, bad statuses, and malformed
//! or empty payloads all fall back to the catalog snapshot, and the returned
//! [`Discovery`] outcome records which path was taken.
//!
//! ```no_run
//! use digitalocean_models::{DiscoveryClient, DiscoveryMode};
//!
//! # async fn run() {
//! let client = DiscoveryClient::new("do-api-key").with_mode(DiscoveryMode::Live);
//! let outcome = client.discover().await;
//! for model in outcome.models() {
//!     println!("{} ({})", model.name, model.id);
//! }
//! # }
//! ```

pub mod capabilities;
pub mod catalog;
pub mod constants;
pub mod definition;
pub mod discovery;

pub use catalog::{CATALOG_FORMAT_VERSION, Catalog, CatalogError};
pub use definition::{InputModality, ModelCost, ModelDefinition};
pub use discovery::{Discovery, DiscoveryClient, DiscoveryMode, FallbackReason, discover};
