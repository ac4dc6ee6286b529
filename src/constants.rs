//! Shared constants for the DigitalOcean Gradient integration.

/// URL constants for API endpoints
pub mod urls {
    /// Serverless inference endpoint; model listing lives under `/models`.
    pub const DIGITALOCEAN_API_BASE: &str = "https://inference.do-ai.run/v1";
}

/// Environment variables honored by [`crate::DiscoveryMode::from_env`]
pub mod env_vars {
    /// Opts out of live discovery when set, regardless of value.
    pub const DIGITALOCEAN_MODELS_OFFLINE: &str = "DIGITALOCEAN_MODELS_OFFLINE";
    /// Set by cargo-nextest in every test process it spawns.
    pub const NEXTEST: &str = "NEXTEST";
}

/// Provider-wide defaults applied to models discovered outside the catalog
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_CONTEXT_WINDOW: u32 = 128_000;
    pub const DEFAULT_MAX_TOKENS: u32 = 8_192;
    /// Whole-request budget for the single discovery attempt.
    pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);
}
