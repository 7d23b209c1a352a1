//! Analyzer configuration loading for the CLI

use analyzer_lib::AnalyzerConfig;
use anyhow::{Context, Result};

/// Load analyzer settings, letting RSZ_* environment variables
/// override the defaults (e.g. RSZ_WASTE_THRESHOLD=0.5)
///
/// A malformed variable fails the load rather than silently running on
/// defaults with the overrides dropped.
pub fn load_analyzer_config() -> Result<AnalyzerConfig> {
    let config = config::Config::builder()
        .add_source(config::Environment::with_prefix("RSZ"))
        .build()?;

    config
        .try_deserialize()
        .context("invalid RSZ_* configuration")
}
