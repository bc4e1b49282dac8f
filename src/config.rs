//! SDK configuration
//!
//! Endpoint and graph URLs for a GNOSS platform instance, loadable from a
//! YAML file or string.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GnossResult;

/// Connection and graph configuration for a GNOSS platform instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Base URL of the platform API (consumed by the transport layer)
    pub api_url: String,
    /// Base URL under which resource graphs live, e.g.
    /// `http://graphs.example.org/`
    pub graphs_url: String,
    /// URL of the OWL ontology the resources conform to
    pub ontology_url: String,
    /// Short name of the target community, when resources are published
    /// into one
    #[serde(default)]
    pub community: Option<String>,
}

impl SdkConfig {
    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> GnossResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml_str(text: &str) -> GnossResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
