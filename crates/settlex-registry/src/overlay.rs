//! Versioned registry overlay files
//!
//! Deployments can extend or override the bundled tables without a rebuild
//! by shipping a JSON overlay next to the application. The file is versioned;
//! a version this build does not understand is rejected rather than half
//! applied.

use crate::{ChainInfo, Registry, RegistryError, Result, SpokeDeployment, TokenInfo};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Overlay file format version understood by this build
pub const REGISTRY_FILE_VERSION: u32 = 1;

/// A registry overlay: entries to merge into the bundled tables
///
/// Entries match on chain id (chains), display name (tokens), and chain name
/// (Spoke deployments); a matching entry replaces the bundled one, anything
/// else is appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Format version; must equal [`REGISTRY_FILE_VERSION`]
    pub version: u32,
    /// Chain entries to merge
    #[serde(default)]
    pub chains: Vec<ChainInfo>,
    /// Token entries to merge
    #[serde(default)]
    pub tokens: Vec<TokenInfo>,
    /// Spoke deployment entries to merge
    #[serde(default)]
    pub spokes: Vec<SpokeDeployment>,
}

impl Default for RegistryFile {
    fn default() -> Self {
        Self {
            version: REGISTRY_FILE_VERSION,
            chains: Vec::new(),
            tokens: Vec::new(),
            spokes: Vec::new(),
        }
    }
}

impl RegistryFile {
    /// Creates an empty overlay at the current format version
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an overlay from JSON, rejecting unknown versions
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RegistryFile = serde_json::from_str(json)?;
        if file.version != REGISTRY_FILE_VERSION {
            return Err(RegistryError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }

    /// Loads an overlay from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads an overlay, falling back to an empty one when the file is
    /// missing or unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|json| Self::from_json(&json).ok())
            .unwrap_or_default()
    }

    /// Saves the overlay as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Merges the overlay into a registry
    ///
    /// The merged result is validated before the registry is touched; on
    /// error the registry is left exactly as it was.
    pub fn apply(&self, registry: &mut Registry) -> Result<()> {
        let mut merged = registry.clone();
        for chain in &self.chains {
            merged.chains.upsert_chain(chain.clone());
        }
        for token in &self.tokens {
            merged.tokens.upsert_token(token.clone());
        }
        for spoke in &self.spokes {
            merged.spokes.upsert_deployment(spoke.clone());
        }
        merged.validate()?;
        *registry = merged;
        Ok(())
    }

    /// Returns true if the overlay carries no entries
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.tokens.is_empty() && self.spokes.is_empty()
    }
}
