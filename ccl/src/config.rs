//! Labeling configuration.
//!
//! A [`Config`] picks the adjacency and the labeling strategy. It can be read
//! from YAML or JSON; every field has a default, so an empty document is a
//! valid 4-connected configuration:
//!
//! ```yaml
//! connectivity: eight      # four | eight, ignored when `neighborhood` is set
//! method: auto             # auto | relaxation | union_find
//! neighborhood:            # optional custom kernel, '#' = active
//!   - "..#.."
//!   - "#####"
//!   - "..#.."
//! ```

use std::path::Path;

use common::FileFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::labeling::Connectivity;
use crate::neighborhood::Neighborhood;

/// Strategy used to compute the labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelingMethod {
    /// Fast pair sweeps for plain 4/8-connectivity, relaxation for a custom
    /// neighborhood.
    #[default]
    Auto,
    /// Seeding plus iterative relaxation.
    Relaxation,
    /// Single raster pass with union-find.
    UnionFind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub connectivity: Connectivity,
    /// Custom adjacency. Takes precedence over `connectivity` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<Neighborhood>,
    pub method: LabelingMethod,
}

impl Config {
    pub fn with_connectivity(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    pub fn with_neighborhood(neighborhood: Neighborhood) -> Self {
        Self {
            neighborhood: Some(neighborhood),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: LabelingMethod) -> Self {
        self.method = method;
        self
    }

    pub fn validate(&self) -> Result<()> {
        match &self.neighborhood {
            Some(nbr) if !nbr.has_neighbors() => Err(Error::EmptyNeighborhood),
            _ => Ok(()),
        }
    }

    /// Parse and validate a configuration document.
    pub fn from_str(text: &str, format: FileFormat) -> anyhow::Result<Self> {
        let config: Self = common::serde::deserialize(text, format)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file; the format follows the
    /// extension (`.yaml`, `.yml` or `.json`).
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config: Self = common::serde::deserialize_file(path)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config.method, "loaded labeling config");
        Ok(config)
    }

    pub fn to_string(&self, format: FileFormat) -> anyhow::Result<String> {
        common::serde::serialize(self, format)
    }
}
