//! Bridge configuration
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::converter::{MeshToPrimitiveOptions, PrimitiveToMeshOptions};
use crate::error::{Error, Result};
use crate::primitive::COLOR_ATTR;

fn default_graph_name() -> String {
    "NodeTree".to_string()
}

fn default_color_channel() -> String {
    COLOR_ATTR.to_string()
}

/// Vertex colour handling.
///
/// Gamma is fixed at [`crate::converter::GAMMA`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_color_channel")]
    pub channel: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            channel: default_color_channel(),
        }
    }
}

/// Top-level configuration for conversions and graph sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub mesh_to_primitive: MeshToPrimitiveOptions,
    #[serde(default)]
    pub primitive_to_mesh: PrimitiveToMeshOptions,
    #[serde(default)]
    pub color: ColorConfig,
    /// Graph switched to before every evaluation.
    #[serde(default = "default_graph_name")]
    pub graph_name: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mesh_to_primitive: MeshToPrimitiveOptions::default(),
            primitive_to_mesh: PrimitiveToMeshOptions::default(),
            color: ColorConfig::default(),
            graph_name: default_graph_name(),
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.graph_name.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "graph_name must not be empty".to_string(),
            });
        }
        if self.color.channel.is_empty() {
            return Err(Error::InvalidConfig {
                message: "color.channel must not be empty".to_string(),
            });
        }
        if !self.mesh_to_primitive.has_faces && !self.mesh_to_primitive.has_edges {
            tracing::warn!("mesh_to_primitive emits neither faces nor edges");
        }
        Ok(())
    }

    /// Primitive-to-mesh options with the configured colour channel applied.
    #[must_use]
    pub fn primitive_to_mesh_options(&self) -> PrimitiveToMeshOptions {
        PrimitiveToMeshOptions {
            color_attr: self.color.channel.clone(),
            ..self.primitive_to_mesh.clone()
        }
    }
}
