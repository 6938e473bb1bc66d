//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Flattened primitive geometry as consumed by the node graph
//!
//! Vertex positions plus separate line, triangle and quad index arrays, each
//! able to carry its own attribute channels.

use serde::{Deserialize, Serialize};

use crate::attributes::AttrVector;
use crate::error::{Error, Result};

/// Vertex channel holding per-vertex colour.
pub const COLOR_ATTR: &str = "clr";

/// Flattened line/triangle/quad geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveObject {
    /// Vertex positions (the graph's `pos` attribute).
    pub verts: AttrVector<[f32; 3]>,
    #[serde(default)]
    pub lines: AttrVector<[u32; 2]>,
    #[serde(default)]
    pub tris: AttrVector<[u32; 3]>,
    #[serde(default)]
    pub quads: AttrVector<[u32; 4]>,
}

impl PrimitiveObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn size(&self) -> usize {
        self.verts.len()
    }

    /// Resize the vertex array and its channels.
    pub fn resize(&mut self, n: usize) {
        self.verts.resize(n);
    }

    /// True when the primitive has lines but neither triangles nor quads.
    pub fn is_lines_only(&self) -> bool {
        self.tris.is_empty() && self.quads.is_empty()
    }

    /// Check every line/triangle/quad index against the vertex count.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.verts.len();
        check_indices("line", self.lines.iter().flatten().copied(), vertex_count)?;
        check_indices("triangle", self.tris.iter().flatten().copied(), vertex_count)?;
        check_indices("quad", self.quads.iter().flatten().copied(), vertex_count)?;
        Ok(())
    }
}

fn check_indices(
    context: &'static str,
    mut indices: impl Iterator<Item = u32>,
    vertex_count: usize,
) -> Result<()> {
    match indices.find(|&i| i as usize >= vertex_count) {
        Some(index) => Err(Error::VertexIndexOutOfRange {
            context,
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}
