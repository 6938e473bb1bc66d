//! Conversion switches, mirroring the parameters of the graph's conversion nodes.

use serde::{Deserialize, Serialize};

use crate::primitive::COLOR_ATTR;

/// Switches for [`super::mesh_to_primitive`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshToPrimitiveOptions {
    /// Keep 4-corner polygons as quads instead of splitting them.
    pub allow_quads: bool,
    /// Bake the mesh's world matrix into the positions.
    pub do_transform: bool,
    /// Emit mesh edges as line primitives.
    pub has_edges: bool,
    /// Emit polygons as triangles/quads.
    pub has_faces: bool,
    /// Copy vertex attribute channels.
    pub has_vert_attr: bool,
}

impl Default for MeshToPrimitiveOptions {
    fn default() -> Self {
        Self {
            allow_quads: false,
            do_transform: true,
            has_edges: false,
            has_faces: true,
            has_vert_attr: false,
        }
    }
}

/// Switches for [`super::primitive_to_mesh`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveToMeshOptions {
    pub is_smooth: bool,
    /// Turn line primitives into mesh edges and two-corner polygons.
    pub has_edges: bool,
    /// Turn triangles and quads into polygons.
    pub has_faces: bool,
    /// Promote the colour vertex channel to per-loop colours.
    pub has_vert_color: bool,
    /// Deep-copy vertex attribute channels.
    pub has_vert_attr: bool,
    /// Copy triangle/quad attribute channels onto polygons.
    pub has_face_attr: bool,
    /// Name of the vertex channel holding colour. Config files set this
    /// through `color.channel` only.
    #[serde(skip)]
    pub color_attr: String,
}

impl Default for PrimitiveToMeshOptions {
    fn default() -> Self {
        Self {
            is_smooth: false,
            has_edges: false,
            has_faces: true,
            has_vert_color: false,
            has_vert_attr: false,
            has_face_attr: false,
            color_attr: COLOR_ATTR.to_string(),
        }
    }
}
