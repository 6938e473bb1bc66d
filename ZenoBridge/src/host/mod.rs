//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Host application boundary
//!
//! The host hands over its mesh arrays as contiguous typed buffers. They are
//! borrowed here as a [`MeshView`], validated once, then copied into the
//! canonical [`crate::mesh::Mesh`]. Results travel back as owned
//! [`HostMeshBuffers`] in the host's layout.

mod buffers;
mod layers;
mod view;

pub use buffers::HostMeshBuffers;
pub use layers::{CustomLayer, LayerType};
pub use view::{HostEdge, HostLoop, HostPolygon, MeshView, cast_buffer};

use crate::error::{Error, Result};
use crate::mesh::{Axis, Bone, SceneObject};

/// An object as the host exposes it.
#[derive(Debug, Clone)]
pub enum HostObject<'a> {
    /// An empty: placement only.
    Empty(Axis),
    /// A mesh object and its borrowed buffers.
    Mesh {
        axis: Axis,
        view: MeshView<'a>,
        is_smooth: bool,
        use_auto_smooth: bool,
    },
    /// An armature: its placement plus the depth-first bone list, each
    /// bone carrying its local pose delta.
    Armature { axis: Axis, bones: Vec<Bone> },
    /// A pose bone, already decoded by the host layer.
    Bone(Bone),
    /// Volumetric data; cannot cross the bridge.
    Volume,
}

impl HostObject<'_> {
    /// Copy the host data into a scene object.
    pub fn materialize(&self, name: &str) -> Result<SceneObject> {
        match self {
            Self::Empty(axis) => Ok(SceneObject::Axis(*axis)),
            Self::Mesh {
                axis,
                view,
                is_smooth,
                use_auto_smooth,
            } => {
                let mut mesh = view.to_mesh(*axis)?;
                mesh.is_smooth = *is_smooth;
                mesh.use_auto_smooth = *use_auto_smooth;
                Ok(SceneObject::Mesh(mesh))
            }
            Self::Armature { axis, .. } => Ok(SceneObject::Axis(*axis)),
            Self::Bone(bone) => Ok(SceneObject::Bone(bone.clone())),
            Self::Volume => Err(Error::UnsupportedObject {
                name: name.to_string(),
                kind: self.kind_name().to_string(),
            }),
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty(_) => "empty",
            Self::Mesh { .. } => "mesh",
            Self::Armature { .. } => "armature",
            Self::Bone(_) => "bone",
            Self::Volume => "volume",
        }
    }
}

/// Lookup of host objects by name.
pub trait HostScene {
    fn object(&self, name: &str) -> Option<HostObject<'_>>;

    /// Names of every object below a collection, or `None` when no
    /// collection has that name.
    fn collection_members(&self, _name: &str) -> Option<Vec<String>> {
        None
    }
}

impl HostScene for std::collections::BTreeMap<String, HostObject<'_>> {
    fn object(&self, name: &str) -> Option<HostObject<'_>> {
        self.get(name).cloned()
    }
}
