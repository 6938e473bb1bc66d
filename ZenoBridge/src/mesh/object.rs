//! Objects passed through graph endpoints.

use serde::{Deserialize, Serialize};

use super::{Axis, Bone, Mesh};

/// Anything a graph input can produce or an output can receive.
///
/// All variants carry a placement; a mesh is an axis with geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneObject {
    Axis(Axis),
    Mesh(Mesh),
    Bone(Bone),
}

impl SceneObject {
    #[must_use]
    pub fn axis(&self) -> &Axis {
        match self {
            Self::Axis(axis) => axis,
            Self::Mesh(mesh) => &mesh.axis,
            Self::Bone(bone) => &bone.axis,
        }
    }

    pub fn axis_mut(&mut self) -> &mut Axis {
        match self {
            Self::Axis(axis) => axis,
            Self::Mesh(mesh) => &mut mesh.axis,
            Self::Bone(bone) => &mut bone.axis,
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Axis(_) => "axis",
            Self::Mesh(_) => "mesh",
            Self::Bone(_) => "bone",
        }
    }

    #[must_use]
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            Self::Axis(_) | Self::Bone(_) => None,
        }
    }

    #[must_use]
    pub fn into_mesh(self) -> Option<Mesh> {
        match self {
            Self::Mesh(mesh) => Some(mesh),
            Self::Axis(_) | Self::Bone(_) => None,
        }
    }
}

impl From<Axis> for SceneObject {
    fn from(axis: Axis) -> Self {
        Self::Axis(axis)
    }
}

impl From<Mesh> for SceneObject {
    fn from(mesh: Mesh) -> Self {
        Self::Mesh(mesh)
    }
}

impl From<Bone> for SceneObject {
    fn from(bone: Bone) -> Self {
        Self::Bone(bone)
    }
}
