//! Skeletal bone record.

use serde::{Deserialize, Serialize};

use super::Axis;

/// Host display-shape id meaning "this bone has no custom shape".
pub const NO_DISPLAY_SHAPE: &str = "None";

/// One bone of an armature.
///
/// Before forward kinematics `quaternion`/`translation` hold the bone's local
/// pose delta and `axis` its rest-pose local-to-global basis. After
/// [`crate::skeleton::resolve_bone_tree`] they hold the global rotation and
/// the posed head position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    /// Index of the parent bone, `-1` for roots.
    pub parent_index: i32,
    pub bone_id: String,
    /// Object displayed in place of the bone, if any.
    #[serde(default)]
    pub display_shape_id: Option<String>,
    /// `(w, x, y, z)`
    pub quaternion: [f32; 4],
    pub translation: [f32; 3],
    #[serde(default)]
    pub axis: Axis,
}

impl Bone {
    /// A bone at rest: identity delta, identity basis.
    pub fn new(bone_id: impl Into<String>, parent_index: i32) -> Self {
        Self {
            parent_index,
            bone_id: bone_id.into(),
            display_shape_id: None,
            quaternion: [1.0, 0.0, 0.0, 0.0],
            translation: [0.0; 3],
            axis: Axis::identity(),
        }
    }

    /// Set the display shape from the host's id, mapping the `"None"` sentinel
    /// (and the empty string) to no shape.
    #[must_use]
    pub fn with_host_display_shape(mut self, shape_id: &str) -> Self {
        self.display_shape_id = display_shape_from_host(shape_id);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_index < 0
    }
}

fn display_shape_from_host(shape_id: &str) -> Option<String> {
    if shape_id.is_empty() || shape_id == NO_DISPLAY_SHAPE {
        None
    } else {
        Some(shape_id.to_string())
    }
}
