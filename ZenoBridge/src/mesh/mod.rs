//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Canonical mesh/armature data model
//!
//! These are the Blender-side shapes every conversion reads or produces:
//! - [`PolyMesh`]: vertices, edges, polygons as ranges into a shared loop array
//! - [`Axis`]: a row-major 4x4 affine placement
//! - [`Mesh`]: an axis carrying polygon geometry
//! - [`Bone`]: an axis with parent index, pose delta and display shape
//! - [`SceneObject`]: the tagged union of the three, as passed through graph endpoints

mod axis;
mod bone;
mod object;
mod types;

pub use axis::{Axis, Matrix4};
pub use bone::{Bone, NO_DISPLAY_SHAPE};
pub use object::SceneObject;
pub use types::{Edge, Mesh, PolyMesh, Polygon};
