//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Mesh and primitive conversions
//!
//! Handles conversions between Blender polygon meshes and Zeno primitives:
//! - Mesh → Primitive: optional world transform, quads or triangle fans,
//!   edges as lines, vertex attribute channels
//! - Primitive → Mesh: triangles/quads/lines to polygons over a shared loop
//!   array, vertex and face attributes, vertex colour promoted to loop colour

pub mod color;
mod options;
mod to_mesh;
mod to_primitive;

pub use color::{GAMMA, rgb_to_rgba8};
pub use options::{MeshToPrimitiveOptions, PrimitiveToMeshOptions};
pub use to_mesh::primitive_to_mesh;
pub use to_primitive::mesh_to_primitive;
