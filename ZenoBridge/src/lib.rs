#![allow(non_snake_case)]
//! # ZenoBridge
//!
//! A pure-Rust bridge between Blender's in-memory mesh/armature data and the
//! Zeno node-graph engine.
//!
//! ## What it does
//!
//! - **Meshes** - Blender polygon meshes (vertices, edges, polygons, loops)
//!   converted to and from Zeno's flattened triangle/quad primitives
//! - **Attributes** - named float and float3 channels carried across both directions
//! - **Armatures** - forward kinematics turning local bone deltas into global poses
//! - **Endpoints** - named graph inputs/outputs, collections and bone groupings
//!
//! ## Quick Start
//!
//! ### Converting a Mesh
//!
//! ```
//! use zenobridge::prelude::*;
//!
//! let mut mesh = Mesh::default();
//! mesh.geometry.vert.extend([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
//! mesh.geometry.push_polygon(&[0, 1, 2, 3]);
//!
//! let options = MeshToPrimitiveOptions { allow_quads: true, ..Default::default() };
//! let prim = mesh_to_primitive(&mesh, &options)?;
//! assert_eq!(prim.quads.len(), 1);
//!
//! let back = primitive_to_mesh(&prim, &PrimitiveToMeshOptions::default())?;
//! assert_eq!(back.geometry.poly.len(), 1);
//! # Ok::<(), zenobridge::Error>(())
//! ```
//!
//! ### Resolving an Armature
//!
//! ```
//! use zenobridge::prelude::*;
//!
//! let mut root = Bone::new("root", -1);
//! root.axis.set_translation([5.0, 0.0, 0.0]);
//!
//! let posed = resolve_bone_tree(&[root])?;
//! assert_eq!(posed[0].translation, [5.0, 0.0, 0.0]);
//! # Ok::<(), zenobridge::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `zenobridge` command-line binary

pub mod attributes;
pub mod config;
pub mod converter;
pub mod error;
pub mod host;
pub mod mesh;
pub mod primitive;
pub mod scene;
pub mod skeleton;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::attributes::{AttrChannel, AttrElement, AttrVector, ChannelType};
    pub use crate::config::{BridgeConfig, ColorConfig};
    pub use crate::error::{Error, Result};
    pub use crate::mesh::{Axis, Bone, Edge, Mesh, PolyMesh, Polygon, SceneObject};
    pub use crate::primitive::PrimitiveObject;

    // Conversion entry points
    pub use crate::converter::{
        MeshToPrimitiveOptions, PrimitiveToMeshOptions, mesh_to_primitive, primitive_to_mesh,
    };

    // Armature
    pub use crate::skeleton::{BonePose, resolve_bone_tree, resolve_poses};

    // Host boundary
    pub use crate::host::{
        CustomLayer, HostEdge, HostLoop, HostMeshBuffers, HostObject, HostPolygon, HostScene,
        LayerType, MeshView,
    };

    // Scene/graph bridge
    pub use crate::scene::{
        EvaluationContext, GraphEndpoints, GraphEngine, LineBuffers, PendingSource, SceneHandle,
        SceneOutput, Session,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
