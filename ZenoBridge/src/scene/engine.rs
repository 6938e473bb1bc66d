//! The node-graph engine seam.

use std::collections::BTreeSet;

use super::endpoints::GraphEndpoints;
use super::lines::LineBuffers;
use crate::error::Result;
use crate::host::HostScene;
use crate::mesh::{Bone, SceneObject};
use crate::primitive::PrimitiveObject;

/// Opaque scene token issued by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// Operations the bridge needs from a node-graph engine.
///
/// Handles carry no validity tracking; a handle used after
/// [`GraphEngine::destroy_scene`] is the engine's to reject.
pub trait GraphEngine {
    fn create_scene(&mut self) -> Result<SceneHandle>;

    fn destroy_scene(&mut self, scene: SceneHandle) -> Result<()>;

    /// Replace the scene's graphs with a serialized description.
    fn load_graph_json(&mut self, scene: SceneHandle, json: &str) -> Result<()>;

    /// Make `graph` the graph that [`GraphEngine::apply`] evaluates.
    fn switch_graph(&mut self, scene: SceneHandle, graph: &str) -> Result<()>;

    /// Declaration pass: announce every input the active graph will read.
    fn declare(&mut self, scene: SceneHandle, endpoints: &mut GraphEndpoints) -> Result<()>;

    /// Evaluate the active graph.
    fn apply(&mut self, scene: SceneHandle, ctx: &mut EvaluationContext<'_>) -> Result<()>;
}

/// What a graph sees of the bridge while it evaluates.
pub struct EvaluationContext<'a> {
    endpoints: &'a mut GraphEndpoints,
    host: &'a dyn HostScene,
    color_channel: &'a str,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(endpoints: &'a mut GraphEndpoints, host: &'a dyn HostScene, color_channel: &'a str) -> Self {
        Self {
            endpoints,
            host,
            color_channel,
        }
    }

    /// Read a graph input, copying host data as needed.
    pub fn input(&self, name: &str) -> Result<SceneObject> {
        self.endpoints.resolve_input(name, self.host)
    }

    pub fn set_output(&mut self, name: &str, object: SceneObject) {
        self.endpoints.register_output(name, object);
    }

    pub fn group_members(&self, collection: &str) -> &BTreeSet<String> {
        self.endpoints.group_members(collection)
    }

    pub fn armature_bones(&self, armature: &str) -> &BTreeSet<String> {
        self.endpoints.armature_bones(armature)
    }

    pub fn bone_geometries(&self, bone: &str) -> &BTreeSet<String> {
        self.endpoints.bone_geometries(bone)
    }

    pub fn armature_bone_tree(&self, armature: &str) -> Option<&[Bone]> {
        self.endpoints.armature_bone_tree(armature)
    }

    /// Hand a primitive's lines to the line viewer.
    pub fn view_lines(&mut self, prim: &PrimitiveObject) -> Result<()> {
        let channel = self.color_channel;
        self.endpoints.lines_mut().add_primitive(prim, channel)
    }

    pub fn lines(&self) -> &LineBuffers {
        self.endpoints.lines()
    }

    pub fn endpoints(&self) -> &GraphEndpoints {
        self.endpoints
    }
}
