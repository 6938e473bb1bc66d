//! Named graph endpoints and grouping indices.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::{IndexMap, IndexSet};

use super::lines::LineBuffers;
use crate::error::{Error, Result};
use crate::host::{HostObject, HostScene};
use crate::mesh::{Axis, Bone, SceneObject};
use crate::skeleton::resolve_bone_tree;

static NO_MEMBERS: BTreeSet<String> = BTreeSet::new();

/// Where a graph input's value comes from.
///
/// Placements and bones are copied at registration. Meshes stay in host
/// memory until the graph reads them, and are then copied out of the host
/// scene passed to [`GraphEndpoints::resolve_input`].
#[derive(Debug, Clone, PartialEq)]
pub enum PendingSource {
    Axis(Axis),
    Mesh { object: String },
    Bone(Bone),
}

impl PendingSource {
    /// Produce the value, reading host buffers where needed.
    pub fn resolve(&self, host: &dyn HostScene) -> Result<SceneObject> {
        match self {
            Self::Axis(axis) => Ok(SceneObject::Axis(*axis)),
            Self::Bone(bone) => Ok(SceneObject::Bone(bone.clone())),
            Self::Mesh { object } => host
                .object(object)
                .ok_or_else(|| Error::HostObjectNotFound {
                    name: object.clone(),
                })?
                .materialize(object),
        }
    }
}

/// Endpoint and grouping registries for one scene.
///
/// Grouping indices are multimaps with set semantics: registering the same
/// pair twice is a no-op, and lookups of unknown groups yield an empty set.
#[derive(Debug, Clone, Default)]
pub struct GraphEndpoints {
    input_names: IndexSet<String>,
    inputs: IndexMap<String, PendingSource>,
    outputs: IndexMap<String, SceneObject>,
    collections: BTreeMap<String, BTreeSet<String>>,
    armature_bones: BTreeMap<String, BTreeSet<String>>,
    bone_geometries: BTreeMap<String, BTreeSet<String>>,
    bone_trees: BTreeMap<String, Vec<Bone>>,
    lines: LineBuffers,
}

fn insert_member(index: &mut BTreeMap<String, BTreeSet<String>>, group: &str, member: &str) {
    let members = index.entry(group.to_string()).or_default();
    if !members.contains(member) {
        members.insert(member.to_string());
    }
}

fn members_of<'a>(index: &'a BTreeMap<String, BTreeSet<String>>, group: &str) -> &'a BTreeSet<String> {
    index.get(group).unwrap_or(&NO_MEMBERS)
}

impl GraphEndpoints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything ahead of a new declaration pass.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ==================== Inputs ====================

    /// Mark `name` as required by the graph. Repeats are ignored.
    pub fn declare_input(&mut self, name: &str) {
        if !self.input_names.contains(name) {
            self.input_names.insert(name.to_string());
        }
    }

    /// Declared input names, in declaration order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.input_names.iter().map(String::as_str)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.input_names.contains(name)
    }

    /// Install the source for an input, replacing any previous one.
    pub fn register_input(&mut self, name: &str, source: PendingSource) {
        self.inputs.insert(name.to_string(), source);
    }

    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Produce an input's value from its registered source.
    pub fn resolve_input(&self, name: &str, host: &dyn HostScene) -> Result<SceneObject> {
        let source = self.inputs.get(name).ok_or_else(|| Error::InputNotFound {
            name: name.to_string(),
        })?;
        source.resolve(host)
    }

    /// Register the source for a host object by kind.
    ///
    /// Armatures also have their bone tree resolved and their bones and
    /// display shapes indexed. Volumes are rejected.
    pub fn register_host_object(&mut self, name: &str, object: &HostObject<'_>) -> Result<()> {
        let source = match object {
            HostObject::Empty(axis) => PendingSource::Axis(*axis),
            HostObject::Mesh { .. } => PendingSource::Mesh {
                object: name.to_string(),
            },
            HostObject::Armature { axis, bones } => {
                self.register_armature(name, bones)?;
                PendingSource::Axis(*axis)
            }
            HostObject::Bone(bone) => PendingSource::Bone(bone.clone()),
            HostObject::Volume => {
                return Err(Error::UnsupportedObject {
                    name: name.to_string(),
                    kind: object.kind_name().to_string(),
                });
            }
        };
        self.register_input(name, source);
        Ok(())
    }

    // ==================== Outputs ====================

    /// Store a result, replacing any previous value under `name`.
    pub fn register_output(&mut self, name: &str, object: SceneObject) {
        self.outputs.insert(name.to_string(), object);
    }

    pub fn output(&self, name: &str) -> Option<&SceneObject> {
        self.outputs.get(name)
    }

    /// Outputs in the order they were first set.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &SceneObject)> {
        self.outputs.iter().map(|(name, object)| (name.as_str(), object))
    }

    // ==================== Groupings ====================

    pub fn add_collection_member(&mut self, collection: &str, object: &str) {
        insert_member(&mut self.collections, collection, object);
    }

    /// Members of a collection; empty for unknown names.
    pub fn group_members(&self, collection: &str) -> &BTreeSet<String> {
        members_of(&self.collections, collection)
    }

    pub fn add_armature_bone(&mut self, armature: &str, bone: &str) {
        insert_member(&mut self.armature_bones, armature, bone);
    }

    pub fn armature_bones(&self, armature: &str) -> &BTreeSet<String> {
        members_of(&self.armature_bones, armature)
    }

    pub fn add_bone_geometry(&mut self, bone: &str, geometry: &str) {
        insert_member(&mut self.bone_geometries, bone, geometry);
    }

    pub fn bone_geometries(&self, bone: &str) -> &BTreeSet<String> {
        members_of(&self.bone_geometries, bone)
    }

    /// Resolve an armature's bones and index them.
    ///
    /// `bones` must be in depth-first order with local pose deltas. The
    /// resolved tree replaces any earlier one for `armature`; bones without
    /// a display shape get no geometry entry.
    pub fn register_armature(&mut self, armature: &str, bones: &[Bone]) -> Result<&[Bone]> {
        let tree = resolve_bone_tree(bones)?;
        for bone in &tree {
            self.add_armature_bone(armature, &bone.bone_id);
            if let Some(shape) = &bone.display_shape_id {
                self.add_bone_geometry(&bone.bone_id, shape);
            }
        }
        tracing::debug!("Registered armature '{}' with {} bones", armature, tree.len());

        let slot = self.bone_trees.entry(armature.to_string()).or_default();
        *slot = tree;
        Ok(slot.as_slice())
    }

    /// Posed bones of a registered armature.
    pub fn armature_bone_tree(&self, armature: &str) -> Option<&[Bone]> {
        self.bone_trees.get(armature).map(Vec::as_slice)
    }

    // ==================== Line Viewer ====================

    pub fn lines(&self) -> &LineBuffers {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut LineBuffers {
        &mut self.lines
    }
}
