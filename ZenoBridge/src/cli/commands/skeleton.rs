//! Armature commands

use std::path::Path;

use anyhow::Context;

use super::write_json;
use crate::mesh::Bone;
use crate::skeleton::resolve_bone_tree;

/// Resolve a depth-first bone list and write the posed bones.
pub fn resolve(source: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;
    let bones: Vec<Bone> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a bone list", source.display()))?;

    let posed = resolve_bone_tree(&bones)?;
    write_json(&posed, output)
}
