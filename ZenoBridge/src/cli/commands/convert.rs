//! Mesh/primitive conversion commands

use std::path::Path;

use anyhow::Context;

use super::write_json;
use crate::converter::{
    MeshToPrimitiveOptions, PrimitiveToMeshOptions, mesh_to_primitive, primitive_to_mesh,
};
use crate::mesh::Mesh;
use crate::primitive::PrimitiveObject;

pub fn to_primitive(
    source: &Path,
    output: Option<&Path>,
    options: &MeshToPrimitiveOptions,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;
    let mesh: Mesh = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a mesh", source.display()))?;

    let prim = mesh_to_primitive(&mesh, options)?;
    tracing::info!(
        "{}: {} verts -> {} lines, {} tris, {} quads",
        source.display(),
        prim.verts.len(),
        prim.lines.len(),
        prim.tris.len(),
        prim.quads.len()
    );
    write_json(&prim, output)
}

pub fn to_mesh(
    source: &Path,
    output: Option<&Path>,
    options: &PrimitiveToMeshOptions,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(source)
        .with_context(|| format!("reading {}", source.display()))?;
    let prim: PrimitiveObject = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a primitive", source.display()))?;

    let mesh = primitive_to_mesh(&prim, options)?;
    tracing::info!(
        "{}: {} polygons, {} loops",
        source.display(),
        mesh.geometry.poly.len(),
        mesh.geometry.loops.len()
    );
    write_json(&mesh, output)
}
