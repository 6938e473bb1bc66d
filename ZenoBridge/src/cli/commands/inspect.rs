//! Inspect bridge JSON files

use std::path::Path;

use crate::attributes::AttrVector;
use crate::mesh::{Bone, Mesh};
use crate::primitive::PrimitiveObject;

pub fn execute(path: &Path) -> anyhow::Result<()> {
    println!("Inspecting: {}", path.display());
    println!();

    let json = std::fs::read_to_string(path)?;
    if let Ok(mesh) = serde_json::from_str::<Mesh>(&json) {
        print_mesh(&mesh);
    } else if let Ok(prim) = serde_json::from_str::<PrimitiveObject>(&json) {
        print_primitive(&prim);
    } else if let Ok(bones) = serde_json::from_str::<Vec<Bone>>(&json) {
        print_bones(&bones);
    } else {
        anyhow::bail!("{} is not a mesh, primitive or bone list", path.display());
    }
    Ok(())
}

fn print_mesh(mesh: &Mesh) {
    let geo = &mesh.geometry;
    let degenerate = geo.poly.iter().filter(|p| p.is_degenerate()).count();
    println!("Mesh");
    println!("====");
    println!("Origin:      {:?}", mesh.axis.origin());
    println!("Vertices:    {}", geo.vert.len());
    println!("Edges:       {}", geo.edge.len());
    println!("Polygons:    {} ({} degenerate)", geo.poly.len(), degenerate);
    println!("Loops:       {}", geo.loops.len());
    println!("Smooth:      {}", mesh.is_smooth);
    println!("Loop colors: {}", !mesh.loop_colors.is_empty());
    print_channels("vertex", &geo.vert);
    if let Err(e) = geo.validate() {
        println!();
        println!("(Invalid topology: {e})");
    }
}

fn print_primitive(prim: &PrimitiveObject) {
    println!("Primitive");
    println!("=========");
    println!("Vertices:    {}", prim.verts.len());
    println!("Lines:       {}", prim.lines.len());
    println!("Triangles:   {}", prim.tris.len());
    println!("Quads:       {}", prim.quads.len());
    print_channels("vertex", &prim.verts);
    print_channels("triangle", &prim.tris);
    print_channels("quad", &prim.quads);
}

fn print_bones(bones: &[Bone]) {
    println!("Bones ({}):", bones.len());
    for (i, bone) in bones.iter().enumerate() {
        println!(
            "  [{:3}] {} (parent {}, shape {})",
            i,
            bone.bone_id,
            bone.parent_index,
            bone.display_shape_id.as_deref().unwrap_or("-")
        );
    }
}

fn print_channels<T>(element: &str, values: &AttrVector<T>) {
    values.foreach_attr(|name, channel| {
        println!("  {element} channel '{name}': {} x {}", channel.len(), channel.channel_type());
    });
}
