//! Mesh → Primitive conversion.

use rayon::prelude::*;

use super::MeshToPrimitiveOptions;
use crate::error::Result;
use crate::mesh::Mesh;
use crate::primitive::PrimitiveObject;

/// Flatten a polygon mesh into a primitive.
///
/// Polygons with fewer than three corners are skipped. Four-corner polygons
/// become quads when `allow_quads` is set; every other polygon is split into
/// a fan `(v0, v[i-1], v[i])` around its first corner. A mesh with a zero
/// placement keeps its positions as they are, even with `do_transform`.
pub fn mesh_to_primitive(mesh: &Mesh, options: &MeshToPrimitiveOptions) -> Result<PrimitiveObject> {
    let geo = &mesh.geometry;
    geo.validate()?;

    let mut prim = PrimitiveObject::new();
    prim.resize(geo.vert.len());

    if options.do_transform && !mesh.axis.is_zero() {
        let axis = mesh.axis;
        prim.verts
            .values
            .par_iter_mut()
            .zip(geo.vert.values.par_iter())
            .for_each(|(out, &p)| *out = axis.transform_point(p));
    } else {
        prim.verts.values.copy_from_slice(&geo.vert.values);
    }

    if options.has_edges {
        prim.lines.extend(geo.edge.iter().map(|e| [e.src, e.dst]));
    }

    if options.has_faces {
        let mut skipped = 0usize;
        for (i, p) in geo.poly.iter().enumerate() {
            if p.is_degenerate() {
                skipped += 1;
                continue;
            }
            let v = geo.polygon_vertices(i);
            if v.len() == 4 && options.allow_quads {
                prim.quads.push([v[0], v[1], v[2], v[3]]);
                continue;
            }
            for j in 2..v.len() {
                prim.tris.push([v[0], v[j - 1], v[j]]);
            }
        }
        if skipped > 0 {
            tracing::debug!("Skipped {} degenerate polygons", skipped);
        }
    }

    if options.has_vert_attr {
        for (name, channel) in geo.vert.attrs() {
            prim.verts.set_channel(name, channel.clone())?;
        }
    }

    tracing::debug!(
        "Mesh -> primitive: {} verts, {} lines, {} tris, {} quads",
        prim.verts.len(),
        prim.lines.len(),
        prim.tris.len(),
        prim.quads.len()
    );

    Ok(prim)
}
