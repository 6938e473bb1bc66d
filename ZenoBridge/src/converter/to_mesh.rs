//! Primitive → Mesh conversion.

use rayon::prelude::*;

use super::PrimitiveToMeshOptions;
use super::color::promote_vertex_colors;
use crate::attributes::{AttrChannel, AttrElement, AttrVector};
use crate::error::Result;
use crate::mesh::{Axis, Edge, Mesh, Polygon};
use crate::primitive::PrimitiveObject;

/// Rebuild a polygon mesh from a primitive.
///
/// Loops are laid out as the triangle block, then the quad block, then (with
/// `has_edges`) one two-corner polygon per line. Polygons follow the same
/// order. The result has a zero placement, so writing it back leaves the host
/// object's own transform in place.
pub fn primitive_to_mesh(prim: &PrimitiveObject, options: &PrimitiveToMeshOptions) -> Result<Mesh> {
    prim.validate()?;

    let mut mesh = Mesh {
        axis: Axis::zero(),
        is_smooth: options.is_smooth,
        ..Default::default()
    };
    let geo = &mut mesh.geometry;

    geo.vert.values.clone_from(&prim.verts.values);
    if options.has_vert_attr {
        for (name, channel) in prim.verts.attrs() {
            geo.vert.set_channel(name, channel.clone())?;
        }
    }

    let (tri_count, quad_count) = if options.has_faces {
        (prim.tris.len(), prim.quads.len())
    } else {
        (0, 0)
    };
    let line_count = if options.has_edges { prim.lines.len() } else { 0 };

    let quad_loop_base = 3 * tri_count;
    let line_loop_base = quad_loop_base + 4 * quad_count;
    let quad_poly_base = tri_count;
    let line_poly_base = tri_count + quad_count;

    geo.loops.resize(line_loop_base + 2 * line_count);
    geo.poly.resize(line_poly_base + line_count);

    {
        let (tri_loops, rest) = geo.loops.values.split_at_mut(quad_loop_base);
        let (quad_loops, line_loops) = rest.split_at_mut(4 * quad_count);
        fill_block(tri_loops, &prim.tris.values[..tri_count]);
        fill_block(quad_loops, &prim.quads.values[..quad_count]);
        fill_block(line_loops, &prim.lines.values[..line_count]);
    }
    {
        let (tri_polys, rest) = geo.poly.values.split_at_mut(quad_poly_base);
        let (quad_polys, line_polys) = rest.split_at_mut(quad_count);
        fill_ranges(tri_polys, 0, 3);
        fill_ranges(quad_polys, quad_loop_base, 4);
        fill_ranges(line_polys, line_loop_base, 2);
    }

    if options.has_edges {
        geo.edge.extend(prim.lines.values.iter().map(|&[src, dst]| Edge::new(src, dst)));
    }

    if options.has_face_attr && options.has_faces {
        for (name, channel) in prim.tris.attrs() {
            copy_face_channel(&mut geo.poly, name, channel, 0)?;
        }
        for (name, channel) in prim.quads.attrs() {
            copy_face_channel(&mut geo.poly, name, channel, quad_poly_base)?;
        }
    }

    if options.has_vert_color {
        match prim.verts.channel(&options.color_attr) {
            Ok(colors) => mesh.loop_colors = promote_vertex_colors(colors, &geo.loops.values)?,
            Err(_) => tracing::debug!(
                "No '{}' vertex channel, leaving loop colours empty",
                options.color_attr
            ),
        }
    }

    tracing::debug!(
        "Primitive -> mesh: {} verts, {} polys, {} loops, {} edges",
        mesh.geometry.vert.len(),
        mesh.geometry.poly.len(),
        mesh.geometry.loops.len(),
        mesh.geometry.edge.len()
    );

    Ok(mesh)
}

/// Write `N`-index elements into consecutive chunks of `loops`.
fn fill_block<const N: usize>(loops: &mut [u32], elements: &[[u32; N]]) {
    loops
        .par_chunks_mut(N)
        .zip(elements.par_iter())
        .for_each(|(out, e)| out.copy_from_slice(e));
}

/// Write `(base + i*len, len)` ranges into `polys`.
fn fill_ranges(polys: &mut [Polygon], base: usize, len: u32) {
    polys.par_iter_mut().enumerate().for_each(|(i, p)| {
        *p = Polygon::new((base + i * len as usize) as u32, len);
    });
}

/// Copy a triangle or quad channel into the polygon channel of the same
/// name, starting at polygon `offset`.
fn copy_face_channel(
    polys: &mut AttrVector<Polygon>,
    name: &str,
    channel: &AttrChannel,
    offset: usize,
) -> Result<()> {
    match channel {
        AttrChannel::Float(values) => copy_into(polys, name, values, offset),
        AttrChannel::Float3(values) => copy_into(polys, name, values, offset),
    }
}

fn copy_into<A: AttrElement>(
    polys: &mut AttrVector<Polygon>,
    name: &str,
    values: &[A],
    offset: usize,
) -> Result<()> {
    let out = polys.add_attr::<A>(name)?;
    out[offset..offset + values.len()].copy_from_slice(values);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::HostMeshBuffers;

    fn square_prim() -> PrimitiveObject {
        let mut prim = PrimitiveObject::new();
        prim.verts.extend([[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [2.0, 0.0, 0.0]]);
        prim.tris.push([0, 1, 2]);
        prim.tris.push([0, 2, 3]);
        prim.quads.push([1, 4, 2, 3]);
        prim
    }

    #[test]
    fn test_triangles_then_quads() {
        let mesh = primitive_to_mesh(&square_prim(), &PrimitiveToMeshOptions::default()).unwrap();
        let geo = &mesh.geometry;
        assert_eq!(geo.loops.values, vec![0, 1, 2, 0, 2, 3, 1, 4, 2, 3]);
        assert_eq!(
            geo.poly.values,
            vec![Polygon::new(0, 3), Polygon::new(3, 3), Polygon::new(6, 4)]
        );
        assert_eq!(geo.vert.len(), 5);
        geo.validate().unwrap();
    }

    #[test]
    fn test_lines_only_gives_empty_faces() {
        let mut prim = PrimitiveObject::new();
        prim.verts.extend([[0.0; 3], [1.0, 0.0, 0.0]]);
        prim.lines.push([0, 1]);
        let mesh = primitive_to_mesh(&prim, &PrimitiveToMeshOptions::default()).unwrap();
        assert!(mesh.geometry.poly.is_empty());
        assert!(mesh.geometry.loops.is_empty());
        assert_eq!(mesh.geometry.vert.len(), 2);
    }

    #[test]
    fn test_edge_block_after_faces() {
        let mut prim = square_prim();
        prim.lines.push([3, 4]);
        let options = PrimitiveToMeshOptions {
            has_edges: true,
            ..Default::default()
        };
        let mesh = primitive_to_mesh(&prim, &options).unwrap();
        let geo = &mesh.geometry;
        assert_eq!(geo.loops.len(), 3 * 2 + 4 + 2);
        assert_eq!(&geo.loops.values[10..], &[3, 4]);
        assert_eq!(geo.poly[3], Polygon::new(10, 2));
        assert_eq!(geo.edge.values, vec![Edge::new(3, 4)]);
    }

    #[test]
    fn test_face_attributes_offset_for_quads() {
        let mut prim = square_prim();
        prim.tris.add_attr::<f32>("mat").unwrap().copy_from_slice(&[1.0, 2.0]);
        prim.quads.add_attr::<f32>("mat").unwrap()[0] = 3.0;
        prim.quads.add_attr::<[f32; 3]>("nrm").unwrap()[0] = [0.0, 0.0, 1.0];
        let options = PrimitiveToMeshOptions {
            has_face_attr: true,
            ..Default::default()
        };
        let mesh = primitive_to_mesh(&prim, &options).unwrap();
        assert_eq!(mesh.geometry.poly.attr::<f32>("mat").unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(
            mesh.geometry.poly.attr::<[f32; 3]>("nrm").unwrap(),
            &[[0.0; 3], [0.0; 3], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn test_face_attribute_type_clash() {
        let mut prim = square_prim();
        prim.tris.add_attr::<f32>("mat").unwrap();
        prim.quads.add_attr::<[f32; 3]>("mat").unwrap();
        let options = PrimitiveToMeshOptions {
            has_face_attr: true,
            ..Default::default()
        };
        let err = primitive_to_mesh(&prim, &options).unwrap_err();
        assert!(matches!(err, Error::AttributeTypeMismatch { .. }));
    }

    #[test]
    fn test_vertex_color_promoted_per_loop() {
        let mut prim = square_prim();
        let clr = prim.verts.add_attr::<[f32; 3]>("clr").unwrap();
        clr.fill([1.0, 1.0, 1.0]);
        clr[0] = [0.0, 0.0, 0.0];
        let options = PrimitiveToMeshOptions {
            has_vert_color: true,
            ..Default::default()
        };
        let mesh = primitive_to_mesh(&prim, &options).unwrap();
        assert_eq!(mesh.loop_colors.len(), mesh.geometry.loops.len());
        assert_eq!(mesh.loop_colors[0], [0, 0, 0, 255]);
        assert_eq!(mesh.loop_colors[1], [255, 255, 255, 255]);
        assert!(!mesh.geometry.vert.has_attr("clr"));
    }

    #[test]
    fn test_converted_mesh_keeps_host_transform() {
        let mut prim = PrimitiveObject::new();
        prim.verts.extend([[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        prim.tris.push([0, 1, 2]);
        let mesh = primitive_to_mesh(&prim, &PrimitiveToMeshOptions::default()).unwrap();
        assert!(mesh.axis.is_zero());
        assert_eq!(HostMeshBuffers::from_mesh(&mesh).matrix, None);
    }

    #[test]
    fn test_bad_primitive_index_rejected() {
        let mut prim = square_prim();
        prim.tris.push([0, 1, 99]);
        assert!(primitive_to_mesh(&prim, &PrimitiveToMeshOptions::default()).is_err());
    }
}
