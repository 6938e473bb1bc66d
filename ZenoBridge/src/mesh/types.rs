//! Polygon mesh types.

use serde::{Deserialize, Serialize};

use super::Axis;
use crate::attributes::AttrVector;
use crate::error::{Error, Result};

/// A polygon as a range into the shared loop array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    /// First loop of the polygon.
    pub start: u32,
    /// Number of loops (corners).
    pub len: u32,
}

impl Polygon {
    #[must_use]
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Fewer than three corners: skipped by face conversion.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.len < 3
    }

    #[must_use]
    pub fn loop_range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.start as usize + self.len as usize
    }
}

/// An edge between two vertices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub src: u32,
    pub dst: u32,
}

impl Edge {
    #[must_use]
    pub const fn new(src: u32, dst: u32) -> Self {
        Self { src, dst }
    }
}

/// Indexed face-vertex mesh with a flattened loop array.
///
/// The structure also serves as an armature's bone-shape container, so it
/// carries no placement of its own; see [`Mesh`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolyMesh {
    pub vert: AttrVector<[f32; 3]>,
    #[serde(default)]
    pub edge: AttrVector<Edge>,
    #[serde(default)]
    pub poly: AttrVector<Polygon>,
    /// Vertex index of every polygon corner.
    #[serde(default)]
    pub loops: AttrVector<u32>,
}

impl PolyMesh {
    /// Append a polygon whose corners are `vertices`, returning its index.
    pub fn push_polygon(&mut self, vertices: &[u32]) -> usize {
        let start = self.loops.len() as u32;
        self.loops.extend(vertices.iter().copied());
        self.poly.push(Polygon::new(start, vertices.len() as u32));
        self.poly.len() - 1
    }

    /// Vertex indices of polygon `index`'s corners.
    ///
    /// # Panics
    /// Panics if the polygon's loop range is out of bounds; call
    /// [`PolyMesh::validate`] on untrusted meshes first.
    #[must_use]
    pub fn polygon_vertices(&self, index: usize) -> &[u32] {
        &self.loops.values[self.poly[index].loop_range()]
    }

    /// Check that every polygon's loop range fits the loop array and every
    /// loop and edge references an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let loop_count = self.loops.len();
        for (i, p) in self.poly.iter().enumerate() {
            if p.start as usize + p.len as usize > loop_count {
                return Err(Error::PolygonOutOfRange {
                    polygon: i,
                    start: p.start,
                    len: p.len,
                    loop_count,
                });
            }
        }
        let vertex_count = self.vert.len();
        if let Some(&index) = self.loops.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(Error::VertexIndexOutOfRange {
                context: "loop",
                index,
                vertex_count,
            });
        }
        for e in &self.edge {
            for index in [e.src, e.dst] {
                if index as usize >= vertex_count {
                    return Err(Error::VertexIndexOutOfRange {
                        context: "edge",
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A host mesh object: placement, geometry, shading flags and per-loop colours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub axis: Axis,
    pub geometry: PolyMesh,
    /// RGBA8 colour of every loop; empty when the mesh has no colour layer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loop_colors: Vec<[u8; 4]>,
    #[serde(default)]
    pub is_smooth: bool,
    #[serde(default)]
    pub use_auto_smooth: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_and_tri() -> PolyMesh {
        let mut mesh = PolyMesh::default();
        mesh.vert.extend([[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        mesh.push_polygon(&[0, 1, 2, 3]);
        mesh.push_polygon(&[0, 2, 3]);
        mesh
    }

    #[test]
    fn test_push_polygon_shares_loop_array() {
        let mesh = quad_and_tri();
        assert_eq!(mesh.poly.values, vec![Polygon::new(0, 4), Polygon::new(4, 3)]);
        assert_eq!(mesh.polygon_vertices(1), &[0, 2, 3]);
        mesh.validate().unwrap();
    }

    #[test]
    fn test_validate_polygon_range() {
        let mut mesh = quad_and_tri();
        mesh.poly[1].len = 5;
        assert!(matches!(
            mesh.validate(),
            Err(Error::PolygonOutOfRange { polygon: 1, loop_count: 7, .. })
        ));
    }

    #[test]
    fn test_validate_vertex_reference() {
        let mut mesh = quad_and_tri();
        mesh.edge.push(Edge::new(0, 9));
        assert!(matches!(
            mesh.validate(),
            Err(Error::VertexIndexOutOfRange { context: "edge", index: 9, .. })
        ));
    }

    #[test]
    fn test_degenerate() {
        assert!(Polygon::new(0, 2).is_degenerate());
        assert!(!Polygon::new(0, 3).is_degenerate());
    }
}
