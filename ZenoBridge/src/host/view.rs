//! Borrowed views over host mesh arrays.

use bytemuck::{Pod, Zeroable};

use super::layers::CustomLayer;
use crate::attributes::AttrVector;
use crate::error::{Error, Result};
use crate::mesh::{Axis, Edge, Mesh, PolyMesh, Polygon};

/// Host edge record.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct HostEdge {
    pub v1: u32,
    pub v2: u32,
}

/// Host loop record: vertex index plus an edge index the bridge ignores.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct HostLoop {
    pub v: u32,
    pub e: u32,
}

/// Host polygon record.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct HostPolygon {
    pub loop_start: u32,
    pub loop_total: u32,
}

/// Reinterpret a raw host buffer of `count` elements.
///
/// Fails when the byte length does not match `count`, when `count` elements
/// could not fit in memory at all, or when the buffer is not aligned for `T`.
pub fn cast_buffer<'a, T: Pod>(buffer: &str, bytes: &'a [u8], count: usize) -> Result<&'a [T]> {
    let size = std::mem::size_of::<T>();
    let Some(expected) = count.checked_mul(size) else {
        return Err(Error::BufferLengthMismatch {
            buffer: buffer.to_string(),
            expected: count,
            found: bytes.len() / size,
        });
    };
    if bytes.len() != expected {
        return Err(Error::BufferSizeMismatch {
            buffer: buffer.to_string(),
            expected,
            found: bytes.len(),
        });
    }
    bytemuck::try_cast_slice(bytes).map_err(|_| Error::BufferMisaligned {
        buffer: buffer.to_string(),
    })
}

/// A host mesh, borrowed.
#[derive(Debug, Clone, Default)]
pub struct MeshView<'a> {
    pub verts: &'a [[f32; 3]],
    pub edges: &'a [HostEdge],
    pub loops: &'a [HostLoop],
    pub polys: &'a [HostPolygon],
    /// Custom per-vertex data layers.
    pub vert_layers: Vec<CustomLayer<'a>>,
}

impl<'a> MeshView<'a> {
    /// Build a view from raw byte buffers and element counts.
    pub fn from_raw(
        verts: (&'a [u8], usize),
        edges: (&'a [u8], usize),
        loops: (&'a [u8], usize),
        polys: (&'a [u8], usize),
    ) -> Result<Self> {
        Ok(Self {
            verts: cast_buffer("vertices", verts.0, verts.1)?,
            edges: cast_buffer("edges", edges.0, edges.1)?,
            loops: cast_buffer("loops", loops.0, loops.1)?,
            polys: cast_buffer("polygons", polys.0, polys.1)?,
            vert_layers: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_vert_layers(mut self, layers: Vec<CustomLayer<'a>>) -> Self {
        self.vert_layers = layers;
        self
    }

    /// Check the cross-buffer invariants: polygon loop ranges inside the loop
    /// array, loop/edge vertex references inside the vertex array, and layer
    /// sizes matching the vertex count.
    pub fn validate(&self) -> Result<()> {
        let loop_count = self.loops.len();
        for (i, p) in self.polys.iter().enumerate() {
            if p.loop_start as usize + p.loop_total as usize > loop_count {
                return Err(Error::PolygonOutOfRange {
                    polygon: i,
                    start: p.loop_start,
                    len: p.loop_total,
                    loop_count,
                });
            }
        }

        let vertex_count = self.verts.len();
        let bad_vertex = |context: &'static str, index: u32| Error::VertexIndexOutOfRange {
            context,
            index,
            vertex_count,
        };
        if let Some(l) = self.loops.iter().find(|l| l.v as usize >= vertex_count) {
            return Err(bad_vertex("loop", l.v));
        }
        for e in self.edges {
            if let Some(&v) = [e.v1, e.v2].iter().find(|&&v| v as usize >= vertex_count) {
                return Err(bad_vertex("edge", v));
            }
        }

        for layer in &self.vert_layers {
            layer.check_len(vertex_count)?;
        }
        Ok(())
    }

    /// Validate, then copy everything into a canonical mesh placed at `axis`.
    pub fn to_mesh(&self, axis: Axis) -> Result<Mesh> {
        self.validate()?;

        let mut vert = AttrVector::from_values(self.verts.to_vec());
        for layer in &self.vert_layers {
            if let Some(channel) = layer.to_channel()? {
                vert.set_channel(layer.name, channel)?;
            }
        }

        let geometry = PolyMesh {
            vert,
            edge: AttrVector::from_values(self.edges.iter().map(|e| Edge::new(e.v1, e.v2)).collect()),
            poly: AttrVector::from_values(
                self.polys
                    .iter()
                    .map(|p| Polygon::new(p.loop_start, p.loop_total))
                    .collect(),
            ),
            loops: AttrVector::from_values(self.loops.iter().map(|l| l.v).collect()),
        };

        tracing::debug!(
            "Read host mesh: {} verts, {} edges, {} polys, {} loops",
            geometry.vert.len(),
            geometry.edge.len(),
            geometry.poly.len(),
            geometry.loops.len()
        );

        Ok(Mesh {
            axis,
            geometry,
            ..Default::default()
        })
    }
}
