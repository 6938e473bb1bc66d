//! Owned buffers written back to the host.

use serde::Serialize;

use super::view::{HostEdge, HostLoop, HostPolygon};
use crate::mesh::{Matrix4, Mesh};

/// A mesh in the host's array layout, ready to copy into host memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HostMeshBuffers {
    /// World matrix to apply, `None` to keep the host object's own.
    pub matrix: Option<Matrix4>,
    pub verts: Vec<[f32; 3]>,
    pub edges: Vec<[u32; 2]>,
    pub loops: Vec<[u32; 2]>,
    pub polys: Vec<[u32; 2]>,
    /// RGBA8 per loop, empty when the mesh carries no colour.
    pub loop_colors: Vec<[u8; 4]>,
    pub is_smooth: bool,
    pub use_auto_smooth: bool,
}

impl HostMeshBuffers {
    #[must_use]
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let geo = &mesh.geometry;
        Self {
            matrix: (!mesh.axis.is_zero()).then_some(mesh.axis.matrix),
            verts: geo.vert.values.clone(),
            edges: geo.edge.iter().map(|e| [e.src, e.dst]).collect(),
            loops: geo.loops.iter().map(|&v| [v, 0]).collect(),
            polys: geo.poly.iter().map(|p| [p.start, p.len]).collect(),
            loop_colors: mesh.loop_colors.clone(),
            is_smooth: mesh.is_smooth,
            use_auto_smooth: mesh.use_auto_smooth,
        }
    }

    pub fn host_edges(&self) -> &[HostEdge] {
        bytemuck::cast_slice(&self.edges)
    }

    pub fn host_loops(&self) -> &[HostLoop] {
        bytemuck::cast_slice(&self.loops)
    }

    pub fn host_polys(&self) -> &[HostPolygon] {
        bytemuck::cast_slice(&self.polys)
    }

    /// Raw vertex bytes for a host-side `memcpy`.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.verts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Axis;

    #[test]
    fn test_from_mesh_layout() {
        let mut mesh = Mesh::default();
        mesh.geometry.vert.extend([[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        mesh.geometry.push_polygon(&[0, 1, 2]);
        let buffers = HostMeshBuffers::from_mesh(&mesh);
        assert_eq!(buffers.matrix, Some(Axis::identity().matrix));
        assert_eq!(buffers.host_polys(), &[HostPolygon { loop_start: 0, loop_total: 3 }]);
        assert_eq!(buffers.host_loops()[2], HostLoop { v: 2, e: 0 });
        assert_eq!(buffers.vertex_bytes().len(), 36);
    }

    #[test]
    fn test_zero_matrix_keeps_host_transform() {
        let mesh = Mesh {
            axis: Axis::zero(),
            ..Default::default()
        };
        assert_eq!(HostMeshBuffers::from_mesh(&mesh).matrix, None);
    }
}
