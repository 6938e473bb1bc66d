//! Vertex colour to loop colour promotion
//!
//! Blender stores colour per face corner (loop), Zeno per vertex. Promotion
//! gamma-encodes each vertex colour to RGBA8 and looks it up through every
//! loop's vertex index.

use rayon::prelude::*;

use crate::attributes::AttrChannel;
use crate::error::{Error, Result};

/// Display gamma applied when encoding linear colour to 8 bits.
pub const GAMMA: f32 = 2.2;

/// Encode one linear component: `v^(1/2.2)` scaled to `[0, 255]`.
#[must_use]
pub fn encode_component(value: f32) -> u8 {
    let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    (v.powf(1.0 / GAMMA) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Encode a linear RGB triple to opaque RGBA8.
#[must_use]
pub fn rgb_to_rgba8(rgb: [f32; 3]) -> [u8; 4] {
    [
        encode_component(rgb[0]),
        encode_component(rgb[1]),
        encode_component(rgb[2]),
        255,
    ]
}

/// Build one RGBA8 colour per loop from a per-vertex colour channel.
///
/// Scalar channels are read as grayscale. Fails when a loop names a vertex
/// the channel has no entry for.
pub(crate) fn promote_vertex_colors(colors: &AttrChannel, loops: &[u32]) -> Result<Vec<[u8; 4]>> {
    let vertex_count = colors.len();
    if let Some(&index) = loops.iter().find(|&&v| v as usize >= vertex_count) {
        return Err(Error::VertexIndexOutOfRange {
            context: "loop colour",
            index,
            vertex_count,
        });
    }

    let per_vertex: Vec<[u8; 4]> = (0..colors.len())
        .into_par_iter()
        .map(|i| rgb_to_rgba8(colors.rgb(i)))
        .collect();

    let mut per_loop = vec![[0u8; 4]; loops.len()];
    per_loop
        .par_iter_mut()
        .zip(loops.par_iter())
        .for_each(|(out, &v)| *out = per_vertex[v as usize]);
    Ok(per_loop)
}
