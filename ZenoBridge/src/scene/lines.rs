//! Line-viewer draw buffers.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::primitive::PrimitiveObject;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Line geometry accumulated across every line viewer in one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineBuffers {
    pub vertices: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    /// Index pairs into `vertices`.
    pub indices: Vec<[u32; 2]>,
}

impl LineBuffers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive's vertices and lines.
    ///
    /// Indices are offset by the vertex count already buffered. Colours come
    /// from `color_channel`, white when the primitive has none. A primitive
    /// with dangling indices, or one that would overflow 32-bit indices, is
    /// rejected and nothing is appended.
    pub fn add_primitive(&mut self, prim: &PrimitiveObject, color_channel: &str) -> Result<()> {
        prim.validate()?;
        let count = self.vertices.len() + prim.verts.len();
        let (Ok(base), Ok(_)) = (u32::try_from(self.vertices.len()), u32::try_from(count)) else {
            return Err(Error::IndexOverflow {
                context: "line viewer",
                count,
            });
        };
        let colors = prim.verts.channel(color_channel).ok();

        self.vertices.extend_from_slice(&prim.verts.values);
        self.colors.extend(
            (0..prim.verts.len()).map(|i| colors.map_or(WHITE, |channel| channel.rgb(i))),
        );
        self.indices
            .extend(prim.lines.iter().map(|&[a, b]| [a + base, b + base]));
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.colors.clear();
        self.indices.clear();
    }
}
