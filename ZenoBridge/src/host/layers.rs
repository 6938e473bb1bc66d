//! Host custom-data layers.

use crate::attributes::AttrChannel;
use crate::error::{Error, Result};

/// Host custom-data type tag for a float layer.
const CD_PROP_FLOAT: i32 = 10;
/// Host custom-data type tag for a float3 layer.
const CD_PROP_FLOAT3: i32 = 48;

/// Element type of a host custom-data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerType {
    Float,
    Float3,
    /// Any tag the bridge does not carry.
    Other(i32),
}

impl LayerType {
    #[must_use]
    pub fn from_tag(tag: i32) -> Self {
        match tag {
            CD_PROP_FLOAT => Self::Float,
            CD_PROP_FLOAT3 => Self::Float3,
            other => Self::Other(other),
        }
    }

    /// Bytes per element, for recognised types.
    #[must_use]
    pub fn element_size(self) -> Option<usize> {
        match self {
            Self::Float => Some(4),
            Self::Float3 => Some(12),
            Self::Other(_) => None,
        }
    }
}

/// One named per-vertex layer, borrowed as raw bytes.
#[derive(Debug, Clone)]
pub struct CustomLayer<'a> {
    pub layer_type: LayerType,
    pub name: &'a str,
    pub data: &'a [u8],
}

impl<'a> CustomLayer<'a> {
    pub fn new(layer_type: LayerType, name: &'a str, data: &'a [u8]) -> Self {
        Self {
            layer_type,
            name,
            data,
        }
    }

    /// Layer with a raw host type tag.
    pub fn from_tag(tag: i32, name: &'a str, data: &'a [u8]) -> Self {
        Self::new(LayerType::from_tag(tag), name, data)
    }

    pub(crate) fn check_len(&self, element_count: usize) -> Result<()> {
        let Some(size) = self.layer_type.element_size() else {
            return Ok(());
        };
        let Some(expected) = element_count.checked_mul(size) else {
            return Err(Error::BufferLengthMismatch {
                buffer: self.name.to_string(),
                expected: element_count,
                found: self.data.len() / size,
            });
        };
        if self.data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                buffer: self.name.to_string(),
                expected,
                found: self.data.len(),
            });
        }
        Ok(())
    }

    /// Copy the layer into a channel; `None` for unrecognised types.
    ///
    /// The copy tolerates unaligned host memory.
    pub fn to_channel(&self) -> Result<Option<AttrChannel>> {
        match self.layer_type {
            LayerType::Float => Ok(Some(AttrChannel::Float(bytemuck::pod_collect_to_vec(self.data)))),
            LayerType::Float3 => Ok(Some(AttrChannel::Float3(bytemuck::pod_collect_to_vec(self.data)))),
            LayerType::Other(tag) => {
                tracing::warn!("Ignoring layer '{}' with unsupported type tag {}", self.name, tag);
                Ok(None)
            }
        }
    }
}
