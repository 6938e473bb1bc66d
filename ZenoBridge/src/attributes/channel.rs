//! Attribute channel storage

use std::fmt;

use serde::{Deserialize, Serialize};

/// Element type of an attribute channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    /// One `f32` per element.
    Float,
    /// Three `f32` per element.
    Float3,
}

impl ChannelType {
    /// Get the type name used in messages and the CLI
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Float3 => "float3",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named channel's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum AttrChannel {
    Float(Vec<f32>),
    Float3(Vec<[f32; 3]>),
}

impl AttrChannel {
    /// A default-filled channel of `len` elements.
    #[must_use]
    pub fn with_len(channel_type: ChannelType, len: usize) -> Self {
        match channel_type {
            ChannelType::Float => Self::Float(vec![0.0; len]),
            ChannelType::Float3 => Self::Float3(vec![[0.0; 3]; len]),
        }
    }

    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        match self {
            Self::Float(_) => ChannelType::Float,
            Self::Float3(_) => ChannelType::Float3,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Float3(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resize, keeping values by index and default-filling new slots.
    pub fn resize(&mut self, len: usize) {
        match self {
            Self::Float(v) => v.resize(len, 0.0),
            Self::Float3(v) => v.resize(len, [0.0; 3]),
        }
    }

    /// Read element `index` as an RGB triple.
    ///
    /// Scalar channels are treated as grayscale and broadcast to all three
    /// components.
    #[must_use]
    pub fn rgb(&self, index: usize) -> [f32; 3] {
        match self {
            Self::Float(v) => [v[index]; 3],
            Self::Float3(v) => v[index],
        }
    }
}

/// Element types that can live in an [`AttrChannel`].
pub trait AttrElement: Copy + Default + Send + Sync + 'static {
    const CHANNEL_TYPE: ChannelType;

    fn values(channel: &AttrChannel) -> Option<&Vec<Self>>;

    fn values_mut(channel: &mut AttrChannel) -> Option<&mut Vec<Self>>;
}

impl AttrElement for f32 {
    const CHANNEL_TYPE: ChannelType = ChannelType::Float;

    fn values(channel: &AttrChannel) -> Option<&Vec<Self>> {
        match channel {
            AttrChannel::Float(v) => Some(v),
            AttrChannel::Float3(_) => None,
        }
    }

    fn values_mut(channel: &mut AttrChannel) -> Option<&mut Vec<Self>> {
        match channel {
            AttrChannel::Float(v) => Some(v),
            AttrChannel::Float3(_) => None,
        }
    }
}

impl AttrElement for [f32; 3] {
    const CHANNEL_TYPE: ChannelType = ChannelType::Float3;

    fn values(channel: &AttrChannel) -> Option<&Vec<Self>> {
        match channel {
            AttrChannel::Float3(v) => Some(v),
            AttrChannel::Float(_) => None,
        }
    }

    fn values_mut(channel: &mut AttrChannel) -> Option<&mut Vec<Self>> {
        match channel {
            AttrChannel::Float3(v) => Some(v),
            AttrChannel::Float(_) => None,
        }
    }
}
