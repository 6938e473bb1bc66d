//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Per-element attribute storage
//!
//! An [`AttrVector`] is a positional/topological array (vertex positions,
//! polygons, loops, triangles...) plus any number of named channels that stay
//! parallel to it. Channels hold one of a closed set of element types, see
//! [`AttrChannel`].

mod channel;

pub use channel::{AttrChannel, AttrElement, ChannelType};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An element array with named per-element attribute channels.
///
/// Every channel always has exactly `len()` entries. Cloning deep-copies all
/// channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "AttrVectorRepr<T>",
    bound(
        serialize = "T: Serialize",
        deserialize = "T: Deserialize<'de> + Clone + Default"
    )
)]
pub struct AttrVector<T> {
    /// The positional values (positions, index tuples...).
    pub(crate) values: Vec<T>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    attrs: IndexMap<String, AttrChannel>,
}

/// Unchecked wire form, validated into an [`AttrVector`].
#[derive(Deserialize)]
struct AttrVectorRepr<T> {
    values: Vec<T>,
    #[serde(default)]
    attrs: IndexMap<String, AttrChannel>,
}

impl<T> TryFrom<AttrVectorRepr<T>> for AttrVector<T> {
    type Error = Error;

    fn try_from(repr: AttrVectorRepr<T>) -> Result<Self> {
        for (name, channel) in &repr.attrs {
            if channel.len() != repr.values.len() {
                return Err(Error::BufferLengthMismatch {
                    buffer: name.clone(),
                    expected: repr.values.len(),
                    found: channel.len(),
                });
            }
        }
        Ok(Self {
            values: repr.values,
            attrs: repr.attrs,
        })
    }
}

impl<T> Default for AttrVector<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            attrs: IndexMap::new(),
        }
    }
}

impl<T> AttrVector<T> {
    /// Create an empty vector with no channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing values; no channels are declared.
    #[must_use]
    pub fn from_values(values: Vec<T>) -> Self {
        Self {
            values,
            attrs: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The positional values.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// The positional values, mutable in place. Length is fixed, so channels
    /// stay parallel.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Append one element; every channel grows by a default value.
    pub fn push(&mut self, value: T) {
        self.values.push(value);
        let len = self.values.len();
        for channel in self.attrs.values_mut() {
            channel.resize(len);
        }
    }

    /// Append many elements; every channel is default-filled to match.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.values.extend(iter);
        let len = self.values.len();
        for channel in self.attrs.values_mut() {
            channel.resize(len);
        }
    }

    /// Create a channel, or return the existing one when it has the same type.
    ///
    /// A new channel is sized to the current element count and default-filled.
    /// Asking for an existing name with another element type fails with
    /// [`Error::AttributeTypeMismatch`].
    pub fn add_attr<A: AttrElement>(&mut self, name: &str) -> Result<&mut Vec<A>> {
        let len = self.values.len();
        let channel = self
            .attrs
            .entry(name.to_string())
            .or_insert_with(|| AttrChannel::with_len(A::CHANNEL_TYPE, len));
        let found = channel.channel_type();
        A::values_mut(channel).ok_or_else(|| Error::AttributeTypeMismatch {
            name: name.to_string(),
            expected: A::CHANNEL_TYPE,
            found,
        })
    }

    /// Borrow a channel's values with a typed view.
    pub fn attr<A: AttrElement>(&self, name: &str) -> Result<&[A]> {
        let channel = self.channel(name)?;
        A::values(channel)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::AttributeTypeMismatch {
                name: name.to_string(),
                expected: A::CHANNEL_TYPE,
                found: channel.channel_type(),
            })
    }

    /// Mutably borrow a channel's values with a typed view.
    ///
    /// The returned slice cannot change length, so the channel stays parallel.
    pub fn attr_mut<A: AttrElement>(&mut self, name: &str) -> Result<&mut [A]> {
        let channel = self
            .attrs
            .get_mut(name)
            .ok_or_else(|| Error::AttributeNotFound {
                name: name.to_string(),
            })?;
        let found = channel.channel_type();
        A::values_mut(channel)
            .map(Vec::as_mut_slice)
            .ok_or_else(|| Error::AttributeTypeMismatch {
                name: name.to_string(),
                expected: A::CHANNEL_TYPE,
                found,
            })
    }

    /// Borrow a channel without committing to an element type.
    pub fn channel(&self, name: &str) -> Result<&AttrChannel> {
        self.attrs.get(name).ok_or_else(|| Error::AttributeNotFound {
            name: name.to_string(),
        })
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }

    /// Install a whole channel under `name`, replacing any previous one.
    ///
    /// The channel must already have one entry per element.
    pub fn set_channel(&mut self, name: &str, channel: AttrChannel) -> Result<()> {
        if channel.len() != self.values.len() {
            return Err(Error::BufferLengthMismatch {
                buffer: name.to_string(),
                expected: self.values.len(),
                found: channel.len(),
            });
        }
        self.attrs.insert(name.to_string(), channel);
        Ok(())
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<AttrChannel> {
        self.attrs.shift_remove(name)
    }

    /// Visit every declared channel in declaration order.
    pub fn foreach_attr<F>(&self, mut visitor: F)
    where
        F: FnMut(&str, &AttrChannel),
    {
        for (name, channel) in &self.attrs {
            visitor(name, channel);
        }
    }

    /// Iterate `(name, channel)` pairs in declaration order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &AttrChannel)> {
        self.attrs.iter().map(|(name, channel)| (name.as_str(), channel))
    }

    /// Drop all elements and channel contents, keeping the channel declarations.
    pub fn clear(&mut self) {
        self.values.clear();
        for channel in self.attrs.values_mut() {
            channel.resize(0);
        }
    }
}

impl<T: Clone + Default> AttrVector<T> {
    /// Resize the element array and every channel to `n`.
    ///
    /// Existing entries are kept by index, new slots are default-filled.
    pub fn resize(&mut self, n: usize) {
        self.values.resize(n, T::default());
        for channel in self.attrs.values_mut() {
            channel.resize(n);
        }
    }
}

impl<T> std::ops::Index<usize> for AttrVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> std::ops::IndexMut<usize> for AttrVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

impl<'a, T> IntoIterator for &'a AttrVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_attr_sizes_to_element_count() {
        let mut verts: AttrVector<[f32; 3]> = AttrVector::from_values(vec![[0.0; 3]; 4]);
        let weights = verts.add_attr::<f32>("weight").unwrap();
        assert_eq!(weights.len(), 4);
        assert!(weights.iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_add_attr_returns_existing_channel() {
        let mut verts: AttrVector<[f32; 3]> = AttrVector::from_values(vec![[0.0; 3]; 2]);
        verts.add_attr::<f32>("weight").unwrap()[1] = 0.5;
        let again = verts.add_attr::<f32>("weight").unwrap();
        assert_eq!(*again, vec![0.0, 0.5]);
        assert_eq!(verts.num_attrs(), 1);
    }

    #[test]
    fn test_add_attr_type_mismatch() {
        let mut verts: AttrVector<[f32; 3]> = AttrVector::from_values(vec![[0.0; 3]; 2]);
        verts.add_attr::<f32>("clr").unwrap();
        let err = verts.add_attr::<[f32; 3]>("clr").unwrap_err();
        assert!(matches!(
            err,
            Error::AttributeTypeMismatch {
                expected: ChannelType::Float3,
                found: ChannelType::Float,
                ..
            }
        ));
        assert!(verts.attr::<[f32; 3]>("clr").is_err());
    }

    #[test]
    fn test_slice_views_keep_channels_parallel() {
        let mut verts: AttrVector<[f32; 3]> = AttrVector::from_values(vec![[0.0; 3]; 2]);
        verts.add_attr::<f32>("w").unwrap();
        verts.as_mut_slice()[1] = [1.0, 2.0, 3.0];
        verts.push([4.0, 5.0, 6.0]);
        assert_eq!(verts.as_slice(), &[[0.0; 3], [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(verts.attr::<f32>("w").unwrap().len(), verts.len());
    }

    #[test]
    fn test_resize_keeps_channels_parallel() {
        let mut verts: AttrVector<[f32; 3]> = AttrVector::from_values(vec![[1.0, 2.0, 3.0]]);
        verts.add_attr::<f32>("w").unwrap()[0] = 7.0;
        verts.add_attr::<[f32; 3]>("clr").unwrap()[0] = [0.1, 0.2, 0.3];

        verts.resize(3);
        assert_eq!(verts.len(), 3);
        assert_eq!(verts.attr::<f32>("w").unwrap(), &[7.0, 0.0, 0.0]);
        assert_eq!(verts.attr::<[f32; 3]>("clr").unwrap()[0], [0.1, 0.2, 0.3]);
        assert_eq!(verts.attr::<[f32; 3]>("clr").unwrap()[2], [0.0; 3]);

        verts.push([4.0, 5.0, 6.0]);
        verts.foreach_attr(|_, channel| assert_eq!(channel.len(), 4));

        verts.resize(1);
        assert_eq!(verts.attr::<f32>("w").unwrap(), &[7.0]);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut verts: AttrVector<[f32; 3]> = AttrVector::from_values(vec![[0.0; 3]; 2]);
        verts.add_attr::<f32>("w").unwrap()[0] = 1.0;
        let copy = verts.clone();
        verts.attr_mut::<f32>("w").unwrap()[0] = 9.0;
        assert_eq!(copy.attr::<f32>("w").unwrap()[0], 1.0);
    }

    #[test]
    fn test_foreach_attr_declaration_order() {
        let mut verts: AttrVector<[f32; 3]> = AttrVector::from_values(vec![[0.0; 3]]);
        verts.add_attr::<f32>("b").unwrap();
        verts.add_attr::<[f32; 3]>("a").unwrap();
        verts.add_attr::<f32>("c").unwrap();
        let mut names = Vec::new();
        verts.foreach_attr(|name, _| names.push(name.to_string()));
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_missing_attr_is_lookup_failure() {
        let verts: AttrVector<[f32; 3]> = AttrVector::new();
        let err = verts.attr::<f32>("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_deserialize_rejects_ragged_channel() {
        let json = r#"{"values": [[0,0,0],[1,1,1]], "attrs": {"w": {"type": "float", "values": [1.0]}}}"#;
        let parsed: std::result::Result<AttrVector<[f32; 3]>, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
