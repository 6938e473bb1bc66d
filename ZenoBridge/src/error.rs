//! Error types for `ZenoBridge`

use thiserror::Error;

use crate::attributes::ChannelType;

/// The error type for `ZenoBridge` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ==================== Lookup Failures ====================
    /// A graph input was declared but no source was ever registered for it.
    #[error("blender input not found: {name}")]
    InputNotFound {
        /// The endpoint name.
        name: String,
    },

    /// A declared input names an object the host scene does not have.
    #[error("no object named `{name}` in scene")]
    HostObjectNotFound {
        /// The host object name.
        name: String,
    },

    /// An attribute channel was requested by name but does not exist.
    #[error("attribute not found: {name}")]
    AttributeNotFound {
        /// The channel name.
        name: String,
    },

    /// A session operation needs a loaded scene.
    #[error("no scene loaded")]
    NoActiveScene,

    // ==================== Type Mismatches ====================
    /// An attribute channel was accessed as the wrong element type.
    #[error("attribute '{name}' is {found}, requested as {expected}")]
    AttributeTypeMismatch {
        /// The channel name.
        name: String,
        /// The type requested by the caller.
        expected: ChannelType,
        /// The type actually stored.
        found: ChannelType,
    },

    // ==================== Topology Violations ====================
    /// A bone list is not in parent-before-child order.
    #[error("bone {index} has parent {parent}; parents must precede their children")]
    BoneOrderViolation {
        /// Index of the offending bone.
        index: usize,
        /// The parent index it references.
        parent: i32,
    },

    /// A polygon's loop range runs past the end of the loop array.
    #[error("polygon {polygon} spans loops {start}..{start}+{len} but only {loop_count} loops exist")]
    PolygonOutOfRange {
        /// Polygon index.
        polygon: usize,
        /// First loop of the polygon.
        start: u32,
        /// Number of loops in the polygon.
        len: u32,
        /// Length of the loop array.
        loop_count: usize,
    },

    /// A loop, edge or primitive references a vertex that does not exist.
    #[error("{context} references vertex {index} but only {vertex_count} vertices exist")]
    VertexIndexOutOfRange {
        /// Which element kind held the bad reference.
        context: &'static str,
        /// The referenced vertex index.
        index: u32,
        /// Number of vertices available.
        vertex_count: usize,
    },

    /// Two host buffers that must agree in length do not.
    #[error("host buffer '{buffer}' has {found} elements, expected {expected}")]
    BufferLengthMismatch {
        /// Name of the buffer.
        buffer: String,
        /// Expected element count.
        expected: usize,
        /// Actual element count.
        found: usize,
    },

    /// A raw host buffer's byte length disagrees with its element count.
    #[error("host buffer '{buffer}' is {found} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// Name of the buffer.
        buffer: String,
        /// Expected size in bytes.
        expected: usize,
        /// Actual size in bytes.
        found: usize,
    },

    /// A raw host buffer does not hold a whole number of elements or is not
    /// aligned for its element type.
    #[error("host buffer '{buffer}' is misaligned or truncated")]
    BufferMisaligned {
        /// Name of the buffer.
        buffer: String,
    },

    /// Appending would push vertex indices past `u32::MAX`.
    #[error("{context} would hold {count} vertices, more than 32-bit indices can address")]
    IndexOverflow {
        /// Which buffer was being filled.
        context: &'static str,
        /// Vertex count after the append.
        count: usize,
    },

    // ==================== Unsupported Data ====================
    /// The host object kind cannot cross the bridge.
    #[error("object '{name}' of kind {kind} is not supported")]
    UnsupportedObject {
        /// Host object name.
        name: String,
        /// Host object kind.
        kind: String,
    },

    // ==================== Configuration / Engine ====================
    /// The bridge configuration failed validation.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// The validation error message.
        message: String,
    },

    /// The node-graph engine reported a failure.
    #[error("engine error: {message}")]
    Engine {
        /// The engine's message, preserved verbatim.
        message: String,
    },
}

impl Error {
    /// Shorthand for wrapping an engine-side message.
    pub fn engine(message: impl Into<String>) -> Self {
        Error::Engine {
            message: message.into(),
        }
    }
}

/// A specialized Result type for `ZenoBridge` operations.
pub type Result<T> = std::result::Result<T, Error>;
