//! Error type shared by every clustering stage.

/// Errors reported while building templates or encoding clusters.
///
/// The clustering algorithm itself is total over well-formed input, so
/// every variant describes either a degenerate template or a caller
/// contract violation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
  #[error("template `{source_name}` has no vertices")]
  EmptyVertices { source_name: String },

  #[error("template `{source_name}` has no triangles")]
  EmptyTriangles { source_name: String },

  #[error("index count {count} is not a multiple of 3")]
  PartialTriangle { count: usize },

  #[error("index {index} out of range for {vertex_count} vertices")]
  IndexOutOfRange { index: u32, vertex_count: usize },

  #[error("attribute `{attribute}` has {actual} entries, expected {expected}")]
  AttributeLength {
    attribute: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("{what} has {actual} entries for {expected} instances")]
  InstanceCountMismatch {
    what: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("{what} has {actual} samples for {expected} template vertices")]
  VertexCountMismatch {
    what: &'static str,
    expected: usize,
    actual: usize,
  },

  #[error("record encoded as {record:?} cannot join a cluster encoded as {cluster:?}")]
  EncodingMismatch {
    cluster: crate::encoding::SpanEncoding,
    record: crate::encoding::SpanEncoding,
  },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;
