//! span_cluster - Offline instance clustering for shared template meshes
//!
//! This crate batches many placements of one template mesh into a few
//! renderer-friendly clusters. Each cluster stores, per instance, the
//! placement transform plus per-vertex position deltas and colors quantized
//! to the cheapest fixed-width layout that holds the cluster's observed
//! range.
//!
//! # Features
//!
//! - **Template extraction**: de-duplicated vertices, proximity-sorted
//!   triangles and local bounds from any `MeshSource`
//! - **Spatial splitting**: recursive median (or largest-gap) cuts along the
//!   longest axis, bounded by triangle budgets and a minimum extent
//! - **Pluggable deformation and lighting**: `VertexDeformer` /
//!   `VertexShader` strategies with zero-cost no-op defaults
//! - **Adaptive encoding**: 008 / 888 / 101010 / 161616 position layouts and
//!   I8 / A8 / AI88 color layouts picked per cluster
//!
//! # Example
//!
//! ```ignore
//! use span_cluster::{template, ClusterConfig, ClusterGroup, NoDeform, NoShade};
//!
//! let templ = template::build(&mesh_data)?;
//! let mut group = ClusterGroup::new("grass", templ, ClusterConfig::default());
//! let stats = group.add_instances(&transforms, &mut NoDeform, &mut NoShade)?;
//!
//! println!("{} instances in {} clusters",
//!     stats.instances_added, stats.clusters_created);
//! ```

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{ClusterError, Result};
pub use types::{color_conversion, Aabb3, LocalToWorld, Rgba8, OPAQUE_WHITE};

// Template extraction
pub mod template;
pub use template::{MeshData, MeshSource, TemplateMesh, TemplateVertex};

// Deformation / shading strategies and delta extraction
pub mod deltas;
pub use deltas::{EvalContext, InstanceDeltas, NoDeform, NoShade, VertexDeformer, VertexShader};

// Encoding descriptors and instance records
pub mod encoding;
pub use encoding::{ColorEncoding, InstanceRecord, PositionEncoding, SpanEncoding};

// Spatial split and cluster aggregates
pub mod cluster;
pub use cluster::{
  Cluster, ClusterConfig, ClusterGroup, ClusterStats, DecodedInstance, GroupBuilder,
  InstanceLimits, SplitMode,
};

#[cfg(test)]
pub(crate) mod test_utils;
