//! Template mesh: the single shared geometry every instance in a cluster
//! group draws.
//!
//! # Module Structure
//!
//! - [`source`]: `MeshSource` - interface to already-extracted mesh data,
//!   plus the owned `MeshData` implementation
//! - [`builder`]: `build` - validate, de-duplicate, bound and sort a source
//!   into a `TemplateMesh`
//! - [`sort`]: triangle proximity ordering and render-level assignment

pub mod builder;
pub mod sort;
pub mod source;

use glam::{Vec3, Vec4};
use smallvec::SmallVec;

use crate::types::{Aabb3, Rgba8};

// Re-exports
pub use builder::build;
pub use sort::{order_templates, sort_triangles};
pub use source::{MeshData, MeshSource};

/// Maximum number of skin weights a template vertex may carry.
pub const MAX_WEIGHTS: usize = 3;

/// One de-duplicated template vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateVertex {
  /// Rest position in template-local space.
  pub position: Vec3,

  /// Rest normal in template-local space.
  pub normal: Vec3,

  /// Rest color.
  pub color: Rgba8,

  /// Per-vertex multiply color applied to shaded output (alpha is the
  /// output alpha).
  pub mult_color: Vec4,

  /// Per-vertex add color applied after the multiply.
  pub add_color: Vec4,

  /// UVW coordinates, one entry per channel.
  pub uvws: SmallVec<[Vec3; 4]>,

  /// Skin weights (0..=MAX_WEIGHTS entries).
  pub weights: SmallVec<[f32; MAX_WEIGHTS]>,

  /// Packed skin bone index, when the source carries one.
  pub skin_index: Option<u32>,
}

impl TemplateVertex {
  /// Bit-exact identity of every attribute, used to merge duplicates.
  ///
  /// Signed zeros are folded so `-0.0` and `0.0` merge.
  pub(crate) fn key(&self) -> SmallVec<[u32; 32]> {
    #[inline]
    fn bits(v: f32) -> u32 {
      (v + 0.0).to_bits()
    }

    let mut key = SmallVec::new();
    key.extend(self.position.to_array().map(bits));
    key.extend(self.normal.to_array().map(bits));
    key.push(u32::from_le_bytes(self.color));
    key.extend(self.mult_color.to_array().map(bits));
    key.extend(self.add_color.to_array().map(bits));
    key.push(self.uvws.len() as u32);
    for uvw in &self.uvws {
      key.extend(uvw.to_array().map(bits));
    }
    key.push(self.weights.len() as u32);
    key.extend(self.weights.iter().copied().map(bits));
    match self.skin_index {
      Some(idx) => key.extend([1, idx]),
      None => key.push(0),
    }
    key
  }
}

/// Shared, immutable template geometry.
///
/// Invariant: `indices.len()` is a non-zero multiple of 3 and every index is
/// below `vertices.len()`. Only [`build`] constructs it.
#[derive(Clone, Debug)]
pub struct TemplateMesh {
  source_name: String,
  vertices: Vec<TemplateVertex>,
  indices: Vec<u32>,
  uvw_count: usize,
  weight_count: usize,
  has_skin_index: bool,
  local_bounds: Aabb3,
  render_level: u32,
}

impl TemplateMesh {
  /// Name of the source the template was extracted from.
  pub fn source_name(&self) -> &str {
    &self.source_name
  }

  pub fn vertices(&self) -> &[TemplateVertex] {
    &self.vertices
  }

  pub fn vertex(&self, index: usize) -> &TemplateVertex {
    &self.vertices[index]
  }

  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  /// Number of triangles (always >= 1).
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// UVW channels per vertex.
  pub fn uvw_count(&self) -> usize {
    self.uvw_count
  }

  /// Skin weights per vertex.
  pub fn weight_count(&self) -> usize {
    self.weight_count
  }

  pub fn has_skin_index(&self) -> bool {
    self.has_skin_index
  }

  /// Bounds of the rest positions in template-local space.
  pub fn local_bounds(&self) -> Aabb3 {
    self.local_bounds
  }

  /// Draw ordering among templates split from the same source.
  pub fn render_level(&self) -> u32 {
    self.render_level
  }

  pub fn with_render_level(mut self, level: u32) -> Self {
    self.render_level = level;
    self
  }

  /// Rest positions in vertex order.
  pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
    self.vertices.iter().map(|v| v.position)
  }

  /// Rest colors in vertex order.
  pub fn colors(&self) -> impl Iterator<Item = Rgba8> + '_ {
    self.vertices.iter().map(|v| v.color)
  }
}
