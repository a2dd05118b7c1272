//! Interface to already-extracted mesh data.
//!
//! Mesh conversion from an authoring tool happens upstream; the builder only
//! needs per-vertex attribute queries and an index list.

use glam::{Vec3, Vec4};
use smallvec::SmallVec;

use super::MAX_WEIGHTS;
use crate::error::{ClusterError, Result};
use crate::types::{Rgba8, OPAQUE_WHITE};

/// Source mesh extraction interface.
///
/// All per-vertex queries take `vertex < vertex_count()`.
pub trait MeshSource {
  /// Name handed to deformation/shading strategies.
  fn name(&self) -> &str;

  fn vertex_count(&self) -> usize;

  /// Triangle list (3 indices per triangle).
  fn indices(&self) -> &[u32];

  /// UVW channels per vertex.
  fn uvw_count(&self) -> usize {
    0
  }

  /// Skin weights per vertex (0..=MAX_WEIGHTS).
  fn weight_count(&self) -> usize {
    0
  }

  fn has_skin_index(&self) -> bool {
    false
  }

  fn position(&self, vertex: usize) -> Vec3;

  fn normal(&self, vertex: usize) -> Vec3;

  fn color(&self, vertex: usize) -> Rgba8 {
    let _ = vertex;
    OPAQUE_WHITE
  }

  /// Multiply/add color pair applied to shaded output.
  fn init_color(&self, vertex: usize) -> (Vec4, Vec4) {
    let _ = vertex;
    (Vec4::ONE, Vec4::ZERO)
  }

  fn uvw(&self, vertex: usize, channel: usize) -> Vec3 {
    let _ = (vertex, channel);
    Vec3::ZERO
  }

  fn weights(&self, vertex: usize) -> SmallVec<[f32; MAX_WEIGHTS]> {
    let _ = vertex;
    SmallVec::new()
  }

  fn skin_index(&self, vertex: usize) -> Option<u32> {
    let _ = vertex;
    None
  }

  /// Check attribute arrays before extraction.
  fn validate(&self) -> Result<()> {
    Ok(())
  }
}

/// Owned mesh arrays implementing [`MeshSource`].
///
/// Optional attributes left empty fall back to the trait defaults.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
  pub name: String,
  pub positions: Vec<Vec3>,
  pub normals: Vec<Vec3>,
  pub indices: Vec<u32>,
  /// Empty = opaque white.
  pub colors: Vec<Rgba8>,
  /// Empty = multiply by one.
  pub mult_colors: Vec<Vec4>,
  /// Empty = add zero.
  pub add_colors: Vec<Vec4>,
  /// One array per UVW channel.
  pub uvws: Vec<Vec<Vec3>>,
  /// Flat weights, `weight_count` per vertex.
  pub weights: Vec<f32>,
  pub weight_count: usize,
  pub skin_indices: Option<Vec<u32>>,
}

impl MeshData {
  /// Positions and triangles with every normal pointing up +Z.
  pub fn new(name: impl Into<String>, positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
    let normals = vec![Vec3::Z; positions.len()];
    Self {
      name: name.into(),
      positions,
      normals,
      indices,
      ..Default::default()
    }
  }

  pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
    self.normals = normals;
    self
  }

  pub fn with_colors(mut self, colors: Vec<Rgba8>) -> Self {
    self.colors = colors;
    self
  }

  pub fn with_init_colors(mut self, mult: Vec<Vec4>, add: Vec<Vec4>) -> Self {
    self.mult_colors = mult;
    self.add_colors = add;
    self
  }

  pub fn with_uvw_channel(mut self, uvws: Vec<Vec3>) -> Self {
    self.uvws.push(uvws);
    self
  }

  pub fn with_weights(mut self, weight_count: usize, weights: Vec<f32>) -> Self {
    self.weight_count = weight_count;
    self.weights = weights;
    self
  }

  pub fn with_skin_indices(mut self, indices: Vec<u32>) -> Self {
    self.skin_indices = Some(indices);
    self
  }

  fn check_len(attribute: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
      Ok(())
    } else {
      Err(ClusterError::AttributeLength {
        attribute,
        expected,
        actual,
      })
    }
  }
}

impl MeshSource for MeshData {
  fn name(&self) -> &str {
    &self.name
  }

  fn vertex_count(&self) -> usize {
    self.positions.len()
  }

  fn indices(&self) -> &[u32] {
    &self.indices
  }

  fn uvw_count(&self) -> usize {
    self.uvws.len()
  }

  fn weight_count(&self) -> usize {
    self.weight_count
  }

  fn has_skin_index(&self) -> bool {
    self.skin_indices.is_some()
  }

  fn position(&self, vertex: usize) -> Vec3 {
    self.positions[vertex]
  }

  fn normal(&self, vertex: usize) -> Vec3 {
    self.normals[vertex]
  }

  fn color(&self, vertex: usize) -> Rgba8 {
    self.colors.get(vertex).copied().unwrap_or(OPAQUE_WHITE)
  }

  fn init_color(&self, vertex: usize) -> (Vec4, Vec4) {
    let mult = self.mult_colors.get(vertex).copied().unwrap_or(Vec4::ONE);
    let add = self.add_colors.get(vertex).copied().unwrap_or(Vec4::ZERO);
    (mult, add)
  }

  fn uvw(&self, vertex: usize, channel: usize) -> Vec3 {
    self.uvws[channel][vertex]
  }

  fn weights(&self, vertex: usize) -> SmallVec<[f32; MAX_WEIGHTS]> {
    let start = vertex * self.weight_count;
    SmallVec::from_slice(&self.weights[start..start + self.weight_count])
  }

  fn skin_index(&self, vertex: usize) -> Option<u32> {
    self.skin_indices.as_ref().map(|idx| idx[vertex])
  }

  fn validate(&self) -> Result<()> {
    let n = self.positions.len();
    Self::check_len("normals", n, self.normals.len())?;
    if !self.colors.is_empty() {
      Self::check_len("colors", n, self.colors.len())?;
    }
    if !self.mult_colors.is_empty() {
      Self::check_len("mult_colors", n, self.mult_colors.len())?;
    }
    if !self.add_colors.is_empty() {
      Self::check_len("add_colors", n, self.add_colors.len())?;
    }
    for channel in &self.uvws {
      Self::check_len("uvws", n, channel.len())?;
    }
    if self.weight_count > MAX_WEIGHTS {
      return Err(ClusterError::AttributeLength {
        attribute: "weight_count",
        expected: MAX_WEIGHTS,
        actual: self.weight_count,
      });
    }
    Self::check_len("weights", n * self.weight_count, self.weights.len())?;
    if let Some(skin) = &self.skin_indices {
      Self::check_len("skin_indices", n, skin.len())?;
    }
    Ok(())
  }
}
