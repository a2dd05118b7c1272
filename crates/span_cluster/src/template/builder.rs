//! Template extraction: validate a [`MeshSource`], merge duplicate vertices,
//! bound the rest pose and order triangles by proximity.

use std::collections::HashMap;

use smallvec::SmallVec;

use super::sort::sort_triangles;
use super::{MeshSource, TemplateMesh, TemplateVertex};
use crate::error::{ClusterError, Result};
use crate::types::Aabb3;

/// Build a template from an extracted source mesh.
///
/// Fails on a degenerate mesh (no vertices or no triangles), a partial
/// triangle, an out-of-range index, or mismatched attribute arrays.
#[tracing::instrument(skip_all, name = "template::build", fields(source = source.name()))]
pub fn build<M: MeshSource + ?Sized>(source: &M) -> Result<TemplateMesh> {
  let source_name = source.name().to_owned();
  let vertex_count = source.vertex_count();
  let src_indices = source.indices();

  if vertex_count == 0 {
    return Err(ClusterError::EmptyVertices { source_name });
  }
  if src_indices.len() % 3 != 0 {
    return Err(ClusterError::PartialTriangle {
      count: src_indices.len(),
    });
  }
  if src_indices.is_empty() {
    return Err(ClusterError::EmptyTriangles { source_name });
  }
  if let Some(&index) = src_indices.iter().find(|&&i| i as usize >= vertex_count) {
    return Err(ClusterError::IndexOutOfRange {
      index,
      vertex_count,
    });
  }
  source.validate()?;

  let raw: Vec<TemplateVertex> = (0..vertex_count)
    .map(|i| extract_vertex(source, i))
    .collect();
  let (vertices, mut indices) = merge_duplicates(raw, src_indices);

  let local_bounds = Aabb3::from_points(vertices.iter().map(|v| v.position));
  sort_triangles(&mut indices, &vertices);

  tracing::debug!(
    source_vertices = vertex_count,
    vertices = vertices.len(),
    triangles = indices.len() / 3,
    "built template"
  );

  Ok(TemplateMesh {
    source_name,
    vertices,
    indices,
    uvw_count: source.uvw_count(),
    weight_count: source.weight_count(),
    has_skin_index: source.has_skin_index(),
    local_bounds,
    render_level: 0,
  })
}

fn extract_vertex<M: MeshSource + ?Sized>(source: &M, i: usize) -> TemplateVertex {
  let (mult_color, add_color) = source.init_color(i);
  let weights = if source.weight_count() > 0 {
    source.weights(i)
  } else {
    SmallVec::new()
  };
  TemplateVertex {
    position: source.position(i),
    normal: source.normal(i),
    color: source.color(i),
    mult_color,
    add_color,
    uvws: (0..source.uvw_count()).map(|k| source.uvw(i, k)).collect(),
    weights,
    skin_index: if source.has_skin_index() {
      source.skin_index(i)
    } else {
      None
    },
  }
}

/// Collapse bit-identical vertices, keeping first-seen order, and remap the
/// index list onto the survivors.
pub(crate) fn merge_duplicates(
  raw: Vec<TemplateVertex>,
  indices: &[u32],
) -> (Vec<TemplateVertex>, Vec<u32>) {
  let mut lookup: HashMap<SmallVec<[u32; 32]>, u32> = HashMap::with_capacity(raw.len());
  let mut remap = Vec::with_capacity(raw.len());
  let mut vertices = Vec::with_capacity(raw.len());

  for vertex in raw {
    let next = vertices.len() as u32;
    let slot = *lookup.entry(vertex.key()).or_insert(next);
    if slot == next {
      vertices.push(vertex);
    }
    remap.push(slot);
  }

  let indices = indices.iter().map(|&i| remap[i as usize]).collect();
  (vertices, indices)
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
