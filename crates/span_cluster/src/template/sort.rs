//! Deterministic orderings for template data.
//!
//! Triangles are ordered by their farthest vertex from the local Z axis so
//! the trunk of a prop draws before its outer canopy. Templates split from
//! one source are ordered bottom-up by the top of their bounds.

use super::{TemplateMesh, TemplateVertex};

/// Squared distance from the local Z axis of a triangle's farthest vertex.
#[inline]
fn proximity_key(tri: &[u32], vertices: &[TemplateVertex]) -> f32 {
  tri
    .iter()
    .map(|&i| {
      let p = vertices[i as usize].position;
      p.x * p.x + p.y * p.y
    })
    .fold(f32::NEG_INFINITY, f32::max)
}

/// Stable-sort triangles in place by ascending proximity key.
///
/// `indices.len()` must be a multiple of 3.
pub fn sort_triangles(indices: &mut [u32], vertices: &[TemplateVertex]) {
  let mut tris: Vec<([u32; 3], f32)> = indices
    .chunks_exact(3)
    .map(|tri| ([tri[0], tri[1], tri[2]], proximity_key(tri, vertices)))
    .collect();

  tris.sort_by(|a, b| a.1.total_cmp(&b.1));

  for (dst, (tri, _)) in indices.chunks_exact_mut(3).zip(tris) {
    dst.copy_from_slice(&tri);
  }
}

/// Order templates by the Z of their local bounds' top and chain render
/// levels from the first one upward.
pub fn order_templates(templates: &mut [TemplateMesh]) {
  templates.sort_by(|a, b| a.local_bounds.max.z.total_cmp(&b.local_bounds.max.z));

  for i in 1..templates.len() {
    templates[i].render_level = templates[i - 1].render_level + 1;
  }
}

#[cfg(test)]
#[path = "sort_test.rs"]
mod sort_test;
