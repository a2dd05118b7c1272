//! Per-instance vertex deltas and shaded colors.
//!
//! Deformation and lighting are external collaborators injected as
//! strategies sharing one shape:
//!
//! ```text
//! begin(ctx) -> bool     false = nothing to do for this instance
//!   evaluate(...)        once per template vertex
//! end()                  only called after a begin that returned true
//! ```
//!
//! A strategy whose `begin` returns false costs one call per instance; the
//! extractor never touches the vertices for it.

use glam::Vec3;

use crate::template::TemplateMesh;
use crate::types::{color_conversion, Aabb3, LocalToWorld, Rgba8};

/// What a strategy is told when an instance evaluation starts.
#[derive(Clone, Copy, Debug)]
pub struct EvalContext<'a> {
  /// Name of the mesh the template was extracted from.
  pub source_name: &'a str,
  /// Template local bounds transformed into world space.
  pub world_bounds: Aabb3,
}

/// World-space deformation strategy.
pub trait VertexDeformer {
  /// Start an instance. Return false when this instance is left undeformed.
  fn begin(&mut self, ctx: &EvalContext<'_>) -> bool;

  /// World-space displacement of the point at `world_pos`.
  fn displacement(&mut self, world_pos: Vec3) -> Vec3;

  fn end(&mut self) {}
}

/// Vertex lighting strategy.
pub trait VertexShader {
  /// Start an instance. Return false when this instance is left unshaded.
  fn begin(&mut self, ctx: &EvalContext<'_>) -> bool;

  /// Linear RGB light arriving at a world-space point and normal.
  ///
  /// `world_normal` is unit length, or zero where the template normal is
  /// degenerate.
  fn shade(&mut self, world_pos: Vec3, world_normal: Vec3) -> Vec3;

  fn end(&mut self) {}
}

/// Blanket impl for boxed trait objects.
impl<T: VertexDeformer + ?Sized> VertexDeformer for Box<T> {
  fn begin(&mut self, ctx: &EvalContext<'_>) -> bool {
    (**self).begin(ctx)
  }

  fn displacement(&mut self, world_pos: Vec3) -> Vec3 {
    (**self).displacement(world_pos)
  }

  fn end(&mut self) {
    (**self).end()
  }
}

/// Blanket impl for boxed trait objects.
impl<T: VertexShader + ?Sized> VertexShader for Box<T> {
  fn begin(&mut self, ctx: &EvalContext<'_>) -> bool {
    (**self).begin(ctx)
  }

  fn shade(&mut self, world_pos: Vec3, world_normal: Vec3) -> Vec3 {
    (**self).shade(world_pos, world_normal)
  }

  fn end(&mut self) {
    (**self).end()
  }
}

/// Deformer that never deforms.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDeform;

impl VertexDeformer for NoDeform {
  #[inline(always)]
  fn begin(&mut self, _ctx: &EvalContext<'_>) -> bool {
    false
  }

  #[inline(always)]
  fn displacement(&mut self, _world_pos: Vec3) -> Vec3 {
    Vec3::ZERO
  }
}

/// Shader that never shades.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShade;

impl VertexShader for NoShade {
  #[inline(always)]
  fn begin(&mut self, _ctx: &EvalContext<'_>) -> bool {
    false
  }

  #[inline(always)]
  fn shade(&mut self, _world_pos: Vec3, _world_normal: Vec3) -> Vec3 {
    Vec3::ONE
  }
}

/// Extracted deltas for one instance.
///
/// `None` means the strategy declined the instance: zero deltas, untouched
/// colors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceDeltas {
  /// Position deltas in the instance's local frame, one per template vertex.
  pub positions: Option<Vec<Vec3>>,
  /// Final shaded colors, one per template vertex.
  pub colors: Option<Vec<Rgba8>>,
}

impl InstanceDeltas {
  /// No deformation, no shading.
  pub fn identity() -> Self {
    Self::default()
  }

  pub fn is_identity(&self) -> bool {
    self.positions.is_none() && self.colors.is_none()
  }
}

/// Compute deltas and colors for one instance of `template`.
pub fn extract<D, S>(
  template: &TemplateMesh,
  l2w: &LocalToWorld,
  deformer: &mut D,
  shader: &mut S,
) -> InstanceDeltas
where
  D: VertexDeformer + ?Sized,
  S: VertexShader + ?Sized,
{
  let ctx = EvalContext {
    source_name: template.source_name(),
    world_bounds: template.local_bounds().transformed(l2w),
  };
  let w2l = l2w.inverse();

  let positions = if deformer.begin(&ctx) {
    let deltas = template
      .positions()
      .map(|rest| {
        let world = l2w.transform_point3(rest);
        w2l.transform_vector3(deformer.displacement(world))
      })
      .collect::<Vec<_>>();
    deformer.end();
    Some(deltas)
  } else {
    None
  };

  let colors = if shader.begin(&ctx) {
    // Normals go through the inverse transpose so non-uniform scale keeps
    // them perpendicular.
    let normal_matrix = l2w.matrix3.inverse().transpose();
    let colors = template
      .vertices()
      .iter()
      .enumerate()
      .map(|(j, v)| {
        let delta = positions.as_ref().map_or(Vec3::ZERO, |d| d[j]);
        let world_pos = l2w.transform_point3(v.position + delta);
        let world_normal = (normal_matrix * v.normal).normalize_or_zero();

        let rgb = shader.shade(world_pos, world_normal);
        let rgb = rgb * v.mult_color.truncate() + v.add_color.truncate();
        color_conversion::pack(rgb.extend(v.mult_color.w))
      })
      .collect::<Vec<_>>();
    shader.end();
    Some(colors)
  } else {
    None
  };

  InstanceDeltas { positions, colors }
}

/// Extract every instance in order.
#[tracing::instrument(skip_all, name = "deltas::extract_batch", fields(instances = instances.len()))]
pub fn extract_batch<D, S>(
  template: &TemplateMesh,
  instances: &[LocalToWorld],
  deformer: &mut D,
  shader: &mut S,
) -> Vec<InstanceDeltas>
where
  D: VertexDeformer + ?Sized,
  S: VertexShader + ?Sized,
{
  instances
    .iter()
    .map(|l2w| extract(template, l2w, deformer, shader))
    .collect()
}
