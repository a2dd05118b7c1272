//! Test utilities shared by the unit tests.
//!
//! Provides template fixtures, placement generators and mock
//! deformation/shading strategies that count how they are driven.

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::deltas::{EvalContext, VertexDeformer, VertexShader};
use crate::template::{self, MeshData, TemplateMesh};
use crate::types::LocalToWorld;

// =============================================================================
// Mesh fixtures
// =============================================================================

/// Triangle strip with `triangles` triangles and `triangles + 2` distinct
/// vertices laid out on two rows along +X.
pub fn strip_mesh(name: &str, triangles: usize) -> MeshData {
  let positions = (0..triangles + 2)
    .map(|k| Vec3::new((k / 2) as f32, (k % 2) as f32, 0.0))
    .collect();
  let indices = (0..triangles as u32)
    .flat_map(|k| [k, k + 1, k + 2])
    .collect();
  MeshData::new(name, positions, indices)
}

/// Built template of a strip with `triangles` triangles.
pub fn strip_template(triangles: usize) -> TemplateMesh {
  template::build(&strip_mesh("strip", triangles)).expect("strip fixture must build")
}

/// Unit quad in the XY plane, two triangles.
pub fn quad_mesh(name: &str) -> MeshData {
  MeshData::new(
    name,
    vec![
      Vec3::new(-1.0, -1.0, 0.0),
      Vec3::new(1.0, -1.0, 0.0),
      Vec3::new(1.0, 1.0, 0.0),
      Vec3::new(-1.0, 1.0, 0.0),
    ],
    vec![0, 1, 2, 0, 2, 3],
  )
}

// =============================================================================
// Placement generators
// =============================================================================

/// `count` placements along +X, `spacing` apart.
pub fn line_instances(count: usize, spacing: f32) -> Vec<LocalToWorld> {
  (0..count)
    .map(|i| LocalToWorld::from_translation(Vec3::new(i as f32 * spacing, 0.0, 0.0)))
    .collect()
}

/// `nx * ny` placements on an XY grid.
pub fn grid_instances(nx: usize, ny: usize, spacing: f32) -> Vec<LocalToWorld> {
  let mut out = Vec::with_capacity(nx * ny);
  for y in 0..ny {
    for x in 0..nx {
      out.push(LocalToWorld::from_translation(Vec3::new(
        x as f32 * spacing,
        y as f32 * spacing,
        0.0,
      )));
    }
  }
  out
}

/// Seeded random placements in a cube of half-size `extent`, with random
/// yaw and uniform scale.
pub fn random_instances(count: usize, extent: f32, seed: u64) -> Vec<LocalToWorld> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| {
      let t = Vec3::new(
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
      );
      let yaw = rng.random_range(0.0..std::f32::consts::TAU);
      let scale = rng.random_range(0.5..2.0);
      LocalToWorld::from_scale_rotation_translation(Vec3::splat(scale), Quat::from_rotation_z(yaw), t)
    })
    .collect()
}

// =============================================================================
// Mock strategies
// =============================================================================

/// Displaces every point by the same world-space vector.
pub struct ConstantDeform(pub Vec3);

impl VertexDeformer for ConstantDeform {
  fn begin(&mut self, _ctx: &EvalContext<'_>) -> bool {
    true
  }

  fn displacement(&mut self, _world_pos: Vec3) -> Vec3 {
    self.0
  }
}

/// Returns the same light everywhere.
pub struct ConstantShade(pub Vec3);

impl VertexShader for ConstantShade {
  fn begin(&mut self, _ctx: &EvalContext<'_>) -> bool {
    true
  }

  fn shade(&mut self, _world_pos: Vec3, _world_normal: Vec3) -> Vec3 {
    self.0
  }
}

/// Call counters for a mock strategy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
  pub begins: usize,
  pub evals: usize,
  pub ends: usize,
}

/// Deformer that records calls; `active` decides what `begin` returns.
#[derive(Default)]
pub struct CountingDeform {
  pub active: bool,
  pub calls: CallCounts,
  pub last_source: String,
}

impl VertexDeformer for CountingDeform {
  fn begin(&mut self, ctx: &EvalContext<'_>) -> bool {
    self.calls.begins += 1;
    self.last_source = ctx.source_name.to_owned();
    self.active
  }

  fn displacement(&mut self, _world_pos: Vec3) -> Vec3 {
    self.calls.evals += 1;
    Vec3::Z
  }

  fn end(&mut self) {
    self.calls.ends += 1;
  }
}

/// Shader that records calls and the normals it sees.
#[derive(Default)]
pub struct CountingShade {
  pub active: bool,
  pub calls: CallCounts,
  pub normals: Vec<Vec3>,
  pub positions: Vec<Vec3>,
}

impl VertexShader for CountingShade {
  fn begin(&mut self, _ctx: &EvalContext<'_>) -> bool {
    self.calls.begins += 1;
    self.active
  }

  fn shade(&mut self, world_pos: Vec3, world_normal: Vec3) -> Vec3 {
    self.calls.evals += 1;
    self.positions.push(world_pos);
    self.normals.push(world_normal);
    Vec3::ONE
  }

  fn end(&mut self) {
    self.calls.ends += 1;
  }
}

/// Asserts two vectors agree within `eps` on every axis.
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, eps: f32) {
  assert!(
    (actual - expected).abs().max_element() <= eps,
    "expected {:?} within {} of {:?}",
    actual,
    eps,
    expected
  );
}
