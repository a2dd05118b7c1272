//! ClusterConfig - thresholds controlling how instances are split and how
//! finely deltas are encoded.

use crate::encoding::select::DEFAULT_POSITION_QUANTUM;

/// Default triangle budget below which a cluster is never split.
pub const DEFAULT_MIN_FACES: usize = 200;

/// Default triangle budget above which a cluster is always split.
pub const DEFAULT_MAX_FACES: usize = 1000;

/// Default smallest cluster extent (world units) worth splitting.
pub const DEFAULT_MIN_SIZE: f32 = 50.0;

/// Where a list is cut once the splitter decides to split it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SplitMode {
  /// Cut at the median index; both halves differ in size by at most one.
  #[default]
  Median,
  /// Cut at the widest gap between consecutive coordinates along the split
  /// axis. Follows natural clumps; halves may be very uneven.
  LargestGap,
}

/// Configuration for clustering one template's instances.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterConfig {
  /// Triangle budget: a list of at most `min_faces / tris` instances is
  /// never split.
  pub min_faces: usize,

  /// Triangle budget: a list of at least `max_faces / tris` instances is
  /// always split.
  pub max_faces: usize,

  /// Lists smaller than the max budget whose longest extent is under this
  /// size are not split.
  pub min_size: f32,

  /// Largest position delta that may be dropped by encoding.
  pub position_quantum: f32,

  pub split_mode: SplitMode,
}

impl ClusterConfig {
  /// Production defaults.
  pub const DEFAULT: Self = Self {
    min_faces: DEFAULT_MIN_FACES,
    max_faces: DEFAULT_MAX_FACES,
    min_size: DEFAULT_MIN_SIZE,
    position_quantum: DEFAULT_POSITION_QUANTUM,
    split_mode: SplitMode::Median,
  };

  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_face_budget(mut self, min_faces: usize, max_faces: usize) -> Self {
    self.min_faces = min_faces;
    self.max_faces = max_faces;
    self
  }

  pub fn with_min_size(mut self, min_size: f32) -> Self {
    self.min_size = min_size;
    self
  }

  pub fn with_position_quantum(mut self, quantum: f32) -> Self {
    self.position_quantum = quantum;
    self
  }

  pub fn with_split_mode(mut self, mode: SplitMode) -> Self {
    self.split_mode = mode;
    self
  }

  /// Instance-count limits for a template with `triangle_count` triangles.
  pub fn instance_limits(&self, triangle_count: usize) -> InstanceLimits {
    InstanceLimits::from_face_budget(self.min_faces, self.max_faces, triangle_count)
  }
}

impl Default for ClusterConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Instance-count thresholds derived from the triangle budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceLimits {
  /// Lists at or below this count are never split (>= 1).
  pub min_instances: usize,
  /// Lists at or above this count are always split (> min_instances).
  pub max_instances: usize,
}

impl InstanceLimits {
  /// `min = max(1, min_faces / tris)`, `max = max_faces / tris`, with max
  /// raised to `min + 1` when it does not exceed min.
  pub fn from_face_budget(min_faces: usize, max_faces: usize, triangle_count: usize) -> Self {
    let tris = triangle_count.max(1);
    let min_instances = (min_faces / tris).max(1);
    let mut max_instances = max_faces / tris;
    if max_instances <= min_instances {
      max_instances = min_instances + 1;
    }
    Self {
      min_instances,
      max_instances,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
