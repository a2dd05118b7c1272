//! Recursive spatial split of an instance list into cluster-sized batches.
//!
//! Each step bounds the instance translations, picks the longest axis, and
//! either stops or sorts along that axis and cuts the list in two:
//!
//! ```text
//! count <= min_instances                        -> stop
//! count <  max_instances && extent[a] < min_size -> stop
//! otherwise                                     -> sort by a, cut, recurse
//! ```
//!
//! Both halves of a cut are non-empty, so every step strictly shrinks the
//! list and recursion terminates at the latest on single instances.
//!
//! A largest-gap cut must leave at least a quarter of the list (and at least
//! `min_instances`) on each side; otherwise the median is used. Depth is
//! therefore at most `ceil(log2 n) + 1` for median cuts and
//! `ceil(log_{4/3} n) + 1` for largest-gap cuts.

use glam::Vec3;

use super::config::{ClusterConfig, InstanceLimits, SplitMode};
use crate::types::{Aabb3, LocalToWorld};

/// Result of splitting one instance list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitOutput {
  /// Indices into the input list, one batch per cluster. Within a batch,
  /// indices are ordered along the last split axis.
  pub batches: Vec<Vec<usize>>,
  /// Deepest recursion level reached (1 = no split).
  pub max_depth: usize,
}

struct Splitter<'a> {
  instances: &'a [LocalToWorld],
  limits: InstanceLimits,
  min_size: f32,
  mode: SplitMode,
}

impl Splitter<'_> {
  #[inline]
  fn translation(&self, index: usize) -> Vec3 {
    Vec3::from(self.instances[index].translation)
  }

  fn bounds(&self, indices: &[usize]) -> Aabb3 {
    Aabb3::from_points(indices.iter().map(|&i| self.translation(i)))
  }

  /// Split `indices` in place; returns the upper half, or None to stop.
  fn split_once(&self, indices: &mut Vec<usize>) -> Option<Vec<usize>> {
    let count = indices.len();
    if count <= self.limits.min_instances {
      return None;
    }

    let bounds = self.bounds(indices);
    let axis = bounds.longest_axis();

    if count < self.limits.max_instances && bounds.size()[axis] < self.min_size {
      return None;
    }

    indices.sort_by(|&a, &b| {
      self.translation(a)[axis].total_cmp(&self.translation(b)[axis])
    });

    let pivot = match self.mode {
      SplitMode::Median => count >> 1,
      SplitMode::LargestGap => self
        .largest_gap(indices, axis, self.min_side(count))
        .unwrap_or(count >> 1),
    };

    tracing::trace!(count, axis, pivot, "split");
    Some(indices.split_off(pivot))
  }

  /// Smallest half a largest-gap cut may leave, None when no cut of a list
  /// this size can satisfy it.
  fn min_side(&self, count: usize) -> Option<usize> {
    let side = (count / 4).max(self.limits.min_instances).max(1);
    (2 * side <= count).then_some(side)
  }

  /// Index of the first element after the widest gap with at least
  /// `min_side` elements on both sides. None when no such gap exists or
  /// every coordinate in range coincides.
  fn largest_gap(&self, sorted: &[usize], axis: usize, min_side: Option<usize>) -> Option<usize> {
    let side = min_side?;
    let mut max_dist = 0.0;
    let mut pivot = None;
    for i in side..=sorted.len() - side {
      let dist = self.translation(sorted[i])[axis] - self.translation(sorted[i - 1])[axis];
      if dist > max_dist {
        max_dist = dist;
        pivot = Some(i);
      }
    }
    pivot
  }

  /// Depth-first over an explicit stack; batches come out lower half first.
  fn run(&self, root: Vec<usize>, out: &mut SplitOutput) {
    let mut stack = vec![(root, 1usize)];
    while let Some((mut indices, depth)) = stack.pop() {
      out.max_depth = out.max_depth.max(depth);
      match self.split_once(&mut indices) {
        Some(hi) => {
          stack.push((hi, depth + 1));
          stack.push((indices, depth + 1));
        }
        None => out.batches.push(indices),
      }
    }
  }
}

/// Partition `instances` into batches. An empty list yields no batches.
#[tracing::instrument(skip_all, name = "cluster::split", fields(instances = instances.len()))]
pub fn split_instances(
  instances: &[LocalToWorld],
  limits: &InstanceLimits,
  config: &ClusterConfig,
) -> SplitOutput {
  let mut out = SplitOutput::default();
  if instances.is_empty() {
    return out;
  }

  let splitter = Splitter {
    instances,
    limits: *limits,
    min_size: config.min_size,
    mode: config.split_mode,
  };
  splitter.run((0..instances.len()).collect(), &mut out);

  tracing::debug!(
    batches = out.batches.len(),
    max_depth = out.max_depth,
    "split instances"
  );
  out
}

#[cfg(test)]
#[path = "split_test.rs"]
mod split_test;
