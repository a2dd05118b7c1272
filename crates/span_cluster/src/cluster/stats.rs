//! Statistics from one clustering pass.

use super::group::Cluster;

/// Counters reported by `ClusterGroup::add_instances`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClusterStats {
  /// Instances encoded into clusters.
  pub instances_added: usize,
  /// Clusters appended to the group.
  pub clusters_created: usize,
  /// Deepest split recursion level (1 = no split).
  pub max_split_depth: usize,
  /// Clusters storing per-vertex position deltas.
  pub clusters_with_position: usize,
  /// Clusters storing per-vertex colors.
  pub clusters_with_color: usize,
  /// Wall time spent, in microseconds.
  pub elapsed_us: u64,
}

impl ClusterStats {
  /// Count one finished cluster.
  pub fn record_cluster(&mut self, cluster: &Cluster) {
    self.clusters_created += 1;
    self.instances_added += cluster.len();
    if cluster.encoding().has_position() {
      self.clusters_with_position += 1;
    }
    if cluster.encoding().has_color() {
      self.clusters_with_color += 1;
    }
  }

  /// Fold another pass into this one.
  pub fn accumulate(&mut self, other: &ClusterStats) {
    self.instances_added += other.instances_added;
    self.clusters_created += other.clusters_created;
    self.max_split_depth = self.max_split_depth.max(other.max_split_depth);
    self.clusters_with_position += other.clusters_with_position;
    self.clusters_with_color += other.clusters_with_color;
    self.elapsed_us += other.elapsed_us;
  }
}
