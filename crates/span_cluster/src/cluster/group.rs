//! ClusterGroup - one template plus every cluster built from its instances.
//!
//! ```text
//! add_instances(transforms, deformer, shader)
//!   split_instances      -> batches of instance indices
//!   for each batch:
//!     deltas::extract    -> per-instance deltas / colors
//!     select_encoding    -> one SpanEncoding for the batch
//!     InstanceRecord     -> packed samples, appended to a new Cluster
//! ```

use glam::Vec3;
use web_time::Instant;

use super::config::{ClusterConfig, InstanceLimits};
use super::split::split_instances;
use super::stats::ClusterStats;
use crate::deltas::{self, InstanceDeltas, VertexDeformer, VertexShader};
use crate::encoding::{select_encoding, InstanceRecord, SpanEncoding};
use crate::error::{ClusterError, Result};
use crate::template::TemplateMesh;
use crate::types::{LocalToWorld, Rgba8};

/// Instances sharing one encoding. Append-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
  encoding: SpanEncoding,
  instances: Vec<InstanceRecord>,
}

impl Cluster {
  pub fn new(encoding: SpanEncoding) -> Self {
    Self {
      encoding,
      instances: Vec::new(),
    }
  }

  pub fn encoding(&self) -> &SpanEncoding {
    &self.encoding
  }

  pub fn instances(&self) -> &[InstanceRecord] {
    &self.instances
  }

  pub fn len(&self) -> usize {
    self.instances.len()
  }

  pub fn is_empty(&self) -> bool {
    self.instances.is_empty()
  }

  /// Append a record encoded under this cluster's encoding.
  pub fn push(&mut self, record: InstanceRecord) -> Result<()> {
    if *record.encoding() != self.encoding {
      return Err(ClusterError::EncodingMismatch {
        cluster: self.encoding,
        record: *record.encoding(),
      });
    }
    self.instances.push(record);
    Ok(())
  }
}

/// A decoded instance: deformed local positions and final colors.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedInstance {
  pub local_to_world: LocalToWorld,
  /// Rest position plus decoded delta, per vertex.
  pub positions: Vec<Vec3>,
  /// Decoded color, or the template rest color when the cluster has none.
  pub colors: Vec<Rgba8>,
}

/// Root aggregate for one template.
#[derive(Clone, Debug)]
pub struct ClusterGroup {
  name: String,
  template: TemplateMesh,
  config: ClusterConfig,
  limits: InstanceLimits,
  clusters: Vec<Cluster>,
}

impl ClusterGroup {
  pub fn new(name: impl Into<String>, template: TemplateMesh, config: ClusterConfig) -> Self {
    let limits = config.instance_limits(template.triangle_count());
    Self {
      name: name.into(),
      template,
      config,
      limits,
      clusters: Vec::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn template(&self) -> &TemplateMesh {
    &self.template
  }

  pub fn config(&self) -> &ClusterConfig {
    &self.config
  }

  /// Instance limits derived from the config and template triangle count.
  pub fn limits(&self) -> &InstanceLimits {
    &self.limits
  }

  pub fn clusters(&self) -> &[Cluster] {
    &self.clusters
  }

  /// Total instances over every cluster.
  pub fn instance_count(&self) -> usize {
    self.clusters.iter().map(Cluster::len).sum()
  }

  /// Split, extract, encode and append clusters for a batch of placements.
  ///
  /// An empty `instances` slice adds nothing.
  #[tracing::instrument(skip_all, name = "group::add_instances", fields(group = %self.name, instances = instances.len()))]
  pub fn add_instances<D, S>(
    &mut self,
    instances: &[LocalToWorld],
    deformer: &mut D,
    shader: &mut S,
  ) -> Result<ClusterStats>
  where
    D: VertexDeformer + ?Sized,
    S: VertexShader + ?Sized,
  {
    let start = Instant::now();
    let mut stats = ClusterStats::default();

    let split = split_instances(instances, &self.limits, &self.config);
    stats.max_split_depth = split.max_depth;

    for batch in &split.batches {
      let transforms: Vec<LocalToWorld> = batch.iter().map(|&i| instances[i]).collect();
      let deltas = deltas::extract_batch(&self.template, &transforms, deformer, shader);
      let cluster = self.add_cluster(&transforms, &deltas)?;
      stats.record_cluster(cluster);
    }

    stats.elapsed_us = start.elapsed().as_micros() as u64;
    tracing::debug!(
      clusters = stats.clusters_created,
      with_position = stats.clusters_with_position,
      with_color = stats.clusters_with_color,
      elapsed_us = stats.elapsed_us,
      "added instances"
    );
    Ok(stats)
  }

  /// Encode one pre-split batch as a new cluster.
  ///
  /// `deltas[i]` belongs to `instances[i]`; a length mismatch is rejected
  /// and leaves the group unchanged.
  pub fn add_cluster(
    &mut self,
    instances: &[LocalToWorld],
    deltas: &[InstanceDeltas],
  ) -> Result<&Cluster> {
    if deltas.len() != instances.len() {
      return Err(ClusterError::InstanceCountMismatch {
        what: "instance deltas",
        expected: instances.len(),
        actual: deltas.len(),
      });
    }

    let rest_colors: Vec<Rgba8> = self.template.colors().collect();
    let encoding = select_encoding(deltas, &rest_colors, self.config.position_quantum);

    let mut cluster = Cluster::new(encoding);
    for (l2w, d) in instances.iter().zip(deltas) {
      let record = InstanceRecord::encode(
        &encoding,
        *l2w,
        &rest_colors,
        d.positions.as_deref(),
        d.colors.as_deref(),
      )?;
      cluster.push(record)?;
    }

    tracing::debug!(
      instances = cluster.len(),
      position = ?encoding.position,
      color = ?encoding.color,
      pos_scale = encoding.pos_scale,
      "encoded cluster"
    );
    self.clusters.push(cluster);
    Ok(&self.clusters[self.clusters.len() - 1])
  }

  /// Reconstruct one instance from its record and the template.
  pub fn decode_instance(&self, cluster: usize, instance: usize) -> Option<DecodedInstance> {
    let record = self.clusters.get(cluster)?.instances.get(instance)?;
    let positions = self
      .template
      .positions()
      .enumerate()
      .map(|(v, rest)| rest + record.position_delta(v))
      .collect();
    let colors = self
      .template
      .colors()
      .enumerate()
      .map(|(v, rest)| record.color(v).unwrap_or(rest))
      .collect();
    Some(DecodedInstance {
      local_to_world: *record.local_to_world(),
      positions,
      colors,
    })
  }
}

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;
