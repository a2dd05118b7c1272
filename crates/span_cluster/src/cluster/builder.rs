//! GroupBuilder - turns source meshes into named, configured cluster groups.

use super::config::ClusterConfig;
use super::group::ClusterGroup;
use crate::error::Result;
use crate::template::{self, MeshSource, TemplateMesh};

/// Shared settings and naming for every group produced in one export.
///
/// Group names are `"{prefix}_{source}_{index}"` with a running index, so
/// groups stay unique even when one source yields several templates.
#[derive(Clone, Debug, Default)]
pub struct GroupBuilder {
  config: ClusterConfig,
  next_index: usize,
}

impl GroupBuilder {
  pub fn new(config: ClusterConfig) -> Self {
    Self {
      config,
      next_index: 0,
    }
  }

  pub fn config(&self) -> &ClusterConfig {
    &self.config
  }

  /// Build one template per source span and chain their render levels
  /// bottom-up.
  pub fn make_templates<M: MeshSource>(&self, spans: &[M]) -> Result<Vec<TemplateMesh>> {
    let mut templates = spans
      .iter()
      .map(template::build)
      .collect::<Result<Vec<_>>>()?;
    template::order_templates(&mut templates);
    Ok(templates)
  }

  /// Create an empty group owning `template`.
  pub fn create_group(&mut self, prefix: &str, template: TemplateMesh) -> ClusterGroup {
    let name = format!("{}_{}_{}", prefix, template.source_name(), self.next_index);
    self.next_index += 1;
    tracing::debug!(%name, triangles = template.triangle_count(), "created cluster group");
    ClusterGroup::new(name, template, self.config.clone())
  }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
