//! Cluster module: spatial split of placements and the cluster aggregates
//! they are encoded into.
//!
//! # Module Structure
//!
//! - [`config`]: `ClusterConfig` - face budgets, size threshold, quantum
//! - [`split`]: `split_instances` - recursive median/gap partitioning
//! - [`group`]: `ClusterGroup`, `Cluster` - template + encoded clusters
//! - [`builder`]: `GroupBuilder` - template extraction and group naming
//! - [`stats`]: `ClusterStats` - counters from one clustering pass

pub mod builder;
pub mod config;
pub mod group;
pub mod split;
pub mod stats;

// Re-exports
pub use builder::GroupBuilder;
pub use config::{ClusterConfig, InstanceLimits, SplitMode};
pub use group::{Cluster, ClusterGroup, DecodedInstance};
pub use split::{split_instances, SplitOutput};
pub use stats::ClusterStats;
