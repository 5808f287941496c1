//! Common test data constants

/// Route prefix used by the manager-level tests
pub const ROUTE: &str = "/x";

pub mod collections {
    pub const CLUSTERS: &str = "clusters";
    pub const NODES: &str = "nodes";
    pub const VOLUMES: &str = "volumes";
}

pub mod ids {
    pub const CLUSTER_1: &str = "c1a2b3";
    pub const NODE_1: &str = "n1a2b3";
    pub const VOLUME_1: &str = "v1a2b3";
}
