// ExecutionGraph - ordered structural mirror of a Session plus spec lookup.

use super::session::SessionJobId;
use super::spec::JobExecutionSpec;
use serde::{Deserialize, Serialize};

/// One graph node: a job id and its ordered dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionNode {
    pub job_id: SessionJobId,
    pub dependencies: Vec<SessionJobId>,
}

/// Ordered mirror of a session's job list, carrying a `SessionJobId ->
/// JobExecutionSpec` mapping for execution bridging.
///
/// The mapping is a plain vector searched linearly rather than a hash map -
/// graphs in this system are small per-batch structures and lookup order
/// must never depend on a salted hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionGraph {
    nodes: Vec<ExecutionNode>,
    specs: Vec<(SessionJobId, JobExecutionSpec)>,
}

impl ExecutionGraph {
    pub fn new(nodes: Vec<ExecutionNode>, specs: Vec<(SessionJobId, JobExecutionSpec)>) -> Self {
        Self { nodes, specs }
    }

    pub fn nodes(&self) -> &[ExecutionNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn spec_for(&self, job_id: &SessionJobId) -> Option<&JobExecutionSpec> {
        self.specs.iter().find(|(id, _)| id == job_id).map(|(_, spec)| spec)
    }
}
