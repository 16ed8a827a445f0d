// Spec synthesis - converts session jobs into isolated execution specs and
// an execution graph.
//
// RESPONSIBILITY BOUNDARIES:
// - Converts session jobs to isolated execution specs.
// - Maintains session immutability during synthesis.
// - Does not implement execution logic or scheduling.
//
// Session remains unmodified; order matches session job order exactly.

use crate::domain::{
    ExecutionGraph, ExecutionNode, FailureStrategy, JobExecutionSpec, JobSpecHash, RetryPolicy,
    Session, SessionJobId, Target,
};
use crate::port::BoundaryObserver;
use tracing::debug;

/// Best-effort target inference from the command text. The core has no
/// parser of its own (out of scope); this is a coarse keyword match used
/// only to populate `JobExecutionSpec::target` for commands whose concrete
/// backend routing is otherwise undetermined.
fn infer_target(command: &str) -> Target {
    let lower = command.to_ascii_lowercase();
    if lower.contains("audio") {
        Target::AudioLab
    } else if lower.contains("video") {
        Target::VideoTrans
    } else if lower.contains("meta") {
        Target::MetaFix
    } else {
        Target::Convert
    }
}

/// Convert session jobs to isolated execution specs, in session job order.
///
/// A descriptor's `dependencies` must reference only jobs earlier in the
/// session's job list; the corresponding spec's `dependencies` are resolved
/// to those jobs' content hashes. A forward or unknown reference is dropped
/// rather than causing synthesis to fail - the graph built alongside still
/// carries the original `SessionJobId` dependency for structural purposes.
pub fn prepare_job_specs(
    session: &Session,
    observer: &dyn BoundaryObserver,
) -> Vec<(SessionJobId, JobExecutionSpec)> {
    let mut specs: Vec<(SessionJobId, JobExecutionSpec)> = Vec::new();

    for descriptor in session.jobs() {
        let resolved_dependencies: Vec<JobSpecHash> = descriptor
            .dependencies
            .iter()
            .filter_map(|dep_id| specs.iter().find(|(id, _)| id == dep_id))
            .map(|(_, spec)| spec.hash.clone())
            .collect();

        let spec = JobExecutionSpec::create(
            infer_target(&descriptor.command),
            descriptor.command.clone(),
            descriptor.arguments.clone(),
            RetryPolicy::default(),
            FailureStrategy::Halt,
            resolved_dependencies,
        );
        specs.push((descriptor.job_id.clone(), spec));
    }

    debug!(session_id = %session.id(), spec_count = specs.len(), "job specs synthesized");
    observer.observe_execution_graph_creation(session.id(), specs.len() as u64);

    specs
}

/// Extract the spec for a single job, if present.
pub fn prepare_job_spec(
    session: &Session,
    observer: &dyn BoundaryObserver,
    job_id: &SessionJobId,
) -> Option<JobExecutionSpec> {
    prepare_job_specs(session, observer)
        .into_iter()
        .find(|(id, _)| id == job_id)
        .map(|(_, spec)| spec)
}

/// Build the `ExecutionGraph` structural mirror of a session: one node per
/// job in session order, each carrying its descriptor's dependency ids
/// verbatim, plus the synthesized spec lookup.
pub fn build_execution_graph(session: &Session, observer: &dyn BoundaryObserver) -> ExecutionGraph {
    let specs = prepare_job_specs(session, observer);

    let nodes = session
        .jobs()
        .iter()
        .map(|descriptor| ExecutionNode {
            job_id: descriptor.job_id.clone(),
            dependencies: descriptor.dependencies.clone(),
        })
        .collect();

    ExecutionGraph::new(nodes, specs)
}
