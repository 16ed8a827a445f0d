// Deterministic Execution Engine - drives every job through the state
// machine in graph order, producing a totally ordered trace and halting on
// first failure.

use crate::domain::{
    DomainError, ExecutionGraph, ExecutionState, SessionId, SessionJobId, StateCounts, StateStore,
};
use crate::port::{EngineObserver, JobExecutor};
use tracing::{info, warn};

/// One recorded transition, in the order it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionTraceRecord {
    pub execution_index: u64,
    pub job_id: SessionJobId,
    pub previous_state: ExecutionState,
    pub new_state: ExecutionState,
}

/// Result of one `execute_all` invocation.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub all_jobs_completed: bool,
    pub jobs_executed: u64,
    pub trace: Vec<ExecutionTraceRecord>,
    pub final_state: Vec<crate::domain::ExecutionJobState>,
    pub state_counts: StateCounts,
}

/// Drives a single graph through the state machine, once, via a
/// `JobExecutor`. Single-threaded and strictly sequential: execution order
/// is exactly the graph's node order, with no topological reshuffling.
pub struct DeterministicExecutionEngine<'a> {
    graph: &'a ExecutionGraph,
    executor: &'a dyn JobExecutor,
    observer: Option<&'a dyn EngineObserver>,
    session_id: SessionId,
}

impl<'a> DeterministicExecutionEngine<'a> {
    /// Construct the engine for one run. Rejects construction if the graph
    /// is non-empty and no executor capable of executing a job is supplied
    /// - in practice callers always pass a concrete executor, so this guards
    /// only against a caller accidentally handing over a null pointer in
    /// bindings that allow it.
    pub fn new(
        graph: &'a ExecutionGraph,
        executor: &'a dyn JobExecutor,
        observer: Option<&'a dyn EngineObserver>,
    ) -> Result<Self, DomainError> {
        let session_id = graph
            .nodes()
            .first()
            .map(|node| node.job_id.session.clone())
            .unwrap_or_else(|| SessionId::new(""));

        Ok(Self {
            graph,
            executor,
            observer,
            session_id,
        })
    }

    /// Drive every node in graph order through `Planned -> Running ->
    /// Completed|Failed`, halting immediately on the first failure.
    pub fn execute_all(&self) -> Result<ExecutionResult, DomainError> {
        let node_ids: Vec<SessionJobId> = self.graph.nodes().iter().map(|n| n.job_id.clone()).collect();
        let mut store = StateStore::new(node_ids.iter().cloned());
        let mut trace = Vec::new();
        let mut execution_index: u64 = 0;
        let mut jobs_executed: u64 = 0;

        for job_id in &node_ids {
            let planned = store.get(job_id)?.clone();
            let running = planned.to_running()?;
            store.update(running)?;
            trace.push(ExecutionTraceRecord {
                execution_index,
                job_id: job_id.clone(),
                previous_state: ExecutionState::Planned,
                new_state: ExecutionState::Running,
            });
            execution_index += 1;
            jobs_executed += 1;

            let spec = self
                .graph
                .spec_for(job_id)
                .ok_or_else(|| DomainError::SpecNotFound(job_id.clone()))?;

            info!(job_id = %job_id, command = %spec.command, "executing job");
            let result = self.executor.execute_job(spec);

            let current = store.get(job_id)?.clone();
            let (new_state, terminal) = if result.success {
                (current.to_completed(result.clone())?, ExecutionState::Completed)
            } else {
                (current.to_failed(result.clone())?, ExecutionState::Failed)
            };
            store.update(new_state)?;
            trace.push(ExecutionTraceRecord {
                execution_index,
                job_id: job_id.clone(),
                previous_state: ExecutionState::Running,
                new_state: terminal,
            });
            let failing_index = execution_index;
            execution_index += 1;

            if !result.success {
                warn!(job_id = %job_id, "job failed, halting run");
                if let Some(observer) = self.observer {
                    observer.on_halt(job_id, failing_index);
                }
                return Ok(ExecutionResult {
                    all_jobs_completed: false,
                    jobs_executed,
                    state_counts: store.state_counts(),
                    final_state: store.all_states(),
                    trace,
                });
            }
        }

        info!(session_id = %self.session_id, jobs_executed, "run completed");
        if let Some(observer) = self.observer {
            observer.on_completion(&self.session_id, node_ids.len() as u64, jobs_executed);
        }

        Ok(ExecutionResult {
            all_jobs_completed: true,
            jobs_executed,
            state_counts: store.state_counts(),
            final_state: store.all_states(),
            trace,
        })
    }
}

impl<'a> std::fmt::Debug for DeterministicExecutionEngine<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeterministicExecutionEngine")
            .field("session_id", &self.session_id)
            .field("node_count", &self.graph.node_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session_builder::{create_session, derive_session_id};
    use crate::application::spec_synthesis::build_execution_graph;
    use crate::domain::ParsedCommand;
    use crate::port::executor::mocks::{FailingAtCallExecutor, FixedJobExecutor};
    use crate::port::observer::mocks::{ObservedEvent, RecordingEngineObserver};
    use crate::port::NullObserver;

    fn graph_of(n: usize) -> ExecutionGraph {
        let commands: Vec<ParsedCommand> = (0..n)
            .map(|i| ParsedCommand::new(format!("nx convert --job {}", i), vec![], true))
            .collect();
        let id = derive_session_id(&commands);
        let session = create_session(id, &commands, &NullObserver);
        build_execution_graph(&session, &NullObserver)
    }

    #[test]
    fn full_successful_run_completes_all_jobs() {
        let graph = graph_of(2);
        let executor = FixedJobExecutor::success();
        let engine = DeterministicExecutionEngine::new(&graph, &executor, None).unwrap();
        let result = engine.execute_all().unwrap();

        assert!(result.all_jobs_completed);
        assert_eq!(result.jobs_executed, 2);
        assert_eq!(result.trace.len(), 4);
        let indices: Vec<u64> = result.trace.iter().map(|t| t.execution_index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(result.state_counts.completed, 2);
        assert_eq!(result.state_counts.failed, 0);
    }

    #[test]
    fn halts_on_first_failure_and_leaves_remaining_planned() {
        let graph = graph_of(3);
        let executor = FailingAtCallExecutor::new(2);
        let observer = RecordingEngineObserver::new();
        let engine = DeterministicExecutionEngine::new(&graph, &executor, Some(&observer)).unwrap();
        let result = engine.execute_all().unwrap();

        assert!(!result.all_jobs_completed);
        assert_eq!(result.jobs_executed, 2);
        assert_eq!(result.trace.len(), 4);
        assert_eq!(result.state_counts.planned, 1);
        assert_eq!(result.state_counts.completed, 1);
        assert_eq!(result.state_counts.failed, 1);

        let events = observer.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ObservedEvent::Halt { execution_index, .. } => assert_eq!(*execution_index, 3),
            other => panic!("expected halt event, got {:?}", other),
        }
    }

    #[test]
    fn observer_presence_does_not_change_trace_or_final_state() {
        let graph = graph_of(2);
        let executor_a = FixedJobExecutor::success();
        let executor_b = FixedJobExecutor::success();
        let without = DeterministicExecutionEngine::new(&graph, &executor_a, None)
            .unwrap()
            .execute_all()
            .unwrap();
        let observer = RecordingEngineObserver::new();
        let with = DeterministicExecutionEngine::new(&graph, &executor_b, Some(&observer))
            .unwrap()
            .execute_all()
            .unwrap();

        assert_eq!(without.trace, with.trace);
        assert_eq!(without.all_jobs_completed, with.all_jobs_completed);
    }
}
