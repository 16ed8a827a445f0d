// Observer ports.
//
// Two distinct observer roles: an engine observer notified of halt/completion
// during `execute_all`, and a narrow boundary observer for telemetry
// correlation at session/graph construction. Both are one-way: callbacks
// MUST NOT mutate engine state, block, or influence which transitions occur
// next, and MUST NOT retain references to Session or ExecutionGraph objects
// beyond the callback.

use crate::domain::{SessionId, SessionJobId};

/// Notified by the execution engine of run-level events. Never influences
/// control flow; whether one is attached must not change the trace or the
/// final state.
pub trait EngineObserver {
    /// The run halted because `job_id` failed at the transition recorded as
    /// `execution_index`.
    fn on_halt(&self, job_id: &SessionJobId, execution_index: u64) {
        let _ = (job_id, execution_index);
    }

    /// The run completed without halting.
    fn on_completion(&self, session_id: &SessionId, total_jobs: u64, completed_count: u64) {
        let _ = (session_id, total_jobs, completed_count);
    }
}

/// Read-only sink for planning-time telemetry correlation events.
pub trait BoundaryObserver {
    fn observe_session_creation(&self, session_id: &SessionId, job_count: u64) {
        let _ = (session_id, job_count);
    }

    fn observe_execution_graph_creation(&self, session_id: &SessionId, node_count: u64) {
        let _ = (session_id, node_count);
    }

    fn prepare_telemetry_correlation(&self, session_id: &SessionId) {
        let _ = session_id;
    }
}

/// An observer that does nothing; used wherever no observer is attached.
pub struct NullObserver;

impl EngineObserver for NullObserver {}
impl BoundaryObserver for NullObserver {}

pub mod mocks {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ObservedEvent {
        Halt { job_id: SessionJobId, execution_index: u64 },
        Completion { session_id: SessionId, total_jobs: u64, completed_count: u64 },
    }

    /// Records every callback it receives, in call order, for assertion in
    /// tests. Deliberately non-influential: it only appends to its own log.
    #[derive(Default)]
    pub struct RecordingEngineObserver {
        events: RefCell<Vec<ObservedEvent>>,
    }

    impl RecordingEngineObserver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<ObservedEvent> {
            self.events.borrow().clone()
        }
    }

    impl EngineObserver for RecordingEngineObserver {
        fn on_halt(&self, job_id: &SessionJobId, execution_index: u64) {
            self.events.borrow_mut().push(ObservedEvent::Halt {
                job_id: job_id.clone(),
                execution_index,
            });
        }

        fn on_completion(&self, session_id: &SessionId, total_jobs: u64, completed_count: u64) {
            self.events.borrow_mut().push(ObservedEvent::Completion {
                session_id: session_id.clone(),
                total_jobs,
                completed_count,
            });
        }
    }
}
