// ExecutionState machine and StateStore.
//
// StateStore owns one ExecutionJobState per graph node, in graph order, and
// enforces transition legality on every update.

use super::error::DomainError;
use super::result::JobExecutionResult;
use super::session::SessionJobId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    Planned,
    Running,
    Completed,
    Failed,
}

impl ExecutionState {
    fn is_legal_transition(from: ExecutionState, to: ExecutionState) -> bool {
        matches!(
            (from, to),
            (ExecutionState::Planned, ExecutionState::Running)
                | (ExecutionState::Running, ExecutionState::Completed)
                | (ExecutionState::Running, ExecutionState::Failed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ExecutionState::Completed | ExecutionState::Failed)
    }
}

/// Per-job runtime state. `execution_result` is empty in `Planned`/`Running`,
/// present in `Completed`/`Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionJobState {
    pub job_id: SessionJobId,
    pub current_state: ExecutionState,
    pub execution_result: Option<JobExecutionResult>,
}

impl ExecutionJobState {
    pub fn planned(job_id: SessionJobId) -> Self {
        Self {
            job_id,
            current_state: ExecutionState::Planned,
            execution_result: None,
        }
    }

    pub fn to_running(&self) -> Result<Self, DomainError> {
        self.transition(ExecutionState::Running, None)
    }

    pub fn to_completed(&self, result: JobExecutionResult) -> Result<Self, DomainError> {
        self.transition(ExecutionState::Completed, Some(result))
    }

    pub fn to_failed(&self, result: JobExecutionResult) -> Result<Self, DomainError> {
        self.transition(ExecutionState::Failed, Some(result))
    }

    fn transition(
        &self,
        to: ExecutionState,
        result: Option<JobExecutionResult>,
    ) -> Result<Self, DomainError> {
        if !ExecutionState::is_legal_transition(self.current_state, to) {
            return Err(DomainError::InvalidTransition {
                from: self.current_state,
                to,
            });
        }
        Ok(Self {
            job_id: self.job_id.clone(),
            current_state: to,
            execution_result: result,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.current_state.is_terminal()
    }
}

/// Aggregate counters per state, in declaration order `(planned, running, completed, failed)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub planned: u64,
    pub running: u64,
    pub completed: u64,
    pub failed: u64,
}

/// Owns one `ExecutionJobState` per graph node, in graph node order.
/// Iteration order is stable across calls and platforms.
#[derive(Debug, Clone)]
pub struct StateStore {
    states: Vec<ExecutionJobState>,
}

impl StateStore {
    /// Initialize one entry per node, in the given order, all `Planned`.
    pub fn new(node_ids: impl IntoIterator<Item = SessionJobId>) -> Self {
        let states = node_ids.into_iter().map(ExecutionJobState::planned).collect();
        Self { states }
    }

    fn index_of(&self, job_id: &SessionJobId) -> Option<usize> {
        self.states.iter().position(|s| &s.job_id == job_id)
    }

    pub fn get(&self, job_id: &SessionJobId) -> Result<&ExecutionJobState, DomainError> {
        self.index_of(job_id)
            .map(|i| &self.states[i])
            .ok_or_else(|| DomainError::NotFound(job_id.clone()))
    }

    /// Validate that `(current.current_state -> new_state.current_state)` is a
    /// legal transition, then replace atomically. Leaves state unchanged on error.
    pub fn update(&mut self, new_state: ExecutionJobState) -> Result<(), DomainError> {
        let index = self
            .index_of(&new_state.job_id)
            .ok_or_else(|| DomainError::NotFound(new_state.job_id.clone()))?;
        let current = &self.states[index];
        if !ExecutionState::is_legal_transition(current.current_state, new_state.current_state) {
            return Err(DomainError::InvalidTransition {
                from: current.current_state,
                to: new_state.current_state,
            });
        }
        self.states[index] = new_state;
        Ok(())
    }

    /// Snapshot of all states, in node order.
    pub fn all_states(&self) -> Vec<ExecutionJobState> {
        self.states.clone()
    }

    pub fn state_counts(&self) -> StateCounts {
        let mut counts = StateCounts {
            planned: 0,
            running: 0,
            completed: 0,
            failed: 0,
        };
        for s in &self.states {
            match s.current_state {
                ExecutionState::Planned => counts.planned += 1,
                ExecutionState::Running => counts.running += 1,
                ExecutionState::Completed => counts.completed += 1,
                ExecutionState::Failed => counts.failed += 1,
            }
        }
        counts
    }

    pub fn total_count(&self) -> usize {
        self.states.len()
    }

    pub fn all_terminal(&self) -> bool {
        self.states.iter().all(|s| s.is_terminal())
    }
}
