// Application layer: orchestration use cases built on the domain and ports.

pub mod engine;
pub mod replay;
pub mod retry;
pub mod session_builder;
pub mod spec_synthesis;

pub use engine::{DeterministicExecutionEngine, ExecutionResult, ExecutionTraceRecord};
pub use replay::{group_by_intent_hash, ReplayDriver, ReplayMismatch, ReplayReport};
pub use retry::RetryExecutor;
pub use session_builder::{create_session, derive_session_id};
pub use spec_synthesis::{build_execution_graph, prepare_job_spec, prepare_job_specs};
