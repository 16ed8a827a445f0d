// Port layer - interfaces for external collaborators.
//
// The core depends only on these traits, never on a concrete media backend,
// database, or telemetry sink.

pub mod executor;
pub mod observer;
pub mod recorder;
pub mod replay_source;

pub use executor::JobExecutor;
pub use observer::{BoundaryObserver, EngineObserver, NullObserver};
pub use recorder::{ExecutionRecorder, InMemoryExecutionRecorder, NullExecutionRecorder};
pub use replay_source::{ExecutionReplaySource, InMemoryExecutionReplaySource};
