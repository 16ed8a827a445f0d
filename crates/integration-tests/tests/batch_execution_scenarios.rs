//! End-to-end scenarios over the deterministic batch execution core.

use nx_batch_core::application::{
    build_execution_graph, create_session, derive_session_id, DeterministicExecutionEngine, ReplayDriver,
    RetryExecutor,
};
use nx_batch_core::domain::{plan_batch, BatchJobState, ExecutionOutcome, ParsedCommand};
use nx_batch_core::port::executor::mocks::{FailingAtCallExecutor, FixedJobExecutor};
use nx_batch_core::port::observer::mocks::RecordingEngineObserver;
use nx_batch_core::port::{InMemoryExecutionRecorder, InMemoryExecutionReplaySource, NullObserver};

fn two_valid_commands() -> Vec<ParsedCommand> {
    vec![
        ParsedCommand::new("nx convert --input test.mp4 --output test.mkv", vec![], true),
        ParsedCommand::new("nx audio --input test.wav --output test.flac", vec![], true),
    ]
}

#[test]
fn plan_idempotence() {
    let commands = two_valid_commands();
    let a = plan_batch(&commands);
    let b = plan_batch(&commands);
    assert_eq!(a, b);
    assert_eq!(a.jobs[0].state, BatchJobState::Planned);
    assert_eq!(a.jobs[1].state, BatchJobState::Planned);
}

#[test]
fn mixed_validity() {
    let commands = vec![
        ParsedCommand::new("nx convert --input a.mp4 --output a.mkv", vec![], true),
        ParsedCommand::new("not a recognized command", vec![], false),
        ParsedCommand::new("nx audio --input b.wav --output b.flac", vec![], true),
    ];

    let plan = plan_batch(&commands);
    assert_eq!(plan.jobs.len(), 3);
    assert_eq!(
        plan.jobs.iter().map(|j| j.state).collect::<Vec<_>>(),
        vec![BatchJobState::Planned, BatchJobState::Rejected, BatchJobState::Planned]
    );

    let session_id = derive_session_id(&commands);
    let session = create_session(session_id, &commands, &NullObserver);
    assert_eq!(session.job_count(), 2);
    assert_eq!(session.jobs()[0].command, commands[0].command);
    assert_eq!(session.jobs()[1].command, commands[2].command);
}

#[test]
fn full_successful_run() {
    let commands = two_valid_commands();
    let session_id = derive_session_id(&commands);
    let session = create_session(session_id, &commands, &NullObserver);
    let graph = build_execution_graph(&session, &NullObserver);

    let executor = FixedJobExecutor::success();
    let engine = DeterministicExecutionEngine::new(&graph, &executor, None).unwrap();
    let result = engine.execute_all().unwrap();

    assert!(result.all_jobs_completed);
    assert_eq!(result.jobs_executed, 2);
    assert_eq!(result.trace.len(), 4);
    let indices: Vec<u64> = result.trace.iter().map(|t| t.execution_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert_eq!(result.state_counts.planned, 0);
    assert_eq!(result.state_counts.running, 0);
    assert_eq!(result.state_counts.completed, 2);
    assert_eq!(result.state_counts.failed, 0);
}

#[test]
fn halt_on_failure() {
    let commands = vec![
        ParsedCommand::new("nx convert a", vec![], true),
        ParsedCommand::new("nx convert b", vec![], true),
        ParsedCommand::new("nx convert c", vec![], true),
    ];
    let session_id = derive_session_id(&commands);
    let session = create_session(session_id, &commands, &NullObserver);
    let graph = build_execution_graph(&session, &NullObserver);

    let executor = FailingAtCallExecutor::new(2);
    let observer = RecordingEngineObserver::new();
    let engine = DeterministicExecutionEngine::new(&graph, &executor, Some(&observer)).unwrap();
    let result = engine.execute_all().unwrap();

    assert!(!result.all_jobs_completed);
    assert_eq!(result.jobs_executed, 2);
    assert_eq!(result.trace.len(), 4);
    assert_eq!(result.state_counts.planned, 1);
    assert_eq!(result.state_counts.running, 0);
    assert_eq!(result.state_counts.completed, 1);
    assert_eq!(result.state_counts.failed, 1);
    assert_eq!(observer.events().len(), 1);
}

#[test]
fn replay_match() {
    let commands = vec![ParsedCommand::new("nx convert a", vec![], true)];
    let session_id = derive_session_id(&commands);
    let session = create_session(session_id.clone(), &commands, &NullObserver);
    let graph = build_execution_graph(&session, &NullObserver);
    let spec = graph.spec_for(&session.jobs()[0].job_id).unwrap().clone();

    let recorder = InMemoryExecutionRecorder::new();
    let live_executor = FixedJobExecutor::success();
    let live_retry = RetryExecutor::new(&live_executor, Some(&recorder));
    let attempt = nx_batch_core::domain::RetryAttempt::original(session.jobs()[0].job_id.clone());
    live_retry.execute_retry(&spec, &attempt);

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, ExecutionOutcome::success());

    let replay_source = InMemoryExecutionReplaySource::new(records);
    let replay_executor = FixedJobExecutor::success();
    let replay_recorder = nx_batch_core::port::NullExecutionRecorder;
    let replay_retry = RetryExecutor::new(&replay_executor, Some(&replay_recorder));
    let driver = ReplayDriver::new(replay_retry, session_id);

    let report = driver.replay_and_verify(&replay_source);
    assert!(report.deterministic_match);
    assert!(report.mismatches.is_empty());
}

#[test]
fn replay_divergence() {
    let commands = vec![ParsedCommand::new("nx convert a", vec![], true)];
    let session_id = derive_session_id(&commands);
    let session = create_session(session_id.clone(), &commands, &NullObserver);
    let graph = build_execution_graph(&session, &NullObserver);
    let spec = graph.spec_for(&session.jobs()[0].job_id).unwrap().clone();

    let recorder = InMemoryExecutionRecorder::new();
    let live_executor = FixedJobExecutor::success();
    let live_retry = RetryExecutor::new(&live_executor, Some(&recorder));
    let attempt = nx_batch_core::domain::RetryAttempt::original(session.jobs()[0].job_id.clone());
    live_retry.execute_retry(&spec, &attempt);

    let records = recorder.records();
    let replay_source = InMemoryExecutionReplaySource::new(records);

    // Replay deliberately uses a forced-failure executor to produce divergence.
    let replay_executor = FailingAtCallExecutor::new(1);
    let replay_recorder = nx_batch_core::port::NullExecutionRecorder;
    let replay_retry = RetryExecutor::new(&replay_executor, Some(&replay_recorder));
    let driver = ReplayDriver::new(replay_retry, session_id);

    let report = driver.replay_and_verify(&replay_source);
    assert!(!report.deterministic_match);
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].retry_index, 0);
    assert_eq!(report.mismatches[0].expected, ExecutionOutcome::success());
}

#[test]
fn persisted_records_round_trip_through_json() {
    let commands = vec![ParsedCommand::new("nx convert a", vec![], true)];
    let session_id = derive_session_id(&commands);
    let session = create_session(session_id, &commands, &NullObserver);
    let graph = build_execution_graph(&session, &NullObserver);
    let spec = graph.spec_for(&session.jobs()[0].job_id).unwrap().clone();

    let recorder = InMemoryExecutionRecorder::new();
    let executor = FixedJobExecutor::success();
    let retry_executor = RetryExecutor::new(&executor, Some(&recorder));
    let attempt = nx_batch_core::domain::RetryAttempt::original(session.jobs()[0].job_id.clone());
    retry_executor.execute_retry(&spec, &attempt);

    let records = recorder.records();
    let json = serde_json::to_string(&records).unwrap();
    let round_tripped: Vec<nx_batch_core::domain::ExecutionRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(records, round_tripped);
}
