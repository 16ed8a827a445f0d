// Session construction - turns a ParsedCommand stream into a Session.

use crate::domain::{ParsedCommand, Session, SessionId, SessionJobDescriptor, SessionJobId};
use crate::port::BoundaryObserver;
use tracing::debug;

/// Derive a session id deterministically from the full command list, when
/// the caller does not supply one externally: canonical concatenation
/// `cmd0|args0|...|cmdN|argsN`, hashed and presented textually.
pub fn derive_session_id(commands: &[ParsedCommand]) -> SessionId {
    let mut canonical = String::new();
    for cmd in commands {
        canonical.push_str(&cmd.command);
        canonical.push('|');
        canonical.push_str(&cmd.arguments.join(","));
        canonical.push('|');
    }
    SessionId::new(crate::domain::sha256(canonical.as_bytes()).to_hex())
}

/// Build a `Session` from parsed commands: one descriptor per `valid`
/// command, in input order, with `job_value = "job-" + zero-padded-3-digit
/// index` counted among surviving commands starting at 1. Invalid commands
/// are dropped entirely (they still appear, as `Rejected`, in the parallel
/// `BatchPlan` produced by `plan_batch`).
pub fn create_session(
    session_id: SessionId,
    commands: &[ParsedCommand],
    observer: &dyn BoundaryObserver,
) -> Session {
    let mut jobs = Vec::new();
    let mut survivor_index: u32 = 0;

    for cmd in commands {
        if !cmd.valid {
            continue;
        }
        survivor_index += 1;
        let job_value = format!("job-{:03}", survivor_index);
        let job_id = SessionJobId::initial(session_id.clone(), job_value);
        jobs.push(SessionJobDescriptor {
            job_id,
            command: cmd.command.clone(),
            arguments: cmd.arguments.clone(),
            dependencies: Vec::new(),
        });
    }

    debug!(session_id = %session_id, job_count = jobs.len(), "session planned");
    observer.observe_session_creation(&session_id, jobs.len() as u64);

    Session::new(session_id, jobs)
}
