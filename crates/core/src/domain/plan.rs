// Planning types: the external ParsedCommand stream and the BatchPlan
// produced from it.

use super::identity::JobID;
use serde::{Deserialize, Serialize};

/// A single parsed command, produced by an external parser (out of scope here).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub command: String,
    pub arguments: Vec<String>,
    pub valid: bool,
}

impl ParsedCommand {
    pub fn new(command: impl Into<String>, arguments: Vec<String>, valid: bool) -> Self {
        Self {
            command: command.into(),
            arguments,
            valid,
        }
    }
}

/// Planning-time disposition of a single input command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchJobState {
    Queued,
    Planned,
    Rejected,
}

/// One entry of a `BatchPlan`, one per input command in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJobSummary {
    pub job_id: JobID,
    pub command: String,
    pub state: BatchJobState,
}

/// Stable batch plan: one entry per input command, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPlan {
    pub jobs: Vec<BatchJobSummary>,
}

/// Plan a batch of parsed commands.
///
/// `job_id` is derived from `index || command`, independent of the Session's
/// `SessionJobId` scheme (spec open question (a): the two id schemes are kept
/// deliberately distinct). Invalid commands are marked `Rejected` at their
/// original index but never excluded from the plan; valid commands are
/// marked `Planned`.
pub fn plan_batch(commands: &[ParsedCommand]) -> BatchPlan {
    let jobs = commands
        .iter()
        .enumerate()
        .map(|(index, cmd)| {
            let content = format!("{}|{}", index, cmd.command);
            BatchJobSummary {
                job_id: JobID::from_content(content),
                command: cmd.command.clone(),
                state: if cmd.valid {
                    BatchJobState::Planned
                } else {
                    BatchJobState::Rejected
                },
            }
        })
        .collect();
    BatchPlan { jobs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmds() -> Vec<ParsedCommand> {
        vec![
            ParsedCommand::new("nx convert --input test.mp4 --output test.mkv", vec![], true),
            ParsedCommand::new("nx audio --input test.wav --output test.flac", vec![], true),
        ]
    }

    #[test]
    fn plan_batch_is_idempotent() {
        let commands = cmds();
        assert_eq!(plan_batch(&commands), plan_batch(&commands));
    }

    #[test]
    fn mixed_validity_marks_rejected_at_original_index() {
        let commands = vec![
            ParsedCommand::new("nx convert a b", vec![], true),
            ParsedCommand::new("garbage", vec![], false),
            ParsedCommand::new("nx audio c d", vec![], true),
        ];
        let plan = plan_batch(&commands);
        assert_eq!(plan.jobs.len(), 3);
        assert_eq!(plan.jobs[0].state, BatchJobState::Planned);
        assert_eq!(plan.jobs[1].state, BatchJobState::Rejected);
        assert_eq!(plan.jobs[2].state, BatchJobState::Planned);
    }
}
