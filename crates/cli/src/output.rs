//! Table/JSON rendering for run and replay reports.

use clap::ValueEnum;
use nx_batch_core::application::{ExecutionResult, ReplayReport};
use nx_batch_core::domain::{BatchPlan, StateCounts};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct PlanRow {
    job_id: String,
    command: String,
    state: String,
}

#[derive(Tabled)]
struct TraceRow {
    execution_index: u64,
    job_id: String,
    previous_state: String,
    new_state: String,
}

#[derive(Serialize)]
struct RunReport<'a> {
    plan: &'a BatchPlan,
    all_jobs_completed: bool,
    jobs_executed: u64,
    state_counts: StateCounts,
}

pub fn print_plan_and_result(format: OutputFormat, plan: &BatchPlan, result: &ExecutionResult) {
    match format {
        OutputFormat::Json => {
            let report = RunReport {
                plan,
                all_jobs_completed: result.all_jobs_completed,
                jobs_executed: result.jobs_executed,
                state_counts: result.state_counts,
            };
            println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
        }
        OutputFormat::Table => {
            let rows: Vec<PlanRow> = plan
                .jobs
                .iter()
                .map(|j| PlanRow {
                    job_id: j.job_id.to_hex()[..12].to_string(),
                    command: j.command.clone(),
                    state: format!("{:?}", j.state),
                })
                .collect();
            println!("{}", Table::new(rows));

            let trace_rows: Vec<TraceRow> = result
                .trace
                .iter()
                .map(|t| TraceRow {
                    execution_index: t.execution_index,
                    job_id: t.job_id.to_string(),
                    previous_state: format!("{:?}", t.previous_state),
                    new_state: format!("{:?}", t.new_state),
                })
                .collect();
            println!("{}", Table::new(trace_rows));

            println!(
                "all_jobs_completed={} jobs_executed={} completed={} failed={}",
                result.all_jobs_completed,
                result.jobs_executed,
                result.state_counts.completed,
                result.state_counts.failed
            );
        }
    }
}

pub fn print_replay_report(format: OutputFormat, report: &ReplayReport) {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Mismatch {
                retry_index: u32,
            }
            #[derive(Serialize)]
            struct Report {
                deterministic_match: bool,
                mismatch_count: usize,
            }
            let out = Report {
                deterministic_match: report.deterministic_match,
                mismatch_count: report.mismatches.len(),
            };
            println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
        OutputFormat::Table => {
            #[derive(Tabled)]
            struct MismatchRow {
                retry_index: u32,
                expected: String,
                actual: String,
            }
            let rows: Vec<MismatchRow> = report
                .mismatches
                .iter()
                .map(|m| MismatchRow {
                    retry_index: m.retry_index,
                    expected: format!("{:?}", m.expected),
                    actual: format!("{:?}", m.actual),
                })
                .collect();
            if rows.is_empty() {
                println!("deterministic_match=true");
            } else {
                println!("{}", Table::new(rows));
                println!("deterministic_match=false");
            }
        }
    }
}
