// Orchestration core: fan-out into extraction branches, a shared judge pass, and a bounded
// reflection loop driven by judge verdicts.
// Collaborators (OCR, extraction, judge) are injected through `Collaborators`.

pub mod branch;
pub mod collaborators;
pub mod controller;
pub mod evaluator;
pub mod history;
pub mod router;
pub mod runner;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use collaborators::Collaborators;
pub use controller::{next_state, ControllerState, MAX_JUDGE_PASSES};
pub use history::JudgeHistory;
pub use router::fan_out;
pub use runner::Workflow;
pub use state::{DocumentKind, Grade, Mode, RunOutcome, RunRequest, Verdict};
