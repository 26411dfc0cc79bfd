//! Workflow runner: drives one run through fan-out, judging and the reflection loop.
//!
//! Flow: validate → fan out → branches (concurrent, joined) → judge pass → controller →
//!       either terminate or re-run the selected branches and judge again.

use std::path::PathBuf;

use futures::future::try_join_all;
use tracing::{debug, info, info_span, Instrument};

use crate::errors::AppError;
use crate::workflow::branch::run_branch;
use crate::workflow::collaborators::Collaborators;
use crate::workflow::controller::{next_state, ControllerState};
use crate::workflow::evaluator::judge_pass;
use crate::workflow::router::fan_out;
use crate::workflow::state::{DocumentKind, RunOutcome, RunRequest, WorkflowState};

/// Entry point of the orchestration core. Cheap to share; holds only collaborator handles.
#[derive(Clone)]
pub struct Workflow {
    collaborators: Collaborators,
}

impl Workflow {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// Runs one extraction request to completion.
    ///
    /// Validation happens before any collaborator is called. Any collaborator failure aborts
    /// the run; no partial outcome is returned.
    pub async fn run(&self, request: RunRequest) -> Result<RunOutcome, AppError> {
        request.validate()?;

        let state = WorkflowState::new(request);
        let span = info_span!("run", run_id = %state.run_id, mode = %state.mode);
        self.drive(state).instrument(span).await
    }

    async fn drive(&self, mut state: WorkflowState) -> Result<RunOutcome, AppError> {
        let mut controller = ControllerState::Initial;
        let mut targets = fan_out(state.mode);

        loop {
            info!("Dispatching branches {:?} ({:?})", targets, controller);
            self.run_branches(&mut state, &targets).await?;

            controller = ControllerState::AwaitingJudgment;
            debug!("Controller: {:?}", controller);
            let verdicts = judge_pass(&self.collaborators, &mut state).await?;

            controller = next_state(state.reflection_loop, &verdicts);
            info!(
                "Controller after pass {}: {:?}",
                state.reflection_loop, controller
            );

            if controller.is_terminal() {
                break;
            }
            targets = controller.retry_targets();
        }

        info!(
            "Run finished after {} judge pass(es), {} verdict(s) recorded",
            state.reflection_loop,
            state.judge_history.len()
        );
        Ok(state.into_outcome())
    }

    /// Runs `targets` concurrently and waits for all of them before writing results.
    async fn run_branches(
        &self,
        state: &mut WorkflowState,
        targets: &[DocumentKind],
    ) -> Result<(), AppError> {
        let mut jobs: Vec<(DocumentKind, PathBuf)> = Vec::with_capacity(targets.len());
        for &kind in targets {
            let locator = state.source_ref(kind).ok_or_else(|| {
                AppError::Validation(format!("no {kind} document for this run"))
            })?;
            jobs.push((kind, locator.to_path_buf()));
        }

        let outputs = try_join_all(
            jobs.iter()
                .map(|(kind, locator)| run_branch(&self.collaborators, *kind, locator)),
        )
        .await?;

        for output in outputs {
            state.apply_branch(output)?;
        }
        Ok(())
    }
}
