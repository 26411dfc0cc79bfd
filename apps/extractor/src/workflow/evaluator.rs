//! Judge evaluator: one judge pass over every active source.
//!
//! A pass bumps `reflection_loop` exactly once, however many sources it judges. Judgments
//! inside a pass run concurrently; their verdicts are appended resume first, then jd, and
//! only after all of them have completed.

use futures::future::try_join_all;
use tracing::{error, info};

use crate::errors::AppError;
use crate::workflow::collaborators::Collaborators;
use crate::workflow::router::fan_out;
use crate::workflow::state::{DocumentKind, Verdict, WorkflowState};

/// Runs one judge pass and returns the verdicts it produced (already appended to history).
pub async fn judge_pass(
    collaborators: &Collaborators,
    state: &mut WorkflowState,
) -> Result<Vec<Verdict>, AppError> {
    let mut inputs = Vec::new();
    for kind in fan_out(state.mode) {
        let text = state.text(kind).ok_or_else(|| missing(kind, "extracted text"))?;
        let record_json = state
            .result_json(kind)?
            .ok_or_else(|| missing(kind, "structured result"))?;
        inputs.push((kind, text.to_string(), record_json));
    }

    state.reflection_loop += 1;
    info!(
        "Judge pass {} over {} source(s)",
        state.reflection_loop,
        inputs.len()
    );

    let verdicts = try_join_all(
        inputs
            .iter()
            .map(|(kind, text, record_json)| judge_one(collaborators, *kind, text, record_json)),
    )
    .await?;

    for verdict in &verdicts {
        info!("[{}] verdict {:?}: {}", verdict.source, verdict.grade, verdict.summary);
    }
    state.judge_history.append_pass(verdicts.iter().cloned());

    Ok(verdicts)
}

async fn judge_one(
    collaborators: &Collaborators,
    kind: DocumentKind,
    text: &str,
    record_json: &str,
) -> Result<Verdict, AppError> {
    let judgement = collaborators
        .bounded(collaborators.judge.judge(text, record_json))
        .await
        .map_err(|e| {
            error!("[{kind}] judge unavailable: {e:#}");
            AppError::JudgeUnavailable {
                kind,
                message: format!("{e:#}"),
            }
        })?;

    Ok(Verdict {
        source: kind,
        grade: judgement.grade,
        summary: judgement.summary,
    })
}

fn missing(kind: DocumentKind, what: &str) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "judge pass reached before the {kind} branch produced its {what}"
    ))
}
