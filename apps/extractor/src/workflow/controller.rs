//! Retry controller: the reflection-loop state machine.
//!
//! `next_state` is pure: it looks only at the pass counter and the verdicts produced by the
//! pass that just finished. Earlier passes never influence the decision.
//!
//! Rules, applied after every judge pass:
//! 1. `reflection_loop > 1` → `Terminated`. At most one retry, whatever the verdicts.
//! 2. One verdict this pass and it is FAIL → retry that source only.
//! 3. Two verdicts this pass and any is FAIL → `RetryBoth`. Both branches re-run even if
//!    one of them passed.
//! 4. Otherwise → `Terminated`.

use serde::Serialize;

use crate::workflow::state::{DocumentKind, Grade, Verdict};

/// Upper bound on judge passes per run: the initial pass plus one retry.
pub const MAX_JUDGE_PASSES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerState {
    Initial,
    AwaitingJudgment,
    RetryResume,
    RetryJd,
    RetryBoth,
    Terminated,
}

impl ControllerState {
    /// Branches to re-run from the fan-out point. Empty for non-retry states.
    pub fn retry_targets(self) -> Vec<DocumentKind> {
        match self {
            ControllerState::RetryResume => vec![DocumentKind::Resume],
            ControllerState::RetryJd => vec![DocumentKind::Jd],
            ControllerState::RetryBoth => vec![DocumentKind::Resume, DocumentKind::Jd],
            ControllerState::Initial
            | ControllerState::AwaitingJudgment
            | ControllerState::Terminated => Vec::new(),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ControllerState::Terminated
    }

    fn retry_single(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Resume => ControllerState::RetryResume,
            DocumentKind::Jd => ControllerState::RetryJd,
        }
    }
}

/// Decides what follows a judge pass.
///
/// `reflection_loop` is the counter after the pass incremented it; `latest_pass` holds only
/// the verdicts that pass produced.
pub fn next_state(reflection_loop: u32, latest_pass: &[Verdict]) -> ControllerState {
    if reflection_loop >= MAX_JUDGE_PASSES {
        return ControllerState::Terminated;
    }

    let any_failed = latest_pass.iter().any(|v| v.grade == Grade::Fail);
    match latest_pass {
        [only] if only.grade == Grade::Fail => ControllerState::retry_single(only.source),
        [_, _, ..] if any_failed => ControllerState::RetryBoth,
        _ => ControllerState::Terminated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(source: DocumentKind, grade: Grade) -> Verdict {
        Verdict {
            source,
            grade,
            summary: String::new(),
        }
    }

    #[test]
    fn test_single_pass_terminates() {
        let pass = [verdict(DocumentKind::Resume, Grade::Pass)];
        assert_eq!(next_state(1, &pass), ControllerState::Terminated);
    }

    #[test]
    fn test_single_fail_retries_that_source_only() {
        let resume = [verdict(DocumentKind::Resume, Grade::Fail)];
        assert_eq!(next_state(1, &resume), ControllerState::RetryResume);

        let jd = [verdict(DocumentKind::Jd, Grade::Fail)];
        assert_eq!(next_state(1, &jd), ControllerState::RetryJd);
        assert_eq!(
            ControllerState::RetryJd.retry_targets(),
            vec![DocumentKind::Jd]
        );
    }

    #[test]
    fn test_one_fail_among_two_retries_both() {
        let pass = [
            verdict(DocumentKind::Resume, Grade::Pass),
            verdict(DocumentKind::Jd, Grade::Fail),
        ];
        let next = next_state(1, &pass);
        assert_eq!(next, ControllerState::RetryBoth);
        assert_eq!(
            next.retry_targets(),
            vec![DocumentKind::Resume, DocumentKind::Jd]
        );
    }

    #[test]
    fn test_two_passes_terminate() {
        let pass = [
            verdict(DocumentKind::Resume, Grade::Pass),
            verdict(DocumentKind::Jd, Grade::Pass),
        ];
        assert_eq!(next_state(1, &pass), ControllerState::Terminated);
    }

    #[test]
    fn test_second_pass_always_terminates() {
        let fail = [verdict(DocumentKind::Resume, Grade::Fail)];
        assert_eq!(next_state(2, &fail), ControllerState::Terminated);

        let both_fail = [
            verdict(DocumentKind::Resume, Grade::Fail),
            verdict(DocumentKind::Jd, Grade::Fail),
        ];
        assert_eq!(next_state(2, &both_fail), ControllerState::Terminated);
        assert_eq!(next_state(3, &both_fail), ControllerState::Terminated);
    }

    #[test]
    fn test_empty_pass_terminates() {
        assert_eq!(next_state(1, &[]), ControllerState::Terminated);
    }

    #[test]
    fn test_non_retry_states_have_no_targets() {
        for state in [
            ControllerState::Initial,
            ControllerState::AwaitingJudgment,
            ControllerState::Terminated,
        ] {
            assert!(state.retry_targets().is_empty());
        }
        assert!(ControllerState::Terminated.is_terminal());
        assert!(!ControllerState::RetryBoth.is_terminal());
    }
}
