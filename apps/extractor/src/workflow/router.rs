//! Fan-out router: which branches run for a mode.

use crate::workflow::state::{DocumentKind, Mode};

/// Branches to dispatch for `mode`. Order carries no meaning for execution; branches run
/// concurrently. Results are always listed resume first.
pub fn fan_out(mode: Mode) -> Vec<DocumentKind> {
    match mode {
        Mode::ResumeOnly => vec![DocumentKind::Resume],
        Mode::JdOnly => vec![DocumentKind::Jd],
        Mode::Both => vec![DocumentKind::Resume, DocumentKind::Jd],
    }
}
