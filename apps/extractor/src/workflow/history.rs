//! Result accumulator: the append-only judge history and its last-verdict-wins view.
//!
//! The ordered history is the source of truth. The per-source view is derived on demand and
//! never stored, so the two cannot drift apart.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflow::state::{DocumentKind, Verdict};

/// Every verdict of a run in insertion order. Nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JudgeHistory {
    entries: Vec<Verdict>,
}

impl JudgeHistory {
    /// Appends the verdicts of one judge pass, preserving their order.
    pub fn append_pass(&mut self, verdicts: impl IntoIterator<Item = Verdict>) {
        self.entries.extend(verdicts);
    }

    pub fn entries(&self) -> &[Verdict] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display view: each source mapped to its most recent verdict.
    pub fn final_verdicts(&self) -> BTreeMap<DocumentKind, Verdict> {
        let mut view = BTreeMap::new();
        for verdict in &self.entries {
            view.insert(verdict.source, verdict.clone());
        }
        view
    }
}
