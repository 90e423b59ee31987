use inlay_store::{BlobStore, StoreError};

/// The caller's verdict on the orphan currently under review.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Keep the entry; advance without touching the store.
    Skip,
    /// Remove the entry from the store immediately, then advance.
    Delete,
}

/// Where the session stands after a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewState {
    /// More orphans await a decision.
    Reviewing {
        /// Orphans not yet decided (including the current one).
        remaining: usize,
    },
    /// Every orphan has been decided; the session is back to idle.
    Done,
}

/// Interactive orphan review — the one place a user-facing irreversible
/// action happens, modeled as an explicit state machine so any frontend
/// (modal, terminal prompt, test harness) can drive it.
///
/// ```text
///            begin(orphans)                       index == N
///   Idle ───────────────────▶ Reviewing(index) ──────────────▶ Idle
///    ▲   orphans empty: None      │    ▲
///    └────────────────────────────┘    │ Skip | Delete (advance)
///                                      └──────┘
/// ```
///
/// Every [`Decision::Delete`] commits through [`BlobStore::delete`] on
/// the spot rather than batching at session end. An interrupted session
/// therefore leaves the store consistent with exactly the decisions made
/// so far: deleted entries gone, skipped and unreviewed entries intact.
#[derive(Debug)]
pub struct ReviewSession {
    orphans: Vec<String>,
    index: usize,
}

impl ReviewSession {
    /// Start reviewing `orphans`.
    ///
    /// Returns `None` when the list is empty — there is nothing to
    /// review, so the caller stays idle without any notification.
    #[must_use]
    pub fn begin(orphans: Vec<String>) -> Option<Self> {
        if orphans.is_empty() {
            None
        } else {
            Some(Self { orphans, index: 0 })
        }
    }

    /// Identifier currently awaiting a decision, or `None` once done.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.orphans.get(self.index).map(String::as_str)
    }

    /// Orphans not yet decided, including the current one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.orphans.len().saturating_sub(self.index)
    }

    /// Whether the session has run through every orphan.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.index >= self.orphans.len()
    }

    /// Apply `decision` to the current orphan and advance.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the immediate delete. On error the
    /// session does *not* advance — the same orphan is still current, so
    /// the caller can retry or abort without skipping it accidentally.
    pub fn decide(
        &mut self,
        decision: Decision,
        store: &BlobStore,
    ) -> Result<ReviewState, StoreError> {
        if let Some(id) = self.current() {
            if decision == Decision::Delete {
                store.delete(id)?;
            }
            self.index += 1;
        }
        Ok(self.state())
    }

    fn state(&self) -> ReviewState {
        if self.is_done() {
            ReviewState::Done
        } else {
            ReviewState::Reviewing {
                remaining: self.remaining(),
            }
        }
    }
}
