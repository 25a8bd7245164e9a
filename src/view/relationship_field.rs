use log::debug;
use parking_lot::Mutex;

use crate::error::BackendError;
use crate::logic::{LatestRequest, RelationshipSuggester};
use crate::model::{Candidate, RelationshipRole};
use crate::store::traits::Backend;

/// What became of one keystroke's suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// The result is now the displayed candidate list
    Applied(usize),
    /// A newer request was issued before this one answered; result dropped
    Superseded,
}

/// State of one mother/father/owner picker: the displayed candidates and
/// the current selection.
///
/// Keystrokes may each start a request without waiting for the previous
/// one. Only the most recently issued request may replace the candidate
/// list, whatever order the responses come back in.
pub struct RelationshipField<B> {
    role: RelationshipRole,
    suggester: RelationshipSuggester<B>,
    candidates: LatestRequest<Vec<Candidate>>,
    selection: Mutex<Option<Candidate>>,
}

impl<B: Backend> RelationshipField<B> {
    pub fn new(role: RelationshipRole, suggester: RelationshipSuggester<B>) -> Self {
        Self {
            role,
            suggester,
            candidates: LatestRequest::default(),
            selection: Mutex::new(None),
        }
    }

    pub fn role(&self) -> RelationshipRole {
        self.role
    }

    /// Handle the field's text changing to `text`.
    ///
    /// A failure is returned only if the failing request is still the
    /// latest; the displayed list is then left as it was.
    pub async fn input(&self, text: &str) -> Result<SuggestionOutcome, BackendError> {
        let tag = self.candidates.issue();
        let result = self.suggester.suggest(self.role, text).await;

        match result {
            Ok(found) => {
                let count = found.len();
                if self.candidates.apply(tag, found) {
                    Ok(SuggestionOutcome::Applied(count))
                } else {
                    debug!(
                        "Dropped stale {} suggestions for '{}' (request {})",
                        self.role.label(),
                        text,
                        tag.sequence()
                    );
                    Ok(SuggestionOutcome::Superseded)
                }
            }
            Err(err) if self.candidates.is_current(tag) => Err(err),
            Err(err) => {
                debug!("Ignored failure of superseded request {}: {}", tag.sequence(), err);
                Ok(SuggestionOutcome::Superseded)
            }
        }
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.candidates.snapshot()
    }

    /// Select the displayed candidate at `index`
    pub fn choose(&self, index: usize) -> Option<Candidate> {
        let chosen = self.candidates.with_value(|list| list.get(index).cloned())?;
        *self.selection.lock() = Some(chosen.clone());
        Some(chosen)
    }

    pub fn set_selection(&self, selection: Option<Candidate>) {
        *self.selection.lock() = selection;
    }

    pub fn selection(&self) -> Option<Candidate> {
        self.selection.lock().clone()
    }

    /// Text shown in the input for the current selection
    pub fn display_text(&self) -> String {
        self.selection
            .lock()
            .as_ref()
            .map(Candidate::display_name)
            .unwrap_or_default()
    }
}
