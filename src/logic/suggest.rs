use std::sync::Arc;

use log::debug;

use crate::error::BackendError;
use crate::model::{Candidate, HorseSearch, OwnerSearch, RelationshipQuery, RelationshipRole};
use crate::store::traits::Backend;

/// Typeahead source for the mother, father and owner pickers.
///
/// Stateless: ordering between concurrent calls is the caller's concern
/// (see [`RelationshipField`](crate::view::RelationshipField)).
pub struct RelationshipSuggester<B> {
    backend: Arc<B>,
}

impl<B> Clone for RelationshipSuggester<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: Backend> RelationshipSuggester<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// At most [`SUGGESTION_LIMIT`](crate::model::SUGGESTION_LIMIT)
    /// candidates whose name contains `text`.
    ///
    /// Blank input resolves to nothing without contacting the backend.
    pub async fn suggest(
        &self,
        role: RelationshipRole,
        text: &str,
    ) -> Result<Vec<Candidate>, BackendError> {
        let query = RelationshipQuery::new(role, text);
        if query.is_blank() {
            return Ok(Vec::new());
        }

        let candidates: Vec<Candidate> = match role.sex_filter() {
            Some(sex) => {
                let search = HorseSearch::by_name(&query.text).with_sex(sex);
                self.backend
                    .search_horses(&search)
                    .await?
                    .into_iter()
                    .take(query.limit)
                    .map(|horse| Candidate::Horse(horse.to_ref()))
                    .collect()
            }
            None => {
                let search = OwnerSearch::by_name(&query.text, query.limit);
                self.backend
                    .search_owners(&search)
                    .await?
                    .into_iter()
                    .take(query.limit)
                    .map(Candidate::Owner)
                    .collect()
            }
        };

        debug!(
            "{} suggestions for {} '{}'",
            candidates.len(),
            role.label(),
            query.text
        );
        Ok(candidates)
    }
}
