use std::sync::Arc;

use log::{debug, warn};

use crate::error::BackendError;
use crate::model::{Id, PedigreeNode};
use crate::store::traits::HorseStore;

/// Fetches depth-bounded ancestry trees.
///
/// Every call is an independent read: no caching, no retries. A transport
/// failure is returned to the caller as is.
pub struct PedigreeFetcher<B> {
    backend: Arc<B>,
}

impl<B> Clone for PedigreeFetcher<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: HorseStore> PedigreeFetcher<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Fetch the pedigree of `horse_id`. With `max_generations = None` no
    /// bound is sent and the backend default applies.
    ///
    /// The returned tree never holds a path longer than `max_generations`
    /// edges and is fully collapsed.
    pub async fn fetch(
        &self,
        horse_id: Id,
        max_generations: Option<u32>,
    ) -> Result<PedigreeNode, BackendError> {
        debug!("Fetching pedigree of horse {} ({:?} generations)", horse_id, max_generations);
        let mut tree = self.backend.get_pedigree(horse_id, max_generations).await?;

        if let Some(limit) = max_generations {
            if tree.truncate(limit) {
                warn!(
                    "Backend returned ancestors of horse {} beyond {} generations; pruned",
                    horse_id, limit
                );
            }
        }
        Ok(tree)
    }
}
