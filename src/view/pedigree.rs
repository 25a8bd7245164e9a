use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::{BackendError, PedigreeViewError};
use crate::logic::{format_error, PedigreeFetcher};
use crate::model::{HorseRef, Id, Lineage, PedigreeNode};
use crate::store::traits::HorseStore;
use crate::view::capabilities::{Navigator, NotifyOptions, Notifier};
use crate::view::route::RouteContext;

pub const FETCH_FAILED_TITLE: &str = "Could Not Fetch Pedigree";
pub const DELETE_FAILED_TITLE: &str = "Could Not Delete Horse";
pub const INVALID_LIMIT_TITLE: &str = "Invalid Generation Limit";
pub const PRECONDITION_TITLE: &str = "Error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PedigreeViewState {
    Uninitialized,
    /// A horse is known but no generation limit was given; nothing is fetched
    AwaitingGenerationInput,
    Loading,
    Loaded,
    Error(PedigreeViewError),
}

/// Drives the pedigree screen of one horse.
///
/// The controller owns the displayed tree exclusively. Every operation that
/// talks to the backend takes `&mut self`, so at most one is in flight; a
/// caller that drops such a future before it resolves leaves the tree as it
/// was.
pub struct PedigreeViewController<B, N, R> {
    backend: Arc<B>,
    fetcher: PedigreeFetcher<B>,
    notifier: N,
    navigator: R,
    state: PedigreeViewState,
    horse_id: Option<Id>,
    max_generations: Option<u32>,
    tree: Option<PedigreeNode>,
    staged: Option<HorseRef>,
}

impl<B, N, R> PedigreeViewController<B, N, R>
where
    B: HorseStore,
    N: Notifier,
    R: Navigator,
{
    pub fn new(backend: Arc<B>, notifier: N, navigator: R) -> Self {
        Self {
            fetcher: PedigreeFetcher::new(Arc::clone(&backend)),
            backend,
            notifier,
            navigator,
            state: PedigreeViewState::Uninitialized,
            horse_id: None,
            max_generations: None,
            tree: None,
            staged: None,
        }
    }

    pub fn state(&self) -> &PedigreeViewState {
        &self.state
    }

    pub fn tree(&self) -> Option<&PedigreeNode> {
        self.tree.as_ref()
    }

    pub fn horse_id(&self) -> Option<Id> {
        self.horse_id
    }

    pub fn max_generations(&self) -> Option<u32> {
        self.max_generations
    }

    /// Enter the screen for the route `/horses/pedigree/{id}?maxGenerations=N`.
    pub async fn enter(&mut self, route: &RouteContext) {
        self.staged = None;

        let horse_id = match route.param("id").map(str::trim) {
            None | Some("") => {
                self.notifier.notify(
                    "No horse id provided. Redirecting to the horse list.",
                    PRECONDITION_TITLE,
                    NotifyOptions::error(),
                );
                self.reset();
                self.state = PedigreeViewState::Error(PedigreeViewError::MissingHorseId);
                self.navigator.navigate_to("/horses", &[]);
                return;
            }
            Some(raw) => match raw.parse::<Id>() {
                Ok(id) => id,
                Err(_) => {
                    let err = PedigreeViewError::InvalidHorseId(raw.to_string());
                    self.notifier
                        .notify(&format!("{}.", err), PRECONDITION_TITLE, NotifyOptions::error());
                    self.reset();
                    self.state = PedigreeViewState::Error(err);
                    return;
                }
            },
        };

        // Every navigation starts from an empty model
        self.tree = None;
        self.horse_id = Some(horse_id);

        match route.query("maxGenerations") {
            None => {
                debug!("No generation limit for horse {}; awaiting input", horse_id);
                self.max_generations = None;
                self.state = PedigreeViewState::AwaitingGenerationInput;
            }
            Some(raw) => match parse_generations(raw) {
                Some(limit) => {
                    self.max_generations = Some(limit);
                    self.load().await;
                }
                None => {
                    self.report_invalid_limit(raw);
                    self.max_generations = None;
                    self.state = PedigreeViewState::AwaitingGenerationInput;
                }
            },
        }
    }

    /// Generation limit typed in by the user.
    ///
    /// Blank input leaves the screen waiting. Anything but a non-negative
    /// whole number is reported and changes nothing.
    pub async fn submit_generations(&mut self, input: &str) {
        let input = input.trim();
        if self.horse_id.is_none() {
            warn!("Generation limit submitted without a horse; ignored");
            return;
        }
        if input.is_empty() {
            if self.tree.is_none() {
                self.state = PedigreeViewState::AwaitingGenerationInput;
            }
            return;
        }
        match parse_generations(input) {
            Some(limit) => {
                self.max_generations = Some(limit);
                self.load().await;
            }
            None => self.report_invalid_limit(input),
        }
    }

    /// Fetch again with the current horse and limit.
    pub async fn reload(&mut self) {
        if self.horse_id.is_some() && self.max_generations.is_some() {
            self.load().await;
        }
    }

    /// Flip the expansion of the node at `path` from the root; returns the
    /// new flag, `None` if no node is there.
    pub fn toggle_node(&mut self, path: &[Lineage]) -> Option<bool> {
        self.tree.as_mut()?.toggle_expanded(path)
    }

    /// Stage `horse` for deletion; the tree is not touched.
    pub fn request_delete(&mut self, horse: HorseRef) {
        self.staged = Some(horse);
    }

    pub fn cancel_delete(&mut self) {
        self.staged = None;
    }

    pub fn staged_for_deletion(&self) -> Option<&HorseRef> {
        self.staged.as_ref()
    }

    /// Delete `horse` in the backend, then fetch the whole tree again.
    ///
    /// Removing one horse may relink ancestors elsewhere, so the displayed
    /// tree is only ever replaced by a fresh fetch for the same root.
    pub async fn confirm_delete(&mut self, horse: HorseRef) {
        self.staged = None;

        match self.backend.delete_horse(horse.id).await {
            Ok(()) => {
                info!("Deleted horse {} ({}) from pedigree view", horse.id, horse.name);
                self.notifier.notify(
                    &format!("Deleting horse: {}.", horse.name),
                    "",
                    NotifyOptions::success(),
                );
                self.reload().await;
            }
            Err(err) => {
                warn!("Deleting horse {} failed: {}", horse.id, err);
                self.notifier.notify(
                    &format_error(&err),
                    DELETE_FAILED_TITLE,
                    NotifyOptions::detailed_error(),
                );
            }
        }
    }

    /// Navigate to the detail screen of the root horse.
    pub fn go_back(&self) {
        let target = self
            .tree
            .as_ref()
            .map(|tree| tree.id)
            .or(self.horse_id);
        match target {
            Some(id) => self
                .navigator
                .navigate_to(&format!("/horses/detail/{}", id), &[]),
            None => self.navigator.navigate_to("/horses", &[]),
        }
    }

    /// The screen is no longer displayed.
    pub fn leave(&mut self) {
        self.reset();
    }

    async fn load(&mut self) {
        let Some(horse_id) = self.horse_id else {
            return;
        };
        self.state = PedigreeViewState::Loading;

        match self.fetcher.fetch(horse_id, self.max_generations).await {
            Ok(mut tree) => {
                tree.initialize_expanded();
                debug!(
                    "Pedigree of horse {} loaded with {} nodes",
                    horse_id,
                    tree.node_count()
                );
                self.tree = Some(tree);
                self.state = PedigreeViewState::Loaded;
            }
            Err(err) => self.fail_load(horse_id, err),
        }
    }

    fn fail_load(&mut self, horse_id: Id, err: BackendError) {
        warn!("Fetching pedigree of horse {} failed: {}", horse_id, err);
        self.notifier
            .notify(&format_error(&err), FETCH_FAILED_TITLE, NotifyOptions::detailed_error());
        self.state = PedigreeViewState::Error(err.into());
    }

    fn report_invalid_limit(&self, raw: &str) {
        self.notifier.notify(
            &format!(
                "Generation limit must be a non-negative whole number, got '{}'.",
                raw
            ),
            INVALID_LIMIT_TITLE,
            NotifyOptions::error(),
        );
    }

    fn reset(&mut self) {
        self.state = PedigreeViewState::Uninitialized;
        self.horse_id = None;
        self.max_generations = None;
        self.tree = None;
        self.staged = None;
    }
}

fn parse_generations(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sex;
    use crate::testing::{sample_pedigree, RecordingNavigator, RecordingNotifier, RecordingStore};
    use crate::view::capabilities::NotifyLevel;

    type Controller =
        PedigreeViewController<RecordingStore, Arc<RecordingNotifier>, Arc<RecordingNavigator>>;

    fn controller(
        store: Arc<RecordingStore>,
    ) -> (Controller, Arc<RecordingNotifier>, Arc<RecordingNavigator>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let controller = PedigreeViewController::new(store, notifier.clone(), navigator.clone());
        (controller, notifier, navigator)
    }

    fn route(id: &str, generations: Option<&str>) -> RouteContext {
        let route = RouteContext::new().with_param("id", id);
        match generations {
            Some(value) => route.with_query("maxGenerations", value),
            None => route,
        }
    }

    #[tokio::test]
    async fn test_missing_generation_limit_awaits_input_without_fetching() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, notifier, _) = controller(store.clone());

        controller.enter(&route("7", None)).await;
        assert_eq!(controller.state(), &PedigreeViewState::AwaitingGenerationInput);
        controller.enter(&route("7", Some("  "))).await;
        assert_eq!(controller.state(), &PedigreeViewState::AwaitingGenerationInput);

        assert!(store.pedigree_calls().is_empty());
        assert!(notifier.messages().is_empty());
        assert!(controller.tree().is_none());
    }

    #[tokio::test]
    async fn test_reentering_without_limit_starts_empty() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, _, _) = controller(store.clone());
        controller.enter(&route("7", Some("2"))).await;
        assert!(controller.tree().is_some());

        controller.enter(&route("7", None)).await;

        assert_eq!(controller.state(), &PedigreeViewState::AwaitingGenerationInput);
        assert!(controller.tree().is_none());
        assert_eq!(store.pedigree_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_enter_loads_expanded_tree() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, _, _) = controller(store.clone());

        controller.enter(&route("7", Some("2"))).await;

        assert_eq!(controller.state(), &PedigreeViewState::Loaded);
        let tree = controller.tree().unwrap();
        assert_eq!(tree.node_count(), 5);
        assert!(tree.is_fully_expanded());
        assert_eq!(store.pedigree_calls(), vec![(7, Some(2))]);
    }

    #[tokio::test]
    async fn test_submit_generations_fetches_once_limit_given() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, notifier, _) = controller(store.clone());
        controller.enter(&route("7", None)).await;

        controller.submit_generations("   ").await;
        assert_eq!(controller.state(), &PedigreeViewState::AwaitingGenerationInput);

        controller.submit_generations("two").await;
        assert_eq!(controller.state(), &PedigreeViewState::AwaitingGenerationInput);
        assert_eq!(notifier.titles(), vec![INVALID_LIMIT_TITLE]);

        controller.submit_generations("1").await;
        assert_eq!(controller.state(), &PedigreeViewState::Loaded);
        assert_eq!(controller.tree().unwrap().depth(), 1);
        assert_eq!(store.pedigree_calls(), vec![(7, Some(1))]);
    }

    #[tokio::test]
    async fn test_missing_horse_id_is_fatal() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, notifier, navigator) = controller(store.clone());

        controller.enter(&RouteContext::new().with_query("maxGenerations", "3")).await;

        match controller.state() {
            PedigreeViewState::Error(err) => {
                assert_eq!(err, &PedigreeViewError::MissingHorseId);
                assert!(err.is_fatal());
            }
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(notifier.titles(), vec![PRECONDITION_TITLE]);
        assert_eq!(navigator.paths(), vec!["/horses".to_string()]);
        assert!(store.pedigree_calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_tree() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, notifier, _) = controller(store.clone());
        controller.enter(&route("7", Some("2"))).await;

        store.fail_next_pedigree(BackendError::Transport("connection refused".to_string()));
        controller.reload().await;

        match controller.state() {
            PedigreeViewState::Error(err) => assert!(!err.is_fatal()),
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(controller.tree().unwrap().node_count(), 5);
        let sent = notifier.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, FETCH_FAILED_TITLE);
        assert_eq!(sent[0].message, crate::logic::UNREACHABLE_MESSAGE);
        assert_eq!(sent[0].options.level, NotifyLevel::Error);
    }

    #[tokio::test]
    async fn test_first_load_failure_has_no_tree() {
        let store = Arc::new(RecordingStore::new());
        let (mut controller, notifier, _) = controller(store);

        controller.enter(&route("42", Some("3"))).await;

        assert!(matches!(
            controller.state(),
            PedigreeViewState::Error(PedigreeViewError::Backend(BackendError::NotFound(_)))
        ));
        assert!(controller.tree().is_none());
        assert_eq!(notifier.titles(), vec![FETCH_FAILED_TITLE]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_shows_fresh_fetch() {
        // The canned backend keeps answering with the full tree, so a local
        // prune would be visible as a missing node
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, notifier, _) = controller(store.clone());
        controller.enter(&route("7", Some("2"))).await;
        controller.toggle_node(&[Lineage::Mother]);

        let mother = controller.tree().unwrap().mother.as_deref().unwrap().to_ref();
        controller.request_delete(mother.clone());
        assert_eq!(controller.tree().unwrap().node_count(), 5);
        controller.confirm_delete(mother).await;

        assert_eq!(store.deleted(), vec![3]);
        assert_eq!(store.pedigree_calls(), vec![(7, Some(2)), (7, Some(2))]);
        let tree = controller.tree().unwrap();
        assert_eq!(tree.node_count(), 5);
        assert!(tree.is_fully_expanded());
        assert!(controller.staged_for_deletion().is_none());
        assert_eq!(notifier.messages()[0].message, "Deleting horse: Mia.");
    }

    #[tokio::test]
    async fn test_delete_relinks_through_backend() {
        let store = Arc::new(RecordingStore::new());
        let grandmother = store.seed_horse("Anna", 2000, Sex::Female, None, None).await;
        let mother = store
            .seed_horse("Bella", 2005, Sex::Female, Some(grandmother), None)
            .await;
        let father = store.seed_horse("Carl", 2004, Sex::Male, None, None).await;
        let foal = store
            .seed_horse("Dora", 2012, Sex::Female, Some(mother), Some(father))
            .await;
        let (mut controller, _, _) = controller(store.clone());
        controller.enter(&route(&foal.to_string(), Some("3"))).await;
        assert_eq!(controller.tree().unwrap().node_count(), 4);

        controller.confirm_delete(HorseRef::new(mother, "Bella")).await;

        let tree = controller.tree().unwrap();
        assert_eq!(tree.node_count(), 2);
        assert!(tree.mother.is_none());
        assert_eq!(tree.father.as_deref().map(|f| f.id), Some(father));
    }

    #[tokio::test]
    async fn test_failed_delete_clears_stage_and_keeps_tree() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, notifier, _) = controller(store.clone());
        controller.enter(&route("7", Some("2"))).await;
        controller.toggle_node(&[Lineage::Father]);

        let father = HorseRef::new(4, "Rex");
        controller.request_delete(father.clone());
        store.fail_next_delete(BackendError::Conflict {
            message: "Horse is still referenced".to_string(),
            errors: vec![],
        });
        controller.confirm_delete(father).await;

        assert!(controller.staged_for_deletion().is_none());
        assert_eq!(controller.state(), &PedigreeViewState::Loaded);
        assert_eq!(store.pedigree_calls().len(), 1);
        let tree = controller.tree().unwrap();
        assert_eq!(tree.node_at(&[Lineage::Father]).map(|n| n.expanded), Some(false));
        let sent = notifier.messages();
        assert_eq!(sent[0].title, DELETE_FAILED_TITLE);
        assert_eq!(sent[0].message, "Horse is still referenced");
        assert!(sent[0].options.rich_text);
    }

    #[tokio::test]
    async fn test_cancel_delete_touches_nothing() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, _, _) = controller(store.clone());
        controller.enter(&route("7", Some("2"))).await;

        controller.request_delete(HorseRef::new(1, "Luna"));
        assert_eq!(controller.staged_for_deletion().map(|h| h.id), Some(1));
        controller.cancel_delete();

        assert!(controller.staged_for_deletion().is_none());
        assert!(store.deleted().is_empty());
        assert_eq!(controller.tree().unwrap().node_count(), 5);
    }

    #[tokio::test]
    async fn test_go_back_targets_root_detail() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, _, navigator) = controller(store);
        controller.enter(&route("7", Some("1"))).await;

        controller.go_back();
        assert_eq!(navigator.paths(), vec!["/horses/detail/7".to_string()]);
    }

    #[tokio::test]
    async fn test_dropped_fetch_leaves_tree_untouched() {
        let store = Arc::new(RecordingStore::with_pedigree(sample_pedigree()));
        let (mut controller, notifier, _) = controller(store.clone());
        controller.enter(&route("7", Some("1"))).await;
        assert_eq!(controller.tree().unwrap().node_count(), 3);

        let release = store.gate_pedigree();
        tokio::select! {
            biased;
            _ = controller.submit_generations("2") => panic!("fetch should still be pending"),
            _ = tokio::task::yield_now() => {}
        }
        let _ = release.send(());

        assert_eq!(controller.state(), &PedigreeViewState::Loading);
        assert_eq!(controller.tree().unwrap().node_count(), 3);
        controller.leave();
        assert_eq!(controller.state(), &PedigreeViewState::Uninitialized);
        assert!(controller.tree().is_none());
        assert!(notifier.messages().is_empty());
    }
}
