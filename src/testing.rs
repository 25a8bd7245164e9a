//! Fakes shared by the unit tests.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::BackendError;
use crate::model::{
    Horse, HorseCreate, HorseSearch, HorseUpdate, Id, Owner, OwnerCreate, OwnerSearch,
    PedigreeNode, Sex,
};
use crate::store::memory::MemoryStore;
use crate::store::traits::{HorseStore, OwnerStore, Result};
use crate::view::capabilities::{Navigator, NotifyOptions, Notifier};

/// `7 <- (3 <- (1, 2), 4)`: Stella out of Mia (by Odin out of Luna) by Rex.
pub fn sample_pedigree() -> PedigreeNode {
    let day = |y: i32| NaiveDate::from_ymd_opt(y, 5, 1).unwrap();
    PedigreeNode::new(7, "Stella", day(2015), Sex::Female)
        .with_mother(
            PedigreeNode::new(3, "Mia", day(2008), Sex::Female)
                .with_mother(PedigreeNode::new(1, "Luna", day(2001), Sex::Female))
                .with_father(PedigreeNode::new(2, "Odin", day(2000), Sex::Male)),
        )
        .with_father(PedigreeNode::new(4, "Rex", day(2009), Sex::Male))
}

#[derive(Default)]
struct Failures {
    search: Option<BackendError>,
    pedigree: Option<BackendError>,
    delete: Option<BackendError>,
}

/// Backend that records every call and can hold or fail single requests.
///
/// Horses and owners live in a [`MemoryStore`]. With a canned pedigree the
/// store answers every pedigree request for that root with the same tree,
/// whatever bound was asked for, and deletions only get recorded.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    canned_pedigree: Option<PedigreeNode>,
    pedigree_calls: Mutex<Vec<(Id, Option<u32>)>>,
    horse_searches: Mutex<Vec<HorseSearch>>,
    owner_searches: Mutex<Vec<OwnerSearch>>,
    deleted: Mutex<Vec<Id>>,
    requests: Mutex<usize>,
    failures: Mutex<Failures>,
    search_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    pedigree_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pedigree(tree: PedigreeNode) -> Self {
        Self {
            canned_pedigree: Some(tree),
            ..Self::default()
        }
    }

    /// Store a horse born on 1 March of `year`, bypassing the call log.
    pub async fn seed_horse(
        &self,
        name: &str,
        year: i32,
        sex: Sex,
        mother_id: Option<Id>,
        father_id: Option<Id>,
    ) -> Id {
        self.inner
            .create_horse(&HorseCreate {
                name: name.to_string(),
                description: None,
                date_of_birth: NaiveDate::from_ymd_opt(year, 3, 1).unwrap(),
                sex,
                owner_id: None,
                mother_id,
                father_id,
            })
            .await
            .unwrap()
            .id
    }

    pub async fn seed_owner(&self, first_name: &str, last_name: &str) -> Id {
        self.inner
            .create_owner(&OwnerCreate {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                description: None,
            })
            .await
            .unwrap()
            .id
    }

    pub fn horse_count(&self) -> usize {
        self.inner.horse_count()
    }

    pub fn pedigree_calls(&self) -> Vec<(Id, Option<u32>)> {
        self.pedigree_calls.lock().clone()
    }

    pub fn horse_searches(&self) -> Vec<HorseSearch> {
        self.horse_searches.lock().clone()
    }

    pub fn owner_searches(&self) -> Vec<OwnerSearch> {
        self.owner_searches.lock().clone()
    }

    pub fn deleted(&self) -> Vec<Id> {
        self.deleted.lock().clone()
    }

    /// Number of calls that went through the store traits
    pub fn request_count(&self) -> usize {
        *self.requests.lock()
    }

    pub fn fail_next_search(&self, err: BackendError) {
        self.failures.lock().search = Some(err);
    }

    pub fn fail_next_pedigree(&self, err: BackendError) {
        self.failures.lock().pedigree = Some(err);
    }

    pub fn fail_next_delete(&self, err: BackendError) {
        self.failures.lock().delete = Some(err);
    }

    /// Hold the next search for `name` until the returned sender fires
    pub fn gate_search(&self, name: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.search_gates.lock().insert(name.to_string(), rx);
        tx
    }

    /// Hold the next pedigree request until the returned sender fires
    pub fn gate_pedigree(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.pedigree_gate.lock() = Some(rx);
        tx
    }

    fn count(&self) {
        *self.requests.lock() += 1;
    }

    async fn pass_search_gate(&self, name: Option<&str>) -> Result<()> {
        let gate = name.and_then(|n| self.search_gates.lock().remove(n));
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.failures.lock().search.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl HorseStore for RecordingStore {
    async fn list_horses(&self) -> Result<Vec<Horse>> {
        self.count();
        self.inner.list_horses().await
    }

    async fn search_horses(&self, search: &HorseSearch) -> Result<Vec<Horse>> {
        self.count();
        self.horse_searches.lock().push(search.clone());
        self.pass_search_gate(search.name.as_deref()).await?;
        self.inner.search_horses(search).await
    }

    async fn get_horse(&self, id: Id) -> Result<Horse> {
        self.count();
        self.inner.get_horse(id).await
    }

    async fn create_horse(&self, horse: &HorseCreate) -> Result<Horse> {
        self.count();
        self.inner.create_horse(horse).await
    }

    async fn update_horse(&self, id: Id, horse: &HorseUpdate) -> Result<Horse> {
        self.count();
        self.inner.update_horse(id, horse).await
    }

    async fn delete_horse(&self, id: Id) -> Result<()> {
        self.count();
        if let Some(err) = self.failures.lock().delete.take() {
            return Err(err);
        }
        self.deleted.lock().push(id);
        match self.canned_pedigree {
            Some(_) => Ok(()),
            None => self.inner.delete_horse(id).await,
        }
    }

    async fn get_pedigree(&self, id: Id, max_generations: Option<u32>) -> Result<PedigreeNode> {
        self.count();
        self.pedigree_calls.lock().push((id, max_generations));
        let gate = self.pedigree_gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = self.failures.lock().pedigree.take() {
            return Err(err);
        }
        match &self.canned_pedigree {
            Some(tree) if tree.id == id => Ok(tree.clone()),
            Some(_) => Err(BackendError::NotFound(format!("No horse with ID {} found", id))),
            None => self.inner.get_pedigree(id, max_generations).await,
        }
    }
}

#[async_trait::async_trait]
impl OwnerStore for RecordingStore {
    async fn search_owners(&self, search: &OwnerSearch) -> Result<Vec<Owner>> {
        self.count();
        self.owner_searches.lock().push(search.clone());
        self.pass_search_gate(search.name.as_deref()).await?;
        self.inner.search_owners(search).await
    }

    async fn get_owner(&self, id: Id) -> Result<Owner> {
        self.count();
        self.inner.get_owner(id).await
    }

    async fn create_owner(&self, owner: &OwnerCreate) -> Result<Owner> {
        self.count();
        self.inner.create_owner(owner).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub title: String,
    pub options: NotifyOptions,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.sent.lock().iter().map(|n| n.title.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, title: &str, options: NotifyOptions) {
        self.sent.lock().push(Notification {
            message: message.to_string(),
            title: title.to_string(),
            options,
        });
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(path, _)| path.clone()).collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str, query: &[(String, String)]) {
        self.calls.lock().push((path.to_string(), query.to_vec()));
    }
}
