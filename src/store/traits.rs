use crate::error::BackendError;
use crate::model::{
    Horse, HorseCreate, HorseSearch, HorseUpdate, Id, Owner, OwnerCreate, OwnerSearch,
    PedigreeNode,
};

pub type Result<T> = std::result::Result<T, BackendError>;

/// Horse endpoints of the REST collaborator
#[async_trait::async_trait]
pub trait HorseStore: Send + Sync {
    async fn list_horses(&self) -> Result<Vec<Horse>>;
    async fn search_horses(&self, search: &HorseSearch) -> Result<Vec<Horse>>;
    async fn get_horse(&self, id: Id) -> Result<Horse>;
    async fn create_horse(&self, horse: &HorseCreate) -> Result<Horse>;
    async fn update_horse(&self, id: Id, horse: &HorseUpdate) -> Result<Horse>;
    async fn delete_horse(&self, id: Id) -> Result<()>;
    /// Ancestry of `id`. `None` leaves the depth to the backend default and
    /// must not be encoded as a sentinel: `Some(0)` is a valid bound.
    async fn get_pedigree(&self, id: Id, max_generations: Option<u32>) -> Result<PedigreeNode>;
}

/// Owner endpoints of the REST collaborator
#[async_trait::async_trait]
pub trait OwnerStore: Send + Sync {
    async fn search_owners(&self, search: &OwnerSearch) -> Result<Vec<Owner>>;
    async fn get_owner(&self, id: Id) -> Result<Owner>;
    async fn create_owner(&self, owner: &OwnerCreate) -> Result<Owner>;
}

pub trait Backend: HorseStore + OwnerStore + Send + Sync {}
impl<T: HorseStore + OwnerStore + Send + Sync> Backend for T {}
