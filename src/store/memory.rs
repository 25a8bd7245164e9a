use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use itertools::Itertools;
use log::{debug, info};
use parking_lot::RwLock;

use crate::error::BackendError;
use crate::logic::validate::{
    HorseValidator, OwnerValidator, RegistryView, MAX_PEDIGREE_GENERATIONS,
};
use crate::model::{
    Horse, HorseCreate, HorseRef, HorseSearch, HorseUpdate, Id, Lineage, Owner, OwnerCreate,
    OwnerSearch, PedigreeNode, Sex,
};
use crate::store::traits::{HorseStore, OwnerStore, Result};

/// Default depth of a pedigree request that carries no explicit bound
pub const DEFAULT_MAX_GENERATIONS: u32 = 5;

/// A horse row: relationships are stored as ids.
#[derive(Debug, Clone)]
struct HorseRecord {
    id: Id,
    name: String,
    description: Option<String>,
    date_of_birth: NaiveDate,
    sex: Sex,
    owner_id: Option<Id>,
    mother_id: Option<Id>,
    father_id: Option<Id>,
}

impl HorseRecord {
    fn from_payload(id: Id, horse: &HorseUpdate) -> Self {
        Self {
            id,
            name: horse.name.clone(),
            description: horse.description.clone(),
            date_of_birth: horse.date_of_birth,
            sex: horse.sex,
            owner_id: horse.owner_id,
            mother_id: horse.mother_id,
            father_id: horse.father_id,
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    horses: BTreeMap<Id, HorseRecord>,
    owners: BTreeMap<Id, Owner>,
    last_horse_id: Id,
    last_owner_id: Id,
}

impl RegistryView for Registry {
    fn horse_profile(&self, id: Id) -> Option<(Sex, NaiveDate)> {
        self.horses.get(&id).map(|h| (h.sex, h.date_of_birth))
    }

    fn owner_exists(&self, id: Id) -> bool {
        self.owners.contains_key(&id)
    }

    fn offspring(&self, id: Id) -> Vec<(String, NaiveDate, Lineage)> {
        self.horses
            .values()
            .filter_map(|h| {
                let role = if h.mother_id == Some(id) {
                    Lineage::Mother
                } else if h.father_id == Some(id) {
                    Lineage::Father
                } else {
                    return None;
                };
                Some((h.name.clone(), h.date_of_birth, role))
            })
            .collect()
    }
}

impl Registry {
    fn to_horse(&self, record: &HorseRecord) -> Horse {
        let parent = |id: Option<Id>| {
            id.and_then(|id| self.horses.get(&id))
                .map(|p| HorseRef::new(p.id, p.name.clone()))
        };
        Horse {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            date_of_birth: record.date_of_birth,
            sex: record.sex,
            owner: record.owner_id.and_then(|id| self.owners.get(&id).cloned()),
            mother: parent(record.mother_id),
            father: parent(record.father_id),
        }
    }

    fn owner_name(&self, record: &HorseRecord) -> Option<String> {
        record
            .owner_id
            .and_then(|id| self.owners.get(&id))
            .map(Owner::display_name)
    }

    fn matches(&self, record: &HorseRecord, search: &HorseSearch) -> bool {
        contains_ignore_case(Some(record.name.as_str()), search.name.as_deref())
            && contains_ignore_case(record.description.as_deref(), search.description.as_deref())
            && search.date_of_birth.map_or(true, |d| d == record.date_of_birth)
            && search.sex.map_or(true, |s| s == record.sex)
            && contains_ignore_case(
                self.owner_name(record).as_deref(),
                search.owner_name.as_deref(),
            )
    }

    /// Build the ancestry of `record`, descending at most `remaining` more
    /// generations. The bound also terminates cyclic records.
    fn pedigree_of(&self, record: &HorseRecord, remaining: u32) -> PedigreeNode {
        let mut node = PedigreeNode::new(record.id, record.name.clone(), record.date_of_birth, record.sex);
        if remaining == 0 {
            return node;
        }
        let ancestor = |id: Option<Id>| {
            id.and_then(|id| self.horses.get(&id))
                .map(|parent| Box::new(self.pedigree_of(parent, remaining - 1)))
        };
        node.mother = ancestor(record.mother_id);
        node.father = ancestor(record.father_id);
        node
    }
}

/// Empty or absent needle matches everything, like the SQL `COALESCE` filter.
fn contains_ignore_case(haystack: Option<&str>, needle: Option<&str>) -> bool {
    match needle.map(str::trim).filter(|n| !n.is_empty()) {
        None => true,
        Some(needle) => haystack
            .map(|h| h.to_uppercase().contains(&needle.to_uppercase()))
            .unwrap_or(false),
    }
}

/// In-process stud book backing the development server and the tests.
#[derive(Debug)]
pub struct MemoryStore {
    registry: RwLock<Registry>,
    default_max_generations: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_default_max_generations(DEFAULT_MAX_GENERATIONS)
    }

    pub fn with_default_max_generations(default_max_generations: u32) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            default_max_generations: default_max_generations.min(MAX_PEDIGREE_GENERATIONS),
        }
    }

    pub fn horse_count(&self) -> usize {
        self.registry.read().horses.len()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HorseStore for MemoryStore {
    async fn list_horses(&self) -> Result<Vec<Horse>> {
        let registry = self.registry.read();
        Ok(registry.horses.values().map(|r| registry.to_horse(r)).collect())
    }

    async fn search_horses(&self, search: &HorseSearch) -> Result<Vec<Horse>> {
        debug!("search_horses({:?})", search);
        let registry = self.registry.read();
        Ok(registry
            .horses
            .values()
            .filter(|record| registry.matches(record, search))
            .map(|record| registry.to_horse(record))
            .collect())
    }

    async fn get_horse(&self, id: Id) -> Result<Horse> {
        let registry = self.registry.read();
        registry
            .horses
            .get(&id)
            .map(|record| registry.to_horse(record))
            .ok_or_else(|| BackendError::NotFound(format!("No horse with ID {} found", id)))
    }

    async fn create_horse(&self, horse: &HorseCreate) -> Result<Horse> {
        let payload = HorseUpdate::from(horse.clone());
        let mut registry = self.registry.write();
        HorseValidator::validate(&*registry, None, &payload, Self::today())?;

        registry.last_horse_id += 1;
        let id = registry.last_horse_id;
        let record = HorseRecord::from_payload(id, &payload);
        registry.horses.insert(id, record.clone());
        info!("Created horse {} ({})", id, record.name);
        Ok(registry.to_horse(&record))
    }

    async fn update_horse(&self, id: Id, horse: &HorseUpdate) -> Result<Horse> {
        let mut registry = self.registry.write();
        if !registry.horses.contains_key(&id) {
            return Err(BackendError::NotFound(format!(
                "Could not update horse with ID {}, because it does not exist",
                id
            )));
        }
        HorseValidator::validate(&*registry, Some(id), horse, Self::today())?;

        let record = HorseRecord::from_payload(id, horse);
        registry.horses.insert(id, record.clone());
        info!("Updated horse {}", id);
        Ok(registry.to_horse(&record))
    }

    async fn delete_horse(&self, id: Id) -> Result<()> {
        let mut registry = self.registry.write();
        if registry.horses.remove(&id).is_none() {
            return Err(BackendError::NotFound(format!(
                "Failed to delete horse with ID {}",
                id
            )));
        }
        // Offspring keep their record but lose the link to the deleted parent
        for record in registry.horses.values_mut() {
            if record.mother_id == Some(id) {
                record.mother_id = None;
            }
            if record.father_id == Some(id) {
                record.father_id = None;
            }
        }
        info!("Deleted horse {}", id);
        Ok(())
    }

    async fn get_pedigree(&self, id: Id, max_generations: Option<u32>) -> Result<PedigreeNode> {
        let generations = max_generations.unwrap_or(self.default_max_generations);
        HorseValidator::validate_pedigree_generations(generations)?;
        debug!("get_pedigree({}, {})", id, generations);
        let registry = self.registry.read();
        let root = registry
            .horses
            .get(&id)
            .ok_or_else(|| BackendError::NotFound(format!("No horse with ID {} found", id)))?;
        Ok(registry.pedigree_of(root, generations))
    }
}

#[async_trait::async_trait]
impl OwnerStore for MemoryStore {
    async fn search_owners(&self, search: &OwnerSearch) -> Result<Vec<Owner>> {
        let registry = self.registry.read();
        let matching = registry
            .owners
            .values()
            .filter(|owner| {
                contains_ignore_case(Some(owner.display_name().as_str()), search.name.as_deref())
            })
            .sorted_by_key(|owner| owner.id)
            .cloned();
        Ok(match search.max_amount {
            Some(max) => matching.take(max).collect(),
            None => matching.collect(),
        })
    }

    async fn get_owner(&self, id: Id) -> Result<Owner> {
        self.registry
            .read()
            .owners
            .get(&id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("No owner with ID {} found", id)))
    }

    async fn create_owner(&self, owner: &OwnerCreate) -> Result<Owner> {
        OwnerValidator::validate(owner)?;
        let mut registry = self.registry.write();
        registry.last_owner_id += 1;
        let created = Owner {
            id: registry.last_owner_id,
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            description: owner.description.clone().filter(|d| !d.trim().is_empty()),
        };
        registry.owners.insert(created.id, created.clone());
        info!("Created owner {} ({})", created.id, created.display_name());
        Ok(created)
    }
}
