use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{HorseRef, Id, Sex};

/// One step from a node towards one of its parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lineage {
    Mother,
    Father,
}

/// A horse and its recorded ancestry as returned by
/// `GET /horses/pedigree/{id}`.
///
/// Each fetch yields an independently owned tree. A horse that appears
/// twice in the ancestry (e.g. through inbreeding) is two separate nodes;
/// nodes are never coalesced by id.
///
/// Ancestors beyond the generation limit of the producing fetch are simply
/// absent. A node without `mother`/`father` therefore means either "no
/// recorded parent" or "limit reached"; the two cases are not
/// distinguishable from the tree alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedigreeNode {
    pub id: Id,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<Box<PedigreeNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<Box<PedigreeNode>>,
    /// Presentation state, never sent over the wire
    #[serde(skip)]
    pub expanded: bool,
}

impl PedigreeNode {
    pub fn new(id: Id, name: impl Into<String>, date_of_birth: NaiveDate, sex: Sex) -> Self {
        Self {
            id,
            name: name.into(),
            date_of_birth,
            sex,
            mother: None,
            father: None,
            expanded: false,
        }
    }

    pub fn with_mother(mut self, mother: PedigreeNode) -> Self {
        self.mother = Some(Box::new(mother));
        self
    }

    pub fn with_father(mut self, father: PedigreeNode) -> Self {
        self.father = Some(Box::new(father));
        self
    }

    pub fn to_ref(&self) -> HorseRef {
        HorseRef::new(self.id, self.name.clone())
    }

    pub fn parent(&self, lineage: Lineage) -> Option<&PedigreeNode> {
        match lineage {
            Lineage::Mother => self.mother.as_deref(),
            Lineage::Father => self.father.as_deref(),
        }
    }

    fn parent_mut(&mut self, lineage: Lineage) -> Option<&mut PedigreeNode> {
        match lineage {
            Lineage::Mother => self.mother.as_deref_mut(),
            Lineage::Father => self.father.as_deref_mut(),
        }
    }

    pub fn parents(&self) -> impl Iterator<Item = &PedigreeNode> {
        self.mother.as_deref().into_iter().chain(self.father.as_deref())
    }

    /// Mark every node reachable from this one as expanded.
    ///
    /// A freshly deserialized tree is fully collapsed, so this has to run
    /// after every successful fetch.
    pub fn initialize_expanded(&mut self) {
        self.expanded = true;
        if let Some(mother) = self.mother.as_deref_mut() {
            mother.initialize_expanded();
        }
        if let Some(father) = self.father.as_deref_mut() {
            father.initialize_expanded();
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.nodes().iter().all(|node| node.expanded)
    }

    /// All reachable nodes in pre-order, mother before father.
    pub fn nodes(&self) -> Vec<&PedigreeNode> {
        let mut visited = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            visited.push(node);
            if let Some(father) = node.father.as_deref() {
                stack.push(father);
            }
            if let Some(mother) = node.mother.as_deref() {
                stack.push(mother);
            }
        }
        visited
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Length in edges of the longest path towards an ancestor.
    pub fn depth(&self) -> usize {
        self.parents()
            .map(|parent| parent.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn node_at(&self, path: &[Lineage]) -> Option<&PedigreeNode> {
        path.iter()
            .try_fold(self, |node, lineage| node.parent(*lineage))
    }

    pub fn node_at_mut(&mut self, path: &[Lineage]) -> Option<&mut PedigreeNode> {
        let mut node = self;
        for lineage in path {
            node = node.parent_mut(*lineage)?;
        }
        Some(node)
    }

    /// Flip the expansion of the node at `path`, returning its new state.
    pub fn toggle_expanded(&mut self, path: &[Lineage]) -> Option<bool> {
        let node = self.node_at_mut(path)?;
        node.expanded = !node.expanded;
        Some(node.expanded)
    }

    /// Drop every ancestor more than `max_generations` edges away.
    /// Returns whether anything was removed.
    pub fn truncate(&mut self, max_generations: u32) -> bool {
        if max_generations == 0 {
            let pruned = self.mother.is_some() || self.father.is_some();
            self.mother = None;
            self.father = None;
            return pruned;
        }
        let mut pruned = false;
        if let Some(mother) = self.mother.as_deref_mut() {
            pruned |= mother.truncate(max_generations - 1);
        }
        if let Some(father) = self.father.as_deref_mut() {
            pruned |= father.truncate(max_generations - 1);
        }
        pruned
    }
}
