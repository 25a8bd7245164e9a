use serde::{Deserialize, Serialize};

use crate::model::{HorseRef, Id, Owner, Sex};

/// Upper bound on the candidates shown for one typeahead query.
pub const SUGGESTION_LIMIT: usize = 5;

/// Which relationship of a horse a picker is filling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipRole {
    Mother,
    Father,
    Owner,
}

impl RelationshipRole {
    /// Sex filter attached to the horse search for this role
    pub fn sex_filter(&self) -> Option<Sex> {
        match self {
            RelationshipRole::Mother => Some(Sex::Female),
            RelationshipRole::Father => Some(Sex::Male),
            RelationshipRole::Owner => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipRole::Mother => "mother",
            RelationshipRole::Father => "father",
            RelationshipRole::Owner => "owner",
        }
    }
}

/// A single suggestion request. Lives only as long as the request does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipQuery {
    pub role: RelationshipRole,
    pub text: String,
    pub limit: usize,
}

impl RelationshipQuery {
    pub fn new(role: RelationshipRole, text: &str) -> Self {
        Self {
            role,
            text: text.trim().to_string(),
            limit: SUGGESTION_LIMIT,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// A typeahead result: something that can be displayed by name and
/// referenced by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Horse(HorseRef),
    Owner(Owner),
}

impl Candidate {
    pub fn id(&self) -> Id {
        match self {
            Candidate::Horse(horse) => horse.id,
            Candidate::Owner(owner) => owner.id,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Candidate::Horse(horse) => horse.name.clone(),
            Candidate::Owner(owner) => owner.display_name(),
        }
    }

    /// Whether this candidate may fill the given role
    pub fn fits(&self, role: RelationshipRole) -> bool {
        match (self, role) {
            (Candidate::Owner(_), RelationshipRole::Owner) => true,
            (Candidate::Horse(_), RelationshipRole::Mother | RelationshipRole::Father) => true,
            _ => false,
        }
    }
}

impl From<HorseRef> for Candidate {
    fn from(horse: HorseRef) -> Self {
        Candidate::Horse(horse)
    }
}

impl From<Owner> for Candidate {
    fn from(owner: Owner) -> Self {
        Candidate::Owner(owner)
    }
}
