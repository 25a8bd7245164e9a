use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Id, Owner, Sex};

/// Minimal identity of a horse: enough to display it and to reference it.
///
/// Deserializes from any horse-shaped object, so the nested parents of a
/// detail response read straight into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HorseRef {
    pub id: Id,
    pub name: String,
}

impl HorseRef {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A horse as returned by `GET /horses` and `GET /horses/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<HorseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<HorseRef>,
}

impl Horse {
    pub fn to_ref(&self) -> HorseRef {
        HorseRef::new(self.id, self.name.clone())
    }
}

/// Body of `POST /horses`. Relationships travel as ids only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<Id>,
}

/// Body of `PUT /horses/{id}`; replaces every field of the stored horse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorseUpdate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother_id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_id: Option<Id>,
}

impl From<HorseCreate> for HorseUpdate {
    fn from(create: HorseCreate) -> Self {
        Self {
            name: create.name,
            description: create.description,
            date_of_birth: create.date_of_birth,
            sex: create.sex,
            owner_id: create.owner_id,
            mother_id: create.mother_id,
            father_id: create.father_id,
        }
    }
}

impl From<&Horse> for HorseUpdate {
    fn from(horse: &Horse) -> Self {
        Self {
            name: horse.name.clone(),
            description: horse.description.clone(),
            date_of_birth: horse.date_of_birth,
            sex: horse.sex,
            owner_id: horse.owner.as_ref().map(|o| o.id),
            mother_id: horse.mother.as_ref().map(|m| m.id),
            father_id: horse.father.as_ref().map(|f| f.id),
        }
    }
}

/// Query parameters of `GET /horses`. Every filter is optional; an absent
/// filter is not sent and not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorseSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(rename = "ownerName", default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
}

impl HorseSearch {
    pub fn by_name(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self == &Self::default()
    }
}
