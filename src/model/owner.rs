use serde::{Deserialize, Serialize};

use crate::model::Id;

/// An owner as returned by the backend; doubles as the foreign-key target
/// for a horse's `ownerId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Owner {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCreate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Query parameters of `GET /owners`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "maxAmount", default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<usize>,
}

impl OwnerSearch {
    pub fn by_name(name: &str, max_amount: usize) -> Self {
        Self {
            name: Some(name.to_string()),
            max_amount: Some(max_amount),
        }
    }
}
