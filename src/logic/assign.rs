use log::debug;

use crate::error::AssignError;
use crate::model::{Candidate, Id, RelationshipRole};

/// Turns a picked candidate into the id that goes into a create/update
/// payload. Nested entities never reach the payload.
///
/// Only the direct case of a horse picked as its own parent is rejected;
/// longer ancestry cycles are not detected here.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipAssigner {
    editing: Option<Id>,
}

impl RelationshipAssigner {
    /// Assigner for a record that does not exist yet
    pub fn for_new() -> Self {
        Self { editing: None }
    }

    /// Assigner for the stored horse `id`
    pub fn for_horse(id: Id) -> Self {
        Self { editing: Some(id) }
    }

    /// `None` clears the relationship.
    pub fn assign(
        &self,
        role: RelationshipRole,
        selection: Option<&Candidate>,
    ) -> Result<Option<Id>, AssignError> {
        let Some(candidate) = selection else {
            return Ok(None);
        };
        if !candidate.fits(role) {
            return Err(AssignError::RoleMismatch { role });
        }
        if role != RelationshipRole::Owner && self.editing == Some(candidate.id()) {
            debug!("Rejected horse {} as its own {}", candidate.id(), role.label());
            return Err(AssignError::SelfReference { role });
        }
        Ok(Some(candidate.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HorseRef, Owner};

    fn owner(id: Id) -> Candidate {
        Candidate::Owner(Owner {
            id,
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            description: None,
        })
    }

    #[test]
    fn test_assign_yields_id_only() {
        let assigner = RelationshipAssigner::for_horse(7);
        let mother = Candidate::Horse(HorseRef::new(3, "Bella"));
        assert_eq!(assigner.assign(RelationshipRole::Mother, Some(&mother)), Ok(Some(3)));
        assert_eq!(assigner.assign(RelationshipRole::Owner, Some(&owner(7))), Ok(Some(7)));
        assert_eq!(assigner.assign(RelationshipRole::Father, None), Ok(None));
    }

    #[test]
    fn test_self_reference_rejected() {
        let assigner = RelationshipAssigner::for_horse(7);
        let itself = Candidate::Horse(HorseRef::new(7, "Comet"));
        assert_eq!(
            assigner.assign(RelationshipRole::Father, Some(&itself)),
            Err(AssignError::SelfReference {
                role: RelationshipRole::Father
            })
        );
        assert_eq!(
            RelationshipAssigner::for_new().assign(RelationshipRole::Father, Some(&itself)),
            Ok(Some(7))
        );
    }

    #[test]
    fn test_role_mismatch_rejected() {
        let assigner = RelationshipAssigner::for_new();
        assert!(matches!(
            assigner.assign(RelationshipRole::Mother, Some(&owner(1))),
            Err(AssignError::RoleMismatch { .. })
        ));
    }
}
